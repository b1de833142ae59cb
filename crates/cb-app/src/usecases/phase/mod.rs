//! Phase use cases.
//!
//! [`PhaseController`] owns the authoritative phase. Everything else reads it
//! through [`PhaseContext`] snapshots.

mod context;
mod controller;

pub use context::{PhaseContext, PhaseSnapshot};
pub use controller::{PhaseController, PhaseError, RestartReport};
