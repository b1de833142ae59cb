//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. The phase controller depends only on
//! these traits; concrete stores and providers live in `cb-infra`.

pub mod app_dirs;
mod clock;
pub mod credential_provider;
pub mod errors;
pub mod key_value_store;
pub mod phase_event;

pub use app_dirs::AppDirsPort;
pub use clock::ClockPort;
pub use credential_provider::CredentialProviderPort;
pub use errors::{AppDirsError, StoreError};
pub use key_value_store::KeyValueStorePort;
pub use phase_event::PhaseEventPort;
