//! CoffeeBrew shell library
//!
//! Bootstrap (config, tracing, wiring), shell-side adapters and the
//! command-line front end that drives the phase controller.

pub mod adapters;
pub mod bootstrap;
pub mod cli;

pub use cli::{Cli, Command, CommandOutput, Session};
