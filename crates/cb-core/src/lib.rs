//! # cb-core
//!
//! Core domain models and phase rules for the CoffeeBrew app shell.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod app_dirs;
pub mod auth;
pub mod config;
pub mod persisted;
pub mod phase;
pub mod ports;
pub mod profile;

// Re-export commonly used types at the crate root
pub use auth::{AuthError, AuthGrant, AuthToken, Credentials, CredentialsError};
pub use config::AppConfig;
pub use persisted::PersistedState;
pub use phase::{AppPhase, AuthView, PhaseCommand, PhaseStateMachine};
pub use profile::{Profile, ProfileParseError, SignupMethod};
