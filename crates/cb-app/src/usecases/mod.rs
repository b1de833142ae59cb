pub mod auth;
pub mod launch;
pub mod phase;

pub use auth::{AuthFlowError, SignIn, SignUp};
pub use launch::LaunchApp;
pub use phase::{PhaseContext, PhaseController, PhaseError, PhaseSnapshot, RestartReport};
