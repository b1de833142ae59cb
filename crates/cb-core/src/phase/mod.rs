//! Phase domain module.
//!
//! An [`AppPhase`] is the mutually exclusive top-level mode of the shell.
//! Exactly one phase is active at a time; which one is derived from the
//! persisted flags (see [`crate::persisted::PersistedState::phase`]).

pub mod state_machine;

use std::fmt;

use serde::Serialize;

pub use state_machine::{
    CommitPolicy, PhaseCommand, PhasePlan, PhaseRejection, PhaseStateMachine, StoreAction,
};

/// Sub-state of the authentication phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthView {
    /// Sign-in screen.
    SignIn,
    /// Sign-up screen.
    SignUp,
}

/// Top-level application phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "phase", content = "view", rename_all = "snake_case")]
pub enum AppPhase {
    /// Transient launch screen. Never persisted and never re-entered.
    Splash,
    /// Introduction slides; shown until onboarding is completed or skipped.
    Onboarding,
    /// Authentication, with its sign-in/sign-up sub-state.
    Auth(AuthView),
    /// Authenticated home.
    Home,
}

impl AppPhase {
    pub fn is_auth(&self) -> bool {
        matches!(self, AppPhase::Auth(_))
    }

    /// Route name of the screen mounted for this phase.
    pub fn screen_name(&self) -> &'static str {
        match self {
            AppPhase::Splash => "Splash",
            AppPhase::Onboarding => "Onboarding",
            AppPhase::Auth(AuthView::SignIn) => "Auth",
            AppPhase::Auth(AuthView::SignUp) => "Signup",
            AppPhase::Home => "Home",
        }
    }
}

impl Default for AppPhase {
    fn default() -> Self {
        AppPhase::Splash
    }
}

impl fmt::Display for AppPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppPhase::Splash => f.write_str("splash"),
            AppPhase::Onboarding => f.write_str("onboarding"),
            AppPhase::Auth(AuthView::SignIn) => f.write_str("auth/sign-in"),
            AppPhase::Auth(AuthView::SignUp) => f.write_str("auth/sign-up"),
            AppPhase::Home => f.write_str("home"),
        }
    }
}
