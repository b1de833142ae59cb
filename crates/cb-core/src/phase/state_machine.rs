//! Phase state machine.
//!
//! Defines a pure planning function for phase transitions. The planner never
//! touches storage: it validates the precondition for a command and describes
//! the storage action plus the commit policy the controller must apply.

use crate::auth::AuthToken;
use crate::phase::{AppPhase, AuthView};
use crate::profile::Profile;

/// Commands that drive the phase flow.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseCommand {
    /// Onboarding finished or skipped.
    CompleteOnboarding,
    /// Switch the auth screen to sign-up.
    NavigateToSignup,
    /// Switch the auth screen back to sign-in.
    BackToSignin,
    /// Credentials were granted by the provider.
    Authenticate {
        token: AuthToken,
        profile: Option<Profile>,
    },
    /// Drop credentials and return to sign-in.
    Logout,
    /// Forget onboarding and show the slides again.
    BackToOnboarding,
    /// Clear everything and start over.
    Restart,
    /// Replace the stored profile.
    UpdateProfile { profile: Profile },
}

impl PhaseCommand {
    pub fn name(&self) -> &'static str {
        match self {
            PhaseCommand::CompleteOnboarding => "complete_onboarding",
            PhaseCommand::NavigateToSignup => "navigate_to_signup",
            PhaseCommand::BackToSignin => "back_to_signin",
            PhaseCommand::Authenticate { .. } => "authenticate",
            PhaseCommand::Logout => "logout",
            PhaseCommand::BackToOnboarding => "back_to_onboarding",
            PhaseCommand::Restart => "restart",
            PhaseCommand::UpdateProfile { .. } => "update_profile",
        }
    }
}

/// Storage side-effect required before a transition may commit.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// Write `onboarded = true`.
    MarkOnboarded,
    /// Write the token and, when present, the profile as one combined write.
    PersistCredentials {
        token: AuthToken,
        profile: Option<Profile>,
    },
    /// Remove token and profile, attempting both.
    ClearCredentials,
    /// Remove the onboarded flag.
    ClearOnboarded,
    /// Batched removal of every persisted key.
    ClearAll,
    /// Overwrite the stored profile.
    PersistProfile { profile: Profile },
}

/// How storage failures affect the in-memory phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Phase changes only after storage confirms the action.
    FailClosed,
    /// Phase changes even if storage reports a failure.
    Optimistic,
}

/// Result of planning a command against the current phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhasePlan {
    pub target: AppPhase,
    pub action: Option<StoreAction>,
    pub policy: CommitPolicy,
}

impl PhasePlan {
    fn in_memory(target: AppPhase) -> Self {
        Self {
            target,
            action: None,
            policy: CommitPolicy::FailClosed,
        }
    }

    fn fail_closed(target: AppPhase, action: StoreAction) -> Self {
        Self {
            target,
            action: Some(action),
            policy: CommitPolicy::FailClosed,
        }
    }
}

/// A command whose precondition does not hold in the current phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseRejection {
    pub from: AppPhase,
    pub command: &'static str,
}

/// Pure phase state machine: no side effects.
pub struct PhaseStateMachine;

impl PhaseStateMachine {
    pub fn plan(current: AppPhase, command: PhaseCommand) -> Result<PhasePlan, PhaseRejection> {
        let name = command.name();
        match (current, command) {
            (AppPhase::Onboarding, PhaseCommand::CompleteOnboarding) => Ok(PhasePlan::fail_closed(
                AppPhase::Auth(AuthView::SignIn),
                StoreAction::MarkOnboarded,
            )),
            (AppPhase::Auth(_), PhaseCommand::NavigateToSignup) => {
                Ok(PhasePlan::in_memory(AppPhase::Auth(AuthView::SignUp)))
            }
            (AppPhase::Auth(_), PhaseCommand::BackToSignin) => {
                Ok(PhasePlan::in_memory(AppPhase::Auth(AuthView::SignIn)))
            }
            (AppPhase::Auth(_), PhaseCommand::Authenticate { token, profile }) => Ok(
                PhasePlan::fail_closed(
                    AppPhase::Home,
                    StoreAction::PersistCredentials { token, profile },
                ),
            ),
            (AppPhase::Auth(_), PhaseCommand::BackToOnboarding) => Ok(PhasePlan::fail_closed(
                AppPhase::Onboarding,
                StoreAction::ClearOnboarded,
            )),
            (AppPhase::Home, PhaseCommand::Logout) => Ok(PhasePlan::fail_closed(
                AppPhase::Auth(AuthView::SignIn),
                StoreAction::ClearCredentials,
            )),
            (AppPhase::Home, PhaseCommand::Restart) => Ok(PhasePlan {
                target: AppPhase::Onboarding,
                action: Some(StoreAction::ClearAll),
                policy: CommitPolicy::Optimistic,
            }),
            (AppPhase::Home, PhaseCommand::UpdateProfile { profile }) => Ok(
                PhasePlan::fail_closed(AppPhase::Home, StoreAction::PersistProfile { profile }),
            ),
            (from, _) => Err(PhaseRejection {
                from,
                command: name,
            }),
        }
    }
}
