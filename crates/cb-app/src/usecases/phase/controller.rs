//! Phase controller.
//!
//! Coordinates the pure phase state machine with the persistent store. Every
//! storage-touching transition persists first and only then updates the
//! in-memory snapshot, except `restart`, whose commit policy is optimistic.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use cb_core::persisted::{
    ALL_KEYS, AUTH_TOKEN_KEY, ONBOARDED_KEY, ONBOARDED_VALUE, USER_PROFILE_KEY,
};
use cb_core::phase::{CommitPolicy, PhaseRejection, StoreAction};
use cb_core::ports::{KeyValueStorePort, PhaseEventPort, StoreError};
use cb_core::{
    AppPhase, AuthToken, PersistedState, PhaseCommand, PhaseStateMachine, Profile,
    ProfileParseError,
};

use super::context::{PhaseContext, PhaseSnapshot};

/// Errors produced by phase transitions.
#[derive(Debug, thiserror::Error)]
pub enum PhaseError {
    #[error("cannot {operation} from {from}")]
    InvalidTransition {
        from: AppPhase,
        operation: &'static str,
    },

    #[error("{operation} was not persisted: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StoreError,
    },

    /// The token was stored but the profile was not. The phase has already
    /// moved to `Home` with no profile.
    #[error("signed in, but the profile was not saved: {0}")]
    ProfileNotPersisted(#[source] StoreError),

    /// At least one credential key could not be removed; the phase stays `Home`.
    #[error("logout was not confirmed by storage")]
    LogoutIncomplete {
        token: Option<StoreError>,
        profile: Option<StoreError>,
    },

    #[error(transparent)]
    ProfileEncoding(#[from] ProfileParseError),
}

impl From<PhaseRejection> for PhaseError {
    fn from(rejection: PhaseRejection) -> Self {
        PhaseError::InvalidTransition {
            from: rejection.from,
            operation: rejection.command,
        }
    }
}

/// Outcome of a restart. The phase is `Onboarding` either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartReport {
    /// Set when the batched removal did not confirm every key.
    pub storage_error: Option<StoreError>,
}

impl RestartReport {
    pub fn fully_cleared(&self) -> bool {
        self.storage_error.is_none()
    }
}

/// Storage outcome handed from action execution to the commit step.
enum Executed {
    Committed(PhaseSnapshot),
    /// Committed with a storage failure the caller must still hear about.
    CommittedWithError(PhaseSnapshot, PhaseError),
}

/// Single writer of the application phase.
pub struct PhaseController {
    context: Arc<PhaseContext>,
    store: Arc<dyn KeyValueStorePort>,
    phase_events: Arc<dyn PhaseEventPort>,
}

impl PhaseController {
    pub fn new(store: Arc<dyn KeyValueStorePort>, phase_events: Arc<dyn PhaseEventPort>) -> Self {
        Self {
            context: PhaseContext::splash().arc(),
            store,
            phase_events,
        }
    }

    /// Shared read-only view for consumers.
    pub fn context(&self) -> Arc<PhaseContext> {
        self.context.clone()
    }

    pub async fn phase(&self) -> AppPhase {
        self.context.phase().await
    }

    pub async fn profile(&self) -> Option<Profile> {
        self.context.snapshot().await.profile
    }

    pub async fn snapshot(&self) -> PhaseSnapshot {
        self.context.snapshot().await
    }

    /// Read the three persisted keys concurrently and resolve the phase.
    ///
    /// Never fails: any read error or an unparseable profile resolves to
    /// `Onboarding` with every flag cleared.
    pub async fn resolve_startup_phase(&self) -> AppPhase {
        let state = self.load_persisted_state().await;
        self.enter_resolved_state(state).await
    }

    /// Fail-closed read of the persisted state, without touching the phase.
    pub async fn load_persisted_state(&self) -> PersistedState {
        let span = info_span!("usecase.phase_controller.load_persisted_state");
        async {
            let (onboarded, token, profile) = tokio::join!(
                self.store.get(ONBOARDED_KEY),
                self.store.get(AUTH_TOKEN_KEY),
                self.store.get(USER_PROFILE_KEY),
            );

            let (onboarded, token, profile) = match (onboarded, token, profile) {
                (Ok(onboarded), Ok(token), Ok(profile)) => (onboarded, token, profile),
                (onboarded, token, profile) => {
                    for err in [onboarded.err(), token.err(), profile.err()]
                        .into_iter()
                        .flatten()
                    {
                        warn!(error = %err, "startup read failed, falling back to onboarding");
                    }
                    return PersistedState::default();
                }
            };

            match PersistedState::from_stored(onboarded, token, profile) {
                Ok(state) => state,
                Err(err) => {
                    warn!(error = %err, "stored profile unreadable, falling back to onboarding");
                    PersistedState::default()
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Publish a resolved startup state as the current phase.
    pub async fn enter_resolved_state(&self, state: PersistedState) -> AppPhase {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let phase = state.phase();
        self.commit(
            "resolve_startup_phase",
            PhaseSnapshot {
                phase,
                profile: state.user_profile,
            },
        )
        .await;
        phase
    }

    pub async fn complete_onboarding(&self) -> Result<AppPhase, PhaseError> {
        self.dispatch(PhaseCommand::CompleteOnboarding).await
    }

    pub async fn navigate_to_signup(&self) -> Result<AppPhase, PhaseError> {
        self.dispatch(PhaseCommand::NavigateToSignup).await
    }

    pub async fn back_to_signin(&self) -> Result<AppPhase, PhaseError> {
        self.dispatch(PhaseCommand::BackToSignin).await
    }

    /// Store a granted credential and enter `Home`.
    ///
    /// Token and profile are written concurrently. A failed token write
    /// leaves the phase unchanged. A failed profile write after a successful
    /// token write still enters `Home`, without a profile, and returns
    /// [`PhaseError::ProfileNotPersisted`]. A profile that would not read
    /// back is refused with [`PhaseError::ProfileEncoding`] before any write.
    pub async fn authenticate(
        &self,
        token: AuthToken,
        profile: Option<Profile>,
    ) -> Result<AppPhase, PhaseError> {
        self.dispatch(PhaseCommand::Authenticate { token, profile })
            .await
    }

    pub async fn logout(&self) -> Result<AppPhase, PhaseError> {
        self.dispatch(PhaseCommand::Logout).await
    }

    pub async fn back_to_onboarding(&self) -> Result<AppPhase, PhaseError> {
        self.dispatch(PhaseCommand::BackToOnboarding).await
    }

    /// Clear all persisted state and return to onboarding.
    ///
    /// Only fails when not called from `Home`. A storage failure is reported
    /// in the [`RestartReport`] but the phase still becomes `Onboarding`.
    pub async fn restart(&self) -> Result<RestartReport, PhaseError> {
        match self.dispatch(PhaseCommand::Restart).await {
            Ok(_) => Ok(RestartReport {
                storage_error: None,
            }),
            Err(PhaseError::Store { source, .. }) => Ok(RestartReport {
                storage_error: Some(source),
            }),
            Err(err) => Err(err),
        }
    }

    pub async fn update_profile(&self, profile: Profile) -> Result<AppPhase, PhaseError> {
        self.dispatch(PhaseCommand::UpdateProfile { profile }).await
    }

    async fn dispatch(&self, command: PhaseCommand) -> Result<AppPhase, PhaseError> {
        let operation = command.name();
        // Serialize transitions: the whole plan + persist + commit runs as one unit.
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.phase_controller.dispatch", operation);
        async {
            let current = self.context.snapshot().await;
            let plan = PhaseStateMachine::plan(current.phase, command).map_err(|rejection| {
                debug!(from = %rejection.from, operation, "transition rejected");
                PhaseError::from(rejection)
            })?;

            let target = plan.target;
            let executed = match plan.action {
                None => Executed::Committed(PhaseSnapshot {
                    phase: target,
                    profile: current.profile,
                }),
                Some(action) => {
                    match self.execute_action(operation, action, target, current).await {
                        Ok(executed) => executed,
                        Err(err) if plan.policy == CommitPolicy::Optimistic => {
                            warn!(operation, error = %err, "storage incomplete, committing anyway");
                            Executed::CommittedWithError(
                                PhaseSnapshot {
                                    phase: target,
                                    profile: None,
                                },
                                err,
                            )
                        }
                        Err(err) => {
                            warn!(operation, error = %err, "transition aborted, phase unchanged");
                            return Err(err);
                        }
                    }
                }
            };

            match executed {
                Executed::Committed(next) => {
                    let phase = next.phase;
                    self.commit(operation, next).await;
                    Ok(phase)
                }
                Executed::CommittedWithError(next, err) => {
                    self.commit(operation, next).await;
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn execute_action(
        &self,
        operation: &'static str,
        action: StoreAction,
        target: AppPhase,
        current: PhaseSnapshot,
    ) -> Result<Executed, PhaseError> {
        let store_err = |source: StoreError| PhaseError::Store { operation, source };

        match action {
            StoreAction::MarkOnboarded => {
                self.store
                    .set(ONBOARDED_KEY, ONBOARDED_VALUE)
                    .await
                    .map_err(store_err)?;
                Ok(Executed::Committed(PhaseSnapshot {
                    phase: target,
                    profile: current.profile,
                }))
            }
            StoreAction::PersistCredentials { token, profile } => {
                let encoded = profile.as_ref().map(Profile::to_stored).transpose()?;

                let write_profile = async {
                    match &encoded {
                        Some(raw) => self.store.set(USER_PROFILE_KEY, raw).await,
                        None => Ok(()),
                    }
                };
                let (token_result, profile_result) = tokio::join!(
                    self.store.set(AUTH_TOKEN_KEY, token.as_str()),
                    write_profile,
                );

                token_result.map_err(store_err)?;
                match profile_result {
                    Ok(()) => Ok(Executed::Committed(PhaseSnapshot {
                        phase: target,
                        profile,
                    })),
                    Err(err) => {
                        warn!(error = %err, "token stored but profile write failed");
                        Ok(Executed::CommittedWithError(
                            PhaseSnapshot {
                                phase: target,
                                profile: None,
                            },
                            PhaseError::ProfileNotPersisted(err),
                        ))
                    }
                }
            }
            StoreAction::ClearCredentials => {
                let (token_result, profile_result) = tokio::join!(
                    self.store.remove(AUTH_TOKEN_KEY),
                    self.store.remove(USER_PROFILE_KEY),
                );

                match (token_result, profile_result) {
                    (Ok(()), Ok(())) => Ok(Executed::Committed(PhaseSnapshot {
                        phase: target,
                        profile: None,
                    })),
                    (token, profile) => Err(PhaseError::LogoutIncomplete {
                        token: token.err(),
                        profile: profile.err(),
                    }),
                }
            }
            StoreAction::ClearOnboarded => {
                self.store.remove(ONBOARDED_KEY).await.map_err(store_err)?;
                Ok(Executed::Committed(PhaseSnapshot {
                    phase: target,
                    profile: current.profile,
                }))
            }
            StoreAction::ClearAll => {
                self.store.remove_many(&ALL_KEYS).await.map_err(store_err)?;
                Ok(Executed::Committed(PhaseSnapshot {
                    phase: target,
                    profile: None,
                }))
            }
            StoreAction::PersistProfile { profile } => {
                let raw = profile.to_stored()?;
                self.store
                    .set(USER_PROFILE_KEY, &raw)
                    .await
                    .map_err(store_err)?;
                Ok(Executed::Committed(PhaseSnapshot {
                    phase: target,
                    profile: Some(profile),
                }))
            }
        }
    }

    async fn commit(&self, operation: &'static str, next: PhaseSnapshot) {
        let to = next.phase;
        let previous = self.context.replace(next).await;
        let from = previous.phase;
        info!(%from, %to, operation, "phase transition");
        if from != to {
            self.phase_events.emit_phase_changed(from, to).await;
        }
    }
}
