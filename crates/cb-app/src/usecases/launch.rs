use std::sync::Arc;
use std::time::Duration;

use tracing::{info, info_span, Instrument};

use cb_core::AppPhase;

use crate::usecases::PhaseController;

/// Cold start: hold the splash phase while the persisted state loads.
///
/// The splash timer and the startup reads run concurrently. The resolved
/// phase is published only after both have finished, so the splash is never
/// cut short by a fast store and a slow store simply extends it.
pub struct LaunchApp {
    controller: Arc<PhaseController>,
    splash_duration: Duration,
}

impl LaunchApp {
    pub fn new(controller: Arc<PhaseController>, splash_duration: Duration) -> Self {
        Self {
            controller,
            splash_duration,
        }
    }

    pub async fn execute(&self) -> AppPhase {
        let span = info_span!(
            "usecase.launch_app.execute",
            splash_ms = self.splash_duration.as_millis() as u64
        );
        async {
            let (state, ()) = tokio::join!(
                self.controller.load_persisted_state(),
                tokio::time::sleep(self.splash_duration),
            );
            let phase = self.controller.enter_resolved_state(state).await;
            info!(%phase, "splash finished");
            phase
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use cb_core::persisted::{AUTH_TOKEN_KEY, ONBOARDED_KEY, ONBOARDED_VALUE};
    use cb_core::ports::{KeyValueStorePort, PhaseEventPort, StoreError};

    struct FixedStore(HashMap<String, String>);

    #[async_trait::async_trait]
    impl KeyValueStorePort for FixedStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.0.get(key).cloned())
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Ok(())
        }

        async fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingEvents(Mutex<Vec<AppPhase>>);

    #[async_trait::async_trait]
    impl PhaseEventPort for RecordingEvents {
        async fn emit_phase_changed(&self, _from: AppPhase, to: AppPhase) {
            self.0.lock().unwrap().push(to);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn phase_stays_splash_until_timer_elapses() {
        let values = HashMap::from([
            (ONBOARDED_KEY.to_string(), ONBOARDED_VALUE.to_string()),
            (AUTH_TOKEN_KEY.to_string(), "tok".to_string()),
        ]);
        let events = Arc::new(RecordingEvents::default());
        let controller = Arc::new(PhaseController::new(
            Arc::new(FixedStore(values)),
            events.clone(),
        ));
        let launch = LaunchApp::new(controller.clone(), Duration::from_millis(3600));

        let handle = tokio::spawn(async move { launch.execute().await });

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(controller.phase().await, AppPhase::Splash);

        let phase = handle.await.unwrap();
        assert_eq!(phase, AppPhase::Home);
        assert_eq!(controller.phase().await, AppPhase::Home);
        assert_eq!(*events.0.lock().unwrap(), vec![AppPhase::Home]);
    }

    #[tokio::test]
    async fn zero_duration_resolves_immediately() {
        let controller = Arc::new(PhaseController::new(
            Arc::new(FixedStore(HashMap::new())),
            Arc::new(RecordingEvents::default()),
        ));
        let launch = LaunchApp::new(controller, Duration::ZERO);

        assert_eq!(launch.execute().await, AppPhase::Onboarding);
    }
}
