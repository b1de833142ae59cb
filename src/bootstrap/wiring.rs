//! Dependency wiring: concrete adapters in, [`App`] out.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cb_app::{App, AppDeps};
use cb_core::AppConfig;
use cb_infra::{FileKeyValueStore, LocalCredentialProvider, SystemClock};

use crate::adapters::TracingPhaseEventEmitter;

pub const LOGS_DIR_NAME: &str = "logs";

pub fn logs_dir(config: &AppConfig) -> PathBuf {
    config.data_dir.join(LOGS_DIR_NAME)
}

/// Build the application over the file store under `config.data_dir`.
pub fn wire_app(config: &AppConfig) -> App {
    let store = Arc::new(FileKeyValueStore::with_defaults(config.data_dir.clone()));
    let credentials = Arc::new(LocalCredentialProvider::new(
        Arc::new(SystemClock),
        Duration::from_millis(config.auth_latency_ms),
    ));

    App::new(AppDeps {
        store,
        credentials,
        phase_events: Arc::new(TracingPhaseEventEmitter),
        splash_duration: Duration::from_millis(config.splash_duration_ms),
    })
}
