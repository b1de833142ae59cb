//! # Application Dependencies
//!
//! Dependency grouping for [`crate::App`] construction. Not a builder: no
//! defaults, no hidden logic, just parameter grouping.

use std::sync::Arc;
use std::time::Duration;

use cb_core::ports::{CredentialProviderPort, KeyValueStorePort, PhaseEventPort};

/// Application dependency grouping.
///
/// All dependencies are required.
pub struct AppDeps {
    // Storage dependencies
    pub store: Arc<dyn KeyValueStorePort>,

    // Auth dependencies
    pub credentials: Arc<dyn CredentialProviderPort>,

    // UI dependencies
    pub phase_events: Arc<dyn PhaseEventPort>,

    // Timing
    pub splash_duration: Duration,
}
