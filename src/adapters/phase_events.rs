use async_trait::async_trait;
use tracing::info;

use cb_core::ports::PhaseEventPort;
use cb_core::AppPhase;

/// Headless stand-in for the renderer: records screen switches in the log.
pub struct TracingPhaseEventEmitter;

#[async_trait]
impl PhaseEventPort for TracingPhaseEventEmitter {
    async fn emit_phase_changed(&self, from: AppPhase, to: AppPhase) {
        info!(
            %from,
            %to,
            screen = to.screen_name(),
            "screen changed"
        );
    }
}
