use crate::phase::AppPhase;

/// Receives every committed phase change, e.g. to remount the screen.
#[async_trait::async_trait]
pub trait PhaseEventPort: Send + Sync {
    async fn emit_phase_changed(&self, from: AppPhase, to: AppPhase);
}
