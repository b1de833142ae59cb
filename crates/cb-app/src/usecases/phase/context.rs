use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use cb_core::{AppPhase, Profile};

/// What the shell currently shows, plus the profile it shows it for.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhaseSnapshot {
    pub phase: AppPhase,
    pub profile: Option<Profile>,
}

/// Shared phase context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: held for a whole transition, storage I/O included.
/// - `state`: held only while reading or replacing the snapshot.
#[derive(Clone)]
pub struct PhaseContext {
    state: Arc<Mutex<PhaseSnapshot>>,
    dispatch_lock: Arc<Mutex<()>>,
}

impl PhaseContext {
    pub fn new(initial: PhaseSnapshot) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Context starting in `Splash` with no profile.
    pub fn splash() -> Self {
        Self::new(PhaseSnapshot::default())
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Does NOT acquire `dispatch_lock`.
    pub async fn snapshot(&self) -> PhaseSnapshot {
        self.state.lock().await.clone()
    }

    pub async fn phase(&self) -> AppPhase {
        self.state.lock().await.phase
    }

    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Replace the snapshot, returning the previous one.
    ///
    /// This should only be called after acquiring `dispatch_lock`.
    pub(crate) async fn replace(&self, next: PhaseSnapshot) -> PhaseSnapshot {
        let mut guard = self.state.lock().await;
        std::mem::replace(&mut *guard, next)
    }
}
