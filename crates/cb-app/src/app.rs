use std::sync::Arc;

use crate::deps::AppDeps;
use crate::usecases::{LaunchApp, PhaseController, SignIn, SignUp};

/// Wired application: one shared controller plus the use cases on top of it.
pub struct App {
    pub controller: Arc<PhaseController>,
    pub launch: LaunchApp,
    pub sign_in: SignIn,
    pub sign_up: SignUp,
}

impl App {
    pub fn new(deps: AppDeps) -> Self {
        let AppDeps {
            store,
            credentials,
            phase_events,
            splash_duration,
        } = deps;

        let controller = Arc::new(PhaseController::new(store, phase_events));

        Self {
            launch: LaunchApp::new(controller.clone(), splash_duration),
            sign_in: SignIn::new(credentials.clone(), controller.clone()),
            sign_up: SignUp::new(credentials, controller.clone()),
            controller,
        }
    }
}
