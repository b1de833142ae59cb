use std::sync::Arc;

use tracing::{info_span, Instrument};

use cb_core::auth::validate_sign_in;
use cb_core::ports::CredentialProviderPort;
use cb_core::{AppPhase, Credentials};

use super::{authenticate_with, AuthFlowError};
use crate::usecases::PhaseController;

/// Sign in with an existing account, or continue as guest.
pub struct SignIn {
    provider: Arc<dyn CredentialProviderPort>,
    controller: Arc<PhaseController>,
}

impl SignIn {
    pub fn new(provider: Arc<dyn CredentialProviderPort>, controller: Arc<PhaseController>) -> Self {
        Self {
            provider,
            controller,
        }
    }

    pub async fn with_password(&self, email: &str, password: &str) -> Result<AppPhase, AuthFlowError> {
        validate_sign_in(email, password)?;
        let credentials = Credentials::Password {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        authenticate_with(self.provider.as_ref(), &self.controller, credentials)
            .instrument(info_span!("usecase.sign_in.with_password"))
            .await
    }

    /// Guest mode: authenticated without a profile.
    pub async fn as_guest(&self) -> Result<AppPhase, AuthFlowError> {
        authenticate_with(self.provider.as_ref(), &self.controller, Credentials::Guest)
            .instrument(info_span!("usecase.sign_in.as_guest"))
            .await
    }
}
