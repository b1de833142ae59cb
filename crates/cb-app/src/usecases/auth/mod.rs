//! Authentication use cases
//!
//! Each use case validates the submitted form, asks the credential provider
//! for a grant, and hands the grant to [`PhaseController::authenticate`].
//! Provider failures are surfaced unchanged and never retried.

mod sign_in;
mod sign_up;

pub use sign_in::SignIn;
pub use sign_up::SignUp;

use cb_core::ports::CredentialProviderPort;
use cb_core::{AppPhase, AuthError, Credentials, CredentialsError};
use tracing::{info, warn};

use crate::usecases::phase::{PhaseController, PhaseError};

#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    #[error(transparent)]
    InvalidCredentials(#[from] CredentialsError),

    #[error(transparent)]
    Provider(#[from] AuthError),

    #[error(transparent)]
    Phase(#[from] PhaseError),
}

/// Shared tail of every auth flow: precondition, provider call, commit.
async fn authenticate_with(
    provider: &dyn CredentialProviderPort,
    controller: &PhaseController,
    credentials: Credentials,
) -> Result<AppPhase, AuthFlowError> {
    let from = controller.phase().await;
    if !from.is_auth() {
        return Err(PhaseError::InvalidTransition {
            from,
            operation: "authenticate",
        }
        .into());
    }

    let kind = credentials.kind();
    let grant = provider.authenticate(&credentials).await.map_err(|err| {
        warn!(kind, error = %err, "credential provider refused");
        err
    })?;
    info!(kind, has_profile = grant.profile.is_some(), "credentials granted");

    Ok(controller.authenticate(grant.token, grant.profile).await?)
}
