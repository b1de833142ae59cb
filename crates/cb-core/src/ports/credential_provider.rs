use async_trait::async_trait;

use crate::auth::{AuthError, AuthGrant, Credentials};

/// External authentication backend.
#[async_trait]
pub trait CredentialProviderPort: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthGrant, AuthError>;
}
