//! Offline credential provider.
//!
//! Accepts any well-formed credentials after an optional simulated latency
//! and mints a local token. There is no account server behind it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use cb_core::ports::{ClockPort, CredentialProviderPort};
use cb_core::{AuthError, AuthGrant, AuthToken, Credentials, Profile, SignupMethod};

/// Token handed out to guests.
pub const GUEST_TOKEN: &str = "guest_token";

pub struct LocalCredentialProvider {
    clock: Arc<dyn ClockPort>,
    latency: Duration,
}

impl LocalCredentialProvider {
    pub fn new(clock: Arc<dyn ClockPort>, latency: Duration) -> Self {
        Self { clock, latency }
    }

    fn token(value: String) -> Result<AuthToken, AuthError> {
        AuthToken::new(value).ok_or_else(|| AuthError::Rejected("empty token".into()))
    }

    fn new_profile(&self, email: String, method: SignupMethod, now_ms: i64) -> Profile {
        Profile {
            id: Some(Uuid::new_v4().to_string()),
            email: Some(email),
            display_name: None,
            signup_method: Some(method),
            join_date: DateTime::<Utc>::from_timestamp_millis(now_ms),
        }
    }
}

#[async_trait]
impl CredentialProviderPort for LocalCredentialProvider {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthGrant, AuthError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let now_ms = self.clock.now_ms();
        let grant = match credentials {
            Credentials::Password { email, password } => {
                if email.trim().is_empty() || password.is_empty() {
                    return Err(AuthError::Rejected("email and password are required".into()));
                }
                AuthGrant {
                    token: Self::token(format!("token_{}_{now_ms}", email.trim()))?,
                    profile: None,
                }
            }
            Credentials::Registration { email, password } => {
                if email.trim().is_empty() || password.is_empty() {
                    return Err(AuthError::Rejected("email and password are required".into()));
                }
                AuthGrant {
                    token: Self::token(format!("signup_token_{now_ms}"))?,
                    profile: Some(self.new_profile(
                        email.trim().to_string(),
                        SignupMethod::Email,
                        now_ms,
                    )),
                }
            }
            Credentials::Social { provider } => {
                if matches!(provider, SignupMethod::Email | SignupMethod::Other) {
                    return Err(AuthError::Rejected(format!(
                        "`{}` is not a social provider",
                        provider.as_str()
                    )));
                }
                AuthGrant {
                    token: Self::token(format!("signup_token_{now_ms}"))?,
                    profile: Some(self.new_profile(
                        format!("user@{}.com", provider.as_str()),
                        *provider,
                        now_ms,
                    )),
                }
            }
            Credentials::Guest => AuthGrant {
                token: Self::token(GUEST_TOKEN.to_string())?,
                profile: None,
            },
        };

        debug!(kind = credentials.kind(), "local credentials accepted");
        Ok(grant)
    }
}
