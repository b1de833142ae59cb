//! Authentication domain models.
//!
//! Credentials are handed to the external credential provider, which answers
//! with an [`AuthGrant`] or an [`AuthError`]. The phase controller only ever
//! sees the granted token and optional profile.

pub mod validation;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::profile::{Profile, SignupMethod};

pub use validation::{validate_sign_in, validate_sign_up, CredentialsError, MIN_PASSWORD_LEN};

/// Opaque credential token. Presence of a stored token means "authenticated".
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Returns `None` for an empty or blank token.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(len={})", self.0.len())
    }
}

/// What the user submitted to the credential provider.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Existing account.
    Password { email: String, password: String },
    /// New account with email and password.
    Registration { email: String, password: String },
    /// New account through a third-party identity provider.
    Social { provider: SignupMethod },
    /// Continue without an account.
    Guest,
}

impl Credentials {
    pub fn kind(&self) -> &'static str {
        match self {
            Credentials::Password { .. } => "password",
            Credentials::Registration { .. } => "registration",
            Credentials::Social { .. } => "social",
            Credentials::Guest => "guest",
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Password { email, .. } => f
                .debug_struct("Password")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::Registration { email, .. } => f
                .debug_struct("Registration")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::Social { provider } => f
                .debug_struct("Social")
                .field("provider", provider)
                .finish(),
            Credentials::Guest => f.write_str("Guest"),
        }
    }
}

/// Successful answer from the credential provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: AuthToken,
    /// Absent in guest mode.
    pub profile: Option<Profile>,
}

/// Credential provider failures. Surfaced to the caller, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("credentials rejected: {0}")]
    Rejected(String),

    #[error("credential provider unavailable: {0}")]
    Unavailable(String),
}
