//! Persisted shell state.
//!
//! Three independent keys hold everything the shell remembers across
//! restarts. [`PersistedState::phase`] is the single place where the phase
//! invariants are computed from them.

use crate::auth::AuthToken;
use crate::phase::{AppPhase, AuthView};
use crate::profile::{Profile, ProfileParseError};

/// Storage key for the onboarding flag.
pub const ONBOARDED_KEY: &str = "onboarded";
/// Storage key for the credential token.
pub const AUTH_TOKEN_KEY: &str = "userToken";
/// Storage key for the serialized profile.
pub const USER_PROFILE_KEY: &str = "userData";

/// Every key owned by the phase controller.
pub const ALL_KEYS: [&str; 3] = [ONBOARDED_KEY, AUTH_TOKEN_KEY, USER_PROFILE_KEY];

/// Stored value of a set onboarding flag.
pub const ONBOARDED_VALUE: &str = "true";

/// Snapshot of the persisted flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub onboarded: bool,
    pub auth_token: Option<AuthToken>,
    pub user_profile: Option<Profile>,
}

impl PersistedState {
    /// Build state from raw stored values.
    ///
    /// Only the exact value `"true"` counts as onboarded. An empty token is
    /// treated as absent. A profile that fails to parse is an error; callers
    /// decide how to recover.
    pub fn from_stored(
        onboarded: Option<String>,
        auth_token: Option<String>,
        user_profile: Option<String>,
    ) -> Result<Self, ProfileParseError> {
        let onboarded = match onboarded.as_deref() {
            Some(ONBOARDED_VALUE) => true,
            None => false,
            Some(_other) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(value = _other, "unexpected onboarded value, treating as unset");
                false
            }
        };

        let user_profile = user_profile
            .as_deref()
            .map(Profile::parse)
            .transpose()?;

        Ok(Self {
            onboarded,
            auth_token: auth_token.and_then(AuthToken::new),
            user_profile,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Phase dictated by the persisted flags.
    ///
    /// The onboarding flag is checked first: a token without it is
    /// contradictory state and resolves to the earliest phase.
    pub fn phase(&self) -> AppPhase {
        match (self.onboarded, self.is_authenticated()) {
            (false, _) => AppPhase::Onboarding,
            (true, false) => AppPhase::Auth(AuthView::SignIn),
            (true, true) => AppPhase::Home,
        }
    }
}
