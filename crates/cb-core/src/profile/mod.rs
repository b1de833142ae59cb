//! User profile domain model.
//!
//! The profile is stored as one serialized JSON record and is always replaced
//! wholesale. Reads go through [`Profile::parse`], which rejects malformed or
//! invalid records so the caller can treat them as absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the account was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupMethod {
    Email,
    Google,
    Apple,
    Facebook,
    /// Any method this build does not know about.
    #[serde(other)]
    Other,
}

impl SignupMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignupMethod::Email => "email",
            SignupMethod::Google => "google",
            SignupMethod::Apple => "apple",
            SignupMethod::Facebook => "facebook",
            SignupMethod::Other => "other",
        }
    }
}

impl std::str::FromStr for SignupMethod {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(SignupMethod::Email),
            "google" => Ok(SignupMethod::Google),
            "apple" => Ok(SignupMethod::Apple),
            "facebook" => Ok(SignupMethod::Facebook),
            other => Err(ProfileParseError::Invalid(format!(
                "unknown signup method `{other}`"
            ))),
        }
    }
}

/// Profile parsing errors. Recovered locally as "no profile".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileParseError {
    #[error("profile is not well-formed JSON: {0}")]
    Malformed(String),

    #[error("profile is invalid: {0}")]
    Invalid(String),

    #[error("profile could not be encoded: {0}")]
    Encode(String),
}

/// User profile record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signup_method: Option<SignupMethod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    /// Parse and validate a stored profile record.
    pub fn parse(raw: &str) -> Result<Self, ProfileParseError> {
        let profile: Profile = serde_json::from_str(raw)
            .map_err(|e| ProfileParseError::Malformed(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Serialize the full record for storage.
    ///
    /// Applies the same checks as [`Profile::parse`], so every record that
    /// can be written can also be read back.
    pub fn to_stored(&self) -> Result<String, ProfileParseError> {
        self.validate()?;
        serde_json::to_string(self).map_err(|e| ProfileParseError::Encode(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ProfileParseError> {
        if let Some(email) = &self.email {
            if email.trim().is_empty() {
                return Err(ProfileParseError::Invalid("email is empty".into()));
            }
        }
        if let Some(id) = &self.id {
            if id.trim().is_empty() {
                return Err(ProfileParseError::Invalid("id is empty".into()));
            }
        }
        Ok(())
    }
}
