//! Credential form checks applied before the provider is called.

use thiserror::Error;

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("please fill in all fields")]
    MissingFields,

    #[error("passwords don't match")]
    PasswordMismatch,

    #[error("password should be at least {min_len} characters long")]
    PasswordTooShort { min_len: usize },
}

pub fn validate_sign_in(email: &str, password: &str) -> Result<(), CredentialsError> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(CredentialsError::MissingFields);
    }
    Ok(())
}

pub fn validate_sign_up(
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), CredentialsError> {
    if email.trim().is_empty() || password.trim().is_empty() || confirm_password.trim().is_empty()
    {
        return Err(CredentialsError::MissingFields);
    }
    if password != confirm_password {
        return Err(CredentialsError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CredentialsError::PasswordTooShort {
            min_len: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_requires_both_fields() {
        assert_eq!(
            validate_sign_in("", "secret"),
            Err(CredentialsError::MissingFields)
        );
        assert_eq!(
            validate_sign_in("a@b.com", "   "),
            Err(CredentialsError::MissingFields)
        );
        assert!(validate_sign_in("a@b.com", "x").is_ok());
    }

    #[test]
    fn sign_up_checks_in_order() {
        assert_eq!(
            validate_sign_up("a@b.com", "secret1", ""),
            Err(CredentialsError::MissingFields)
        );
        assert_eq!(
            validate_sign_up("a@b.com", "abc", "abd"),
            Err(CredentialsError::PasswordMismatch)
        );
        assert_eq!(
            validate_sign_up("a@b.com", "abc", "abc"),
            Err(CredentialsError::PasswordTooShort { min_len: 6 })
        );
        assert!(validate_sign_up("a@b.com", "abcdef", "abcdef").is_ok());
    }
}
