//! Client-side validation rules for the user creation form.
//!
//! Each rule is a plain function over the raw input so the same check runs on
//! blur and as the gate before submission.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex_lite::Regex;
use thiserror::Error;

use crate::roles::PortalRole;

/// Minimum number of characters for a new password.
pub const MIN_PASSWORD_LEN: usize = 8;

#[expect(clippy::unwrap_used, reason = "pattern is a compile-time constant")]
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap());

/// A field-level validation failure. `Display` is the message shown inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email address")]
    EmailInvalid,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,
    #[error("Please confirm your password")]
    ConfirmPasswordRequired,
    #[error("The passwords do not match")]
    PasswordMismatch,
    #[error("At least one role is required")]
    RolesRequired,
}

/// Returns true when `email` matches the accepted address pattern.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

/// Length is counted in characters, not bytes.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_confirm_password(confirm: &str, password: &str) -> Result<(), ValidationError> {
    if confirm.is_empty() {
        return Err(ValidationError::ConfirmPasswordRequired);
    }
    if confirm != password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

pub fn validate_roles(roles: &BTreeSet<PortalRole>) -> Result<(), ValidationError> {
    if roles.is_empty() {
        return Err(ValidationError::RolesRequired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_required() {
        assert_eq!(validate_email(""), Err(ValidationError::EmailRequired));
    }

    #[test]
    fn test_email_pattern() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("First.Last+tag@Sub.Example.ORG").is_ok());

        for bad in ["plainaddress", "a@b", "a@b.c", "@b.com", "a b@c.com", "a@b.com "] {
            assert_eq!(
                validate_email(bad),
                Err(ValidationError::EmailInvalid),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_password_length() {
        assert_eq!(validate_password(""), Err(ValidationError::PasswordRequired));
        assert_eq!(
            validate_password("short12"),
            Err(ValidationError::PasswordTooShort)
        );
        assert!(validate_password("longenough1").is_ok());
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn test_password_length_counts_characters() {
        // Eight characters, more than eight bytes.
        assert!(validate_password("пароль12").is_ok());
    }

    #[test]
    fn test_confirm_password() {
        assert_eq!(
            validate_confirm_password("", "longenough1"),
            Err(ValidationError::ConfirmPasswordRequired)
        );
        assert_eq!(
            validate_confirm_password("longenough2", "longenough1"),
            Err(ValidationError::PasswordMismatch)
        );
        assert!(validate_confirm_password("longenough1", "longenough1").is_ok());
    }

    #[test]
    fn test_roles_required() {
        let mut roles = BTreeSet::new();
        assert_eq!(validate_roles(&roles), Err(ValidationError::RolesRequired));
        roles.insert(PortalRole::PortalUser);
        assert!(validate_roles(&roles).is_ok());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "The passwords do not match"
        );
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 8 characters"
        );
    }
}
