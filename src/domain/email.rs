//! Email value object.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, AppResult};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9_-]+\.[a-zA-Z0-9_.-]+$").expect("valid email regex")
});

/// Validated, normalized (trimmed, lower-cased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create an email after validating it against `local@domain.tld`.
    ///
    /// # Errors
    /// Returns `InvalidEmail` if the address does not match.
    pub fn new(value: impl AsRef<str>) -> AppResult<Self> {
        let candidate = value.as_ref().trim();
        if !EMAIL_PATTERN.is_match(candidate) {
            return Err(AppError::invalid_email(format!(
                "Invalid email address {}",
                value.as_ref()
            )));
        }
        Ok(Self(candidate.to_lowercase()))
    }

    /// Returns the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for value in [
            "a@b.com",
            "john.doe+tag@example.co.uk",
            "under_score-dash@sub-domain.io",
            "123@numbers.org",
            "a@b_c.com",
        ] {
            assert!(Email::new(value).is_ok(), "{value} should be accepted");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for value in ["invalid", "@", "@.com", "bla.com", "a@b", "a b@c.com", "a@b!c.com", ""] {
            assert!(
                matches!(Email::new(value), Err(AppError::InvalidEmail(_))),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_normalized_value() {
        let email = Email::new("  John.Doe@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "john.doe@example.com");
        assert_eq!(email, Email::new("john.doe@example.com").unwrap());
    }
}
