//! Identifier value object - 128-bit unique user identifier.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Immutable, randomly generated identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier(Uuid);

impl Identifier {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its textual form.
    ///
    /// # Errors
    /// Returns `InvalidIdentifier` when `value` is not UUID-shaped text.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| AppError::invalid_identifier(format!("Invalid user ID: {}", value)))
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for Identifier {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for Identifier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(Identifier::generate(), Identifier::generate());
    }

    #[test]
    fn test_round_trip_through_text() {
        let id = Identifier::generate();
        let parsed = Identifier::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_canonical_form_is_lowercase_hyphenated() {
        let id = Identifier::parse("550E8400-E29B-41D4-A716-446655440000").unwrap();
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn test_invalid_text_rejected() {
        for value in ["", "not-a-uuid", "550e8400-e29b-41d4-a716", "user_id:abc"] {
            assert!(
                matches!(Identifier::parse(value), Err(AppError::InvalidIdentifier(_))),
                "{value:?} should be rejected"
            );
        }
    }
}
