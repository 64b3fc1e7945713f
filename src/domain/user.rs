//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Email, HashedPassword, Identifier};
use crate::errors::{AppError, AppResult};

/// User domain entity.
///
/// Fields are private so a `User` can only exist with a non-blank name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Identifier,
    name: String,
    email: Email,
    password: HashedPassword,
}

impl User {
    /// Create a user from already-validated parts.
    ///
    /// # Errors
    /// Returns `InvalidUser` if the name is empty or whitespace-only.
    pub fn new(
        id: Identifier,
        name: impl Into<String>,
        email: Email,
        password: HashedPassword,
    ) -> AppResult<Self> {
        let name = name.into();
        Self::validate_name(&name)?;
        Ok(Self {
            id,
            name,
            email,
            password,
        })
    }

    /// Check the name invariant without building a user.
    pub fn validate_name(name: &str) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::invalid_user("Name cannot be empty"));
        }
        Ok(())
    }

    /// Build the updated user: provided fields replace stored ones and the
    /// password hash is always carried over.
    pub fn apply(&self, changes: &UserChanges) -> AppResult<Self> {
        Self::new(
            self.id,
            changes.name.clone().unwrap_or_else(|| self.name.clone()),
            changes.email.clone().unwrap_or_else(|| self.email.clone()),
            self.password.clone(),
        )
    }

    pub fn id(&self) -> Identifier {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &HashedPassword {
        &self.password
    }
}

/// Partial update of a user's name and/or email.
///
/// Empty strings count as "not provided".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    name: Option<String>,
    email: Option<Email>,
}

impl UserChanges {
    /// # Errors
    /// `Validation` when neither field is provided, `InvalidEmail` when the
    /// email is malformed.
    pub fn new(name: Option<String>, email: Option<String>) -> AppResult<Self> {
        let name = name.filter(|n| !n.is_empty());
        let email = email.filter(|e| !e.is_empty());

        if name.is_none() && email.is_none() {
            return Err(AppError::validation("At least one field must be provided"));
        }

        Ok(Self {
            name,
            email: email.map(Email::new).transpose()?,
        })
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: String,
    /// User display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email.into_inner(),
        }
    }
}
