//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! Value objects validate on construction; once built they cannot be invalid.

pub mod email;
pub mod identifier;
pub mod password;
pub mod user;

pub use email::Email;
pub use identifier::Identifier;
pub use password::{Argon2Hasher, HashedPassword, Hasher, PlaintextPassword};
pub use user::{User, UserChanges, UserResponse};

#[cfg(any(test, feature = "test-utils"))]
pub use password::MockHasher;
