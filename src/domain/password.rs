//! Password value objects and the hashing capability.
//!
//! Raw and hashed passwords are distinct types, so a hasher can only be fed
//! plaintext and only ever produces a hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Raw password as typed by the user. Never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct PlaintextPassword(String);

// Don't expose secrets in debug output
impl std::fmt::Debug for PlaintextPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PlaintextPassword").field(&"[REDACTED]").finish()
    }
}

impl PlaintextPassword {
    /// Create a plaintext password, enforcing the length bounds.
    ///
    /// # Errors
    /// Returns `InvalidPassword` unless the length (in characters) is
    /// between 8 and 100 inclusive.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let length = value.chars().count();
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
            return Err(AppError::invalid_password(format!(
                "Password size must be between {} and {} characters",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            )));
        }
        Ok(Self(value))
    }

    /// Get the raw password for hashing/verification.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One-way password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl std::fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl HashedPassword {
    /// Wrap an existing hash (from the hasher or from storage).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<HashedPassword> for String {
    fn from(password: HashedPassword) -> Self {
        password.0
    }
}

/// Password hashing capability.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait Hasher: Send + Sync {
    /// Hash a plaintext password with a fresh salt.
    fn hash(&self, plaintext: &PlaintextPassword) -> AppResult<HashedPassword>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, plaintext: &PlaintextPassword, hashed: &HashedPassword) -> bool;
}

/// Argon2id hasher with the crate's default cost parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl Hasher for Argon2Hasher {
    fn hash(&self, plaintext: &PlaintextPassword) -> AppResult<HashedPassword> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plaintext.as_str().as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(HashedPassword(hash.to_string()))
    }

    fn verify(&self, plaintext: &PlaintextPassword, hashed: &HashedPassword) -> bool {
        match PasswordHash::new(hashed.as_str()) {
            Ok(parsed) => Self::argon2()
                .verify_password(plaintext.as_str().as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        for length in 8..=100 {
            assert!(PlaintextPassword::new("p".repeat(length)).is_ok(), "length {length}");
        }
        for length in [0, 1, 7, 101, 150] {
            assert!(
                matches!(
                    PlaintextPassword::new("p".repeat(length)),
                    Err(AppError::InvalidPassword(_))
                ),
                "length {length}"
            );
        }
    }

    #[test]
    fn test_length_counts_characters() {
        // 8 characters, 16 bytes
        assert!(PlaintextPassword::new("éééééééé").is_ok());
        // 100 characters, 200 bytes
        assert!(PlaintextPassword::new("é".repeat(100)).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::new();
        let plain = PlaintextPassword::new("SecurePassword123!").unwrap();
        let hashed = hasher.hash(&plain).unwrap();

        assert_ne!(hashed.as_str(), plain.as_str());
        assert!(hasher.verify(&plain, &hashed));
        assert!(!hasher.verify(&PlaintextPassword::new("WrongPassword123").unwrap(), &hashed));
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = Argon2Hasher::new();
        let plain = PlaintextPassword::new("SamePassword123").unwrap();
        let first = hasher.hash(&plain).unwrap();
        let second = hasher.hash(&plain).unwrap();

        // Different salts produce different hashes
        assert_ne!(first, second);
        assert!(hasher.verify(&plain, &first));
        assert!(hasher.verify(&plain, &second));
    }

    #[test]
    fn test_restored_hash_verifies() {
        let hasher = Argon2Hasher::new();
        let plain = PlaintextPassword::new("TestPassword123").unwrap();
        let stored = hasher.hash(&plain).unwrap().into_string();

        assert!(hasher.verify(&plain, &HashedPassword::from_hash(stored)));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let hasher = Argon2Hasher::new();
        let plain = PlaintextPassword::new("TestPassword123").unwrap();
        assert!(!hasher.verify(&plain, &HashedPassword::from_hash("not-a-phc-string")));
    }

    #[test]
    fn test_debug_is_redacted() {
        let plain = PlaintextPassword::new("hunter2hunter2").unwrap();
        assert!(!format!("{:?}", plain).contains("hunter2"));
        let hashed = HashedPassword::from_hash("$argon2id$secret");
        assert!(!format!("{:?}", hashed).contains("secret"));
    }
}
