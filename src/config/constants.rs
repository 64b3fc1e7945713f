//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default access token lifetime in minutes
pub const DEFAULT_JWT_EXPIRE_MINUTES: i64 = 30;

/// Default JWT signing algorithm
pub const DEFAULT_JWT_ALGORITHM: &str = "HS256";

/// Signing algorithms accepted for the symmetric token signer
pub const SUPPORTED_JWT_ALGORITHMS: &[&str] = &["HS256", "HS384", "HS512"];

/// Insecure signing key used outside production when none is configured
pub const DEV_JWT_SECRET: &str = "unsafe-development-secret-change-me";

/// Longest accepted access token lifetime in minutes (one year)
pub const MAX_JWT_EXPIRE_MINUTES: i64 = 525_600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Token type reported to clients
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Prefix of the token subject claim, followed by the user identifier
pub const SUBJECT_PREFIX: &str = "user_id:";

/// Value of the `WWW-Authenticate` header on 401 responses
pub const WWW_AUTHENTICATE_BEARER: &str = "Bearer";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Versioned API prefix
pub const API_V1_PREFIX: &str = "/api/v1";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length requirement
pub const MAX_PASSWORD_LENGTH: usize = 100;

/// Maximum length accepted for names and emails (matches the column width)
pub const MAX_FIELD_LENGTH: u64 = 255;
