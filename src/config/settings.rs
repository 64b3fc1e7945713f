//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

use super::constants::{
    DEFAULT_JWT_ALGORITHM, DEFAULT_JWT_EXPIRE_MINUTES, DEFAULT_LOG_LEVEL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEV_JWT_SECRET, MAX_JWT_EXPIRE_MINUTES, SUPPORTED_JWT_ALGORITHMS,
};
use crate::errors::{AppError, AppResult};

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Test,
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(AppError::validation(format!(
                "APP_ENV must be one of test, dev, prod (got '{}')",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Test => write!(f, "test"),
            Environment::Dev => write!(f, "dev"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

/// Application configuration.
///
/// Built once at start-up and handed to every component that needs it.
#[derive(Clone)]
pub struct Config {
    pub environment: Environment,
    pub log_level: String,
    pub database_url: String,
    jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub jwt_expire_minutes: i64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("log_level", &self.log_level)
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("jwt_expire_minutes", &self.jwt_expire_minutes)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV") {
            Some(value) => value.parse()?,
            None => Environment::Dev,
        };

        let database_url = lookup("DATABASE_URL").unwrap_or_default();
        if database_url.trim().is_empty() {
            return Err(AppError::validation("DATABASE_URL cannot be empty"));
        }

        let jwt_secret = match lookup("JWT_SECRET_KEY").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if environment == Environment::Prod => {
                return Err(AppError::validation(
                    "JWT_SECRET_KEY must be set in production",
                ));
            }
            None => {
                tracing::warn!("JWT_SECRET_KEY not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
        };

        let algorithm_name =
            lookup("JWT_ALGORITHM").unwrap_or_else(|| DEFAULT_JWT_ALGORITHM.to_string());
        let jwt_algorithm = parse_algorithm(&algorithm_name)?;

        let jwt_expire_minutes = match lookup("JWT_ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(value) => value
                .parse::<i64>()
                .ok()
                .filter(|minutes| (1..=MAX_JWT_EXPIRE_MINUTES).contains(minutes))
                .ok_or_else(|| {
                    AppError::validation(format!(
                        "JWT_ACCESS_TOKEN_EXPIRE_MINUTES must be an integer between 1 and {}",
                        MAX_JWT_EXPIRE_MINUTES
                    ))
                })?,
            None => DEFAULT_JWT_EXPIRE_MINUTES,
        };

        let server_port = match lookup("SERVER_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| AppError::validation("SERVER_PORT must be a valid port number"))?,
            None => DEFAULT_SERVER_PORT,
        };

        Ok(Self {
            environment,
            log_level: lookup("LOG_LEVEL")
                .map(|level| level.to_ascii_lowercase())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            database_url,
            jwt_secret,
            jwt_algorithm,
            jwt_expire_minutes,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port,
        })
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Only the HMAC family is accepted: tokens are signed with one shared key.
fn parse_algorithm(name: &str) -> AppResult<Algorithm> {
    let upper = name.to_ascii_uppercase();
    if !SUPPORTED_JWT_ALGORITHMS.contains(&upper.as_str()) {
        return Err(AppError::validation(format!(
            "JWT_ALGORITHM must be one of {} (got '{}')",
            SUPPORTED_JWT_ALGORITHMS.join(", "),
            name
        )));
    }
    Algorithm::from_str(&upper)
        .map_err(|e| AppError::validation(format!("JWT_ALGORITHM is invalid: {}", e)))
}
