//! Access token issuing and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{Config, MAX_JWT_EXPIRE_MINUTES, SUBJECT_PREFIX, TOKEN_TYPE_BEARER};
use crate::domain::Identifier;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "bearer")
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Expiry as seconds since the Unix epoch
    #[schema(example = 1735689600)]
    pub expire: i64,
}

/// Token signing capability.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenProvider: Send + Sync {
    /// Sign a token for `subject` that expires after the configured TTL.
    fn create_access_token(&self, subject: &str) -> AppResult<TokenResponse>;

    /// Verify signature and expiry, returning the subject claim.
    fn get_subject(&self, token: &str) -> AppResult<String>;
}

/// HMAC-signed JWT provider.
pub struct JwtProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl JwtProvider {
    /// `ttl_minutes` is clamped to `1..=MAX_JWT_EXPIRE_MINUTES`.
    pub fn new(secret: &[u8], algorithm: Algorithm, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            ttl: Duration::minutes(ttl_minutes.clamp(1, MAX_JWT_EXPIRE_MINUTES)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jwt_secret_bytes(),
            config.jwt_algorithm,
            config.jwt_expire_minutes,
        )
    }

    fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> AppResult<TokenResponse> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::internal("Token expiry out of range"))?;
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expire: claims.exp,
        })
    }
}

impl TokenProvider for JwtProvider {
    fn create_access_token(&self, subject: &str) -> AppResult<TokenResponse> {
        self.issue_at(subject, Utc::now())
    }

    fn get_subject(&self, token: &str) -> AppResult<String> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            AppError::InvalidToken
        })?;

        Ok(data.claims.sub)
    }
}

/// Token subject for a user: `user_id:<id>`.
pub fn subject_for(id: &Identifier) -> String {
    format!("{}{}", SUBJECT_PREFIX, id)
}

/// Recover the user identifier from a token subject.
pub fn parse_subject(subject: &str) -> AppResult<Identifier> {
    subject
        .strip_prefix(SUBJECT_PREFIX)
        .and_then(|raw| Identifier::parse(raw).ok())
        .ok_or(AppError::InvalidToken)
}
