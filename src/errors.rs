//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::WWW_AUTHENTICATE_BEARER;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Value objects & entity validation
    #[error("{0}")]
    InvalidIdentifier(String),

    #[error("{0}")]
    InvalidEmail(String),

    #[error("{0}")]
    InvalidPassword(String),

    #[error("{0}")]
    InvalidUser(String),

    #[error("{0}")]
    Validation(String),

    // Resource errors
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    // Authentication
    #[error("Incorrect username or password")]
    AuthenticationFailed,

    #[error("Invalid token")]
    InvalidToken,

    // External service errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            AppError::InvalidEmail(_) => "INVALID_EMAIL",
            AppError::InvalidPassword(_) => "INVALID_PASSWORD",
            AppError::InvalidUser(_) => "INVALID_USER",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::UserAlreadyExists => "USER_ALREADY_EXISTS",
            AppError::AuthenticationFailed => "AUTHENTICATION_FAILED",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidEmail(_)
            | AppError::InvalidPassword(_)
            | AppError::InvalidUser(_)
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidIdentifier(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::UserAlreadyExists => StatusCode::CONFLICT,
            AppError::AuthenticationFailed | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static(WWW_AUTHENTICATE_BEARER),
            );
        }
        response
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn invalid_identifier(msg: impl Into<String>) -> Self {
        AppError::InvalidIdentifier(msg.into())
    }

    pub fn invalid_email(msg: impl Into<String>) -> Self {
        AppError::InvalidEmail(msg.into())
    }

    pub fn invalid_password(msg: impl Into<String>) -> Self {
        AppError::InvalidPassword(msg.into())
    }

    pub fn invalid_user(msg: impl Into<String>) -> Self {
        AppError::InvalidUser(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::invalid_user("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::invalid_email("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::invalid_identifier("x").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::UserAlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::AuthenticationFailed.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_carries_bearer_challenge() {
        let response = AppError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(WWW_AUTHENTICATE).unwrap(),
            WWW_AUTHENTICATE_BEARER
        );

        let response = AppError::UserNotFound.into_response();
        assert!(response.headers().get(WWW_AUTHENTICATE).is_none());
    }

    #[test]
    fn test_authentication_messages_do_not_leak_detail() {
        assert_eq!(
            AppError::AuthenticationFailed.to_string(),
            "Incorrect username or password"
        );
        assert_eq!(AppError::InvalidToken.to_string(), "Invalid token");
    }
}
