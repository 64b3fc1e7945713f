//! Bearer token authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::UserResponse;
use crate::errors::AppError;

/// Authenticated user resolved from the bearer token
#[derive(Clone, Debug)]
pub struct CurrentUser(pub UserResponse);

/// Resolves `Authorization: Bearer <token>` into a [`CurrentUser`] request
/// extension. Any failure is reported as `InvalidToken`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::InvalidToken)?
        .to_string();

    let user = state.auth_service.current_user(&token).await?;
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
