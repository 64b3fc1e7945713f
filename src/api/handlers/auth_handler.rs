//! Authentication handlers.

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedForm;
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::config::MAX_FIELD_LENGTH;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// Password-grant token request (`application/x-www-form-urlencoded`)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    /// User email address
    #[validate(length(max = MAX_FIELD_LENGTH, message = "Username is too long"))]
    #[schema(example = "user@example.com")]
    pub username: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
    /// Ignored; accepted for OAuth2 password-flow clients
    #[serde(default)]
    pub grant_type: Option<String>,
    /// Ignored; accepted for OAuth2 password-flow clients
    #[serde(default)]
    pub scope: Option<String>,
}

/// Create authentication routes
pub fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/token", post(token))
        .route(
            "/me",
            get(me).route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/token",
    tag = "Authentication",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Incorrect username or password")
    )
)]
pub async fn token(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.auth_service.login(form.username, form.password).await?;
    Ok(Json(token))
}

/// Get the user the bearer token belongs to
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(user)
}
