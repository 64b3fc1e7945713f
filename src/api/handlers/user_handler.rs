//! User management handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::MAX_FIELD_LENGTH;
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// User display name
    #[validate(length(max = MAX_FIELD_LENGTH, message = "Name is too long"))]
    #[schema(example = "John Doe")]
    pub name: String,
    /// User email address
    #[validate(length(max = MAX_FIELD_LENGTH, message = "Email is too long"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Password (8 to 100 characters)
    #[schema(example = "SecurePass123!", min_length = 8, max_length = 100)]
    pub password: String,
}

/// Partial update request; empty strings count as absent
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(length(max = MAX_FIELD_LENGTH, message = "Name is too long"))]
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    /// New email address
    #[validate(length(max = MAX_FIELD_LENGTH, message = "Email is too long"))]
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid user data"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .user_service
        .create_user(payload.name, payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 422, description = "Malformed user ID")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(&id).await?;
    Ok(Json(user))
}

/// Update user name and/or email
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Nothing to update or invalid email"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already taken"),
        (status = 422, description = "Malformed user ID")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update_user(&id, payload.name, payload.email)
        .await?;

    Ok(Json(user))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Malformed user ID")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if state.user_service.delete_user(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::UserNotFound)
    }
}
