//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, user_handler};
use crate::domain::UserResponse;
use crate::services::TokenResponse;

/// OpenAPI documentation for the User Auth API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Auth API",
        version = "0.1.0",
        description = "User management and token authentication backend"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        auth_handler::token,
        auth_handler::me,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            UserResponse,
            TokenResponse,
            auth_handler::TokenRequest,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Token issuing and current user"),
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for bearer token authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token obtained from /api/v1/auth/token"))
                        .build(),
                ),
            );
        }
    }
}
