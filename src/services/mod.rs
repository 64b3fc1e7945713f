//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion; concrete collaborators are injected at
//! construction.

mod auth_service;
pub mod container;
pub mod token_provider;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use token_provider::{Claims, JwtProvider, TokenProvider, TokenResponse};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use token_provider::MockTokenProvider;
