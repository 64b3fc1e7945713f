//! User Auth API - user management and bearer-token authentication.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Value objects, the user entity and the hashing port
//! - **services**: Use cases and the token provider
//! - **infra**: Database, repositories and unit of work
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Email, Identifier, User};
pub use errors::{AppError, AppResult};
