//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AuthService, ServiceContainer, Services, UserService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection (health checks)
    pub database: Arc<Database>,
}

impl AppState {
    /// Build the production services on top of `database`.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_container(&container, database)
    }

    /// Take the services out of any container implementation.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self::new(container.auth(), container.users(), database)
    }

    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            database,
        }
    }
}
