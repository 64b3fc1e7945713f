//! Service Container - wires the use cases to their collaborators.
//!
//! Every capability (unit of work, hasher, token provider) is built once
//! here and injected into the services, never looked up from inside them.

use std::sync::Arc;

use super::{AuthService, Authenticator, JwtProvider, TokenProvider, UserManager, UserService};
use crate::config::Config;
use crate::domain::{Argon2Hasher, Hasher};
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    pub fn new(auth_service: Arc<dyn AuthService>, user_service: Arc<dyn UserService>) -> Self {
        Self {
            auth_service,
            user_service,
        }
    }

    /// Build the production services over a database connection.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let hasher: Arc<dyn Hasher> = Arc::new(Argon2Hasher::new());
        let tokens: Arc<dyn TokenProvider> = Arc::new(JwtProvider::from_config(config));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), hasher.clone(), tokens)),
            user_service: Arc::new(UserManager::new(uow, hasher)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}
