//! User service - create, read, update and delete use cases.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    Email, Hasher, Identifier, PlaintextPassword, User, UserChanges, UserResponse,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user.
    async fn create_user(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> AppResult<UserResponse>;

    /// Fetch a user by its textual identifier.
    async fn get_user(&self, id: &str) -> AppResult<UserResponse>;

    /// Change name and/or email; the password is never touched.
    async fn update_user(
        &self,
        id: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<UserResponse>;

    /// Remove a user. Returns `false` when there was no such user.
    async fn delete_user(&self, id: &str) -> AppResult<bool>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    hasher: Arc<dyn Hasher>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>, hasher: Arc<dyn Hasher>) -> Self {
        Self { uow, hasher }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> AppResult<UserResponse> {
        let email = Email::new(&email).map_err(|e| AppError::invalid_user(e.to_string()))?;
        let password =
            PlaintextPassword::new(password).map_err(|e| AppError::invalid_user(e.to_string()))?;
        User::validate_name(&name)?;

        let hasher = self.hasher.clone();
        let user = with_transaction!(self.uow, |ctx| {
            let users = ctx.users();
            if users.get_by_email(&email).await?.is_some() {
                tracing::warn!("Rejected registration for existing email {}", email);
                return Err(AppError::UserAlreadyExists);
            }

            let hashed = hasher.hash(&password)?;
            let user = User::new(Identifier::generate(), name, email, hashed)?;
            users.save(&user).await?;
            Ok(user)
        })?;

        tracing::info!("User created: {}", user.id());
        Ok(UserResponse::from(user))
    }

    async fn get_user(&self, id: &str) -> AppResult<UserResponse> {
        let id = Identifier::parse(id)?;
        self.uow
            .users()
            .get_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or(AppError::UserNotFound)
    }

    async fn update_user(
        &self,
        id: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<UserResponse> {
        let changes = UserChanges::new(name, email)?;
        let id = Identifier::parse(id)?;

        let user = with_transaction!(self.uow, |ctx| {
            let users = ctx.users();
            let existing = users.get_by_id(id).await?.ok_or(AppError::UserNotFound)?;
            let merged = existing.apply(&changes)?;
            users.update(&merged).await?.ok_or(AppError::UserNotFound)
        })?;

        tracing::info!("User updated: {}", user.id());
        Ok(UserResponse::from(user))
    }

    async fn delete_user(&self, id: &str) -> AppResult<bool> {
        let id = Identifier::parse(id)?;
        let deleted = self.uow.users().delete(id).await?;
        if deleted {
            tracing::info!("User deleted: {}", id);
        }
        Ok(deleted)
    }
}
