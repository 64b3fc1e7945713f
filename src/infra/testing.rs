//! Test doubles for the persistence ports.

use async_trait::async_trait;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::repositories::UserRepository;
use super::unit_of_work::{TransactionContext, UnitOfWork};
use crate::domain::{Email, Identifier, User};
use crate::errors::{AppError, AppResult};

/// Unit of work that runs closures against a single shared repository and
/// records how each transaction ended.
pub struct TestUnitOfWork {
    users: Arc<dyn UserRepository>,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
}

impl TestUnitOfWork {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            commits: AtomicUsize::new(0),
            rollbacks: AtomicUsize::new(0),
        }
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> BoxFuture<'a, AppResult<T>> + Send,
        T: Send,
    {
        let outcome = f(TransactionContext::new(self.users.as_ref())).await;
        let counter = if outcome.is_ok() {
            &self.commits
        } else {
            &self.rollbacks
        };
        counter.fetch_add(1, Ordering::SeqCst);
        outcome
    }
}

/// HashMap-backed repository enforcing unique emails.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<Identifier, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<Identifier, User>>> {
        self.users
            .lock()
            .map_err(|_| AppError::internal("in-memory user store poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> AppResult<()> {
        let mut users = self.lock()?;
        if users.values().any(|u| u.email() == user.email()) {
            return Err(AppError::UserAlreadyExists);
        }
        users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Identifier) -> AppResult<Option<User>> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        Ok(self.lock()?.values().find(|u| u.email() == email).cloned())
    }

    async fn update(&self, user: &User) -> AppResult<Option<User>> {
        let mut users = self.lock()?;
        if users
            .values()
            .any(|u| u.id() != user.id() && u.email() == user.email())
        {
            return Err(AppError::UserAlreadyExists);
        }
        match users.get_mut(&user.id()) {
            Some(stored) => {
                *stored = user.clone();
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Identifier) -> AppResult<bool> {
        Ok(self.lock()?.remove(&id).is_some())
    }
}
