//! Unit of Work pattern implementation.
//!
//! A unit of work hands out the user repository and runs a closure inside a
//! single database transaction: committed when the closure returns `Ok`,
//! rolled back when it returns `Err`. Nothing the closure wrote is visible
//! to other connections until the commit.

use async_trait::async_trait;
use futures::future::BoxFuture;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction, IsolationLevel,
    TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{queries, UserRepository, UserStore};
use crate::domain::{Email, Identifier, User};
use crate::errors::AppResult;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because `transaction` is generic; tests use
/// [`crate::infra::testing::TestUnitOfWork`] instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// User repository outside of any transaction
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Execute a closure within a transaction.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> BoxFuture<'a, AppResult<T>> + Send,
        T: Send;
}

/// Repository access scoped to one running transaction.
pub struct TransactionContext<'a> {
    users: &'a dyn UserRepository,
}

impl<'a> TransactionContext<'a> {
    pub fn new(users: &'a dyn UserRepository) -> Self {
        Self { users }
    }

    /// User repository bound to this transaction
    pub fn users(&self) -> &'a dyn UserRepository {
        self.users
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        Self { db, user_repo }
    }

    async fn begin(&self) -> AppResult<DatabaseTransaction> {
        // SQLite has no per-transaction isolation settings
        let txn = match self.db.get_database_backend() {
            DatabaseBackend::Sqlite => self.db.begin().await?,
            _ => {
                self.db
                    .begin_with_config(
                        Some(IsolationLevel::ReadCommitted),
                        Some(AccessMode::ReadWrite),
                    )
                    .await?
            }
        };
        Ok(txn)
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> BoxFuture<'a, AppResult<T>> + Send,
        T: Send,
    {
        let txn = self.begin().await?;

        let outcome = {
            let repo = TxUserRepository::new(&txn);
            f(TransactionContext::new(&repo)).await
        };

        match outcome {
            Ok(result) => {
                txn.commit().await?;
                Ok(result)
            }
            Err(e) => {
                tracing::debug!("Rolling back transaction: {}", e);
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// User repository executing every statement on a borrowed transaction.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    pub fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl<'a> UserRepository for TxUserRepository<'a> {
    async fn save(&self, user: &User) -> AppResult<()> {
        queries::insert(self.txn, user).await
    }

    async fn get_by_id(&self, id: Identifier) -> AppResult<Option<User>> {
        queries::find_by_id(self.txn, id).await
    }

    async fn get_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        queries::find_by_email(self.txn, email).await
    }

    async fn update(&self, user: &User) -> AppResult<Option<User>> {
        queries::update(self.txn, user).await
    }

    async fn delete(&self, id: Identifier) -> AppResult<bool> {
        queries::delete(self.txn, id).await
    }
}

/// Run a block inside `$uow.transaction`, binding the context to `$ctx`.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
