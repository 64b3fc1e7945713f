//! User repository - port and SeaORM implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{Email, Identifier, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// `save` expects a fresh id; callers check email uniqueness beforehand and
/// the storage unique constraint settles races.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    async fn save(&self, user: &User) -> AppResult<()>;

    /// Find user by ID
    async fn get_by_id(&self, id: Identifier) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn get_by_email(&self, email: &Email) -> AppResult<Option<User>>;

    /// Overwrite name and email of an existing user; `None` if it is gone
    async fn update(&self, user: &User) -> AppResult<Option<User>>;

    /// Remove user by ID; `false` if there was nothing to remove
    async fn delete(&self, id: Identifier) -> AppResult<bool>;
}

/// Concrete implementation of UserRepository over the connection pool
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn save(&self, user: &User) -> AppResult<()> {
        queries::insert(&self.db, user).await
    }

    async fn get_by_id(&self, id: Identifier) -> AppResult<Option<User>> {
        queries::find_by_id(&self.db, id).await
    }

    async fn get_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        queries::find_by_email(&self.db, email).await
    }

    async fn update(&self, user: &User) -> AppResult<Option<User>> {
        queries::update(&self.db, user).await
    }

    async fn delete(&self, id: Identifier) -> AppResult<bool> {
        queries::delete(&self.db, id).await
    }
}

/// Statements shared by the pooled and the transaction-scoped repositories.
pub(crate) mod queries {
    use super::*;

    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Identifier) -> AppResult<Option<User>> {
        UserEntity::find_by_id(id.as_uuid())
            .one(conn)
            .await?
            .map(User::try_from)
            .transpose()
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        conn: &C,
        email: &Email,
    ) -> AppResult<Option<User>> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email.as_str()))
            .one(conn)
            .await?
            .map(User::try_from)
            .transpose()
    }

    pub async fn insert<C: ConnectionTrait>(conn: &C, user: &User) -> AppResult<()> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(user.id().as_uuid()),
            email: Set(user.email().as_str().to_string()),
            password_hash: Set(user.password().as_str().to_string()),
            name: Set(user.name().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        UserEntity::insert(active_model)
            .exec_without_returning(conn)
            .await
            .map_err(write_error)?;
        Ok(())
    }

    pub async fn update<C: ConnectionTrait>(conn: &C, user: &User) -> AppResult<Option<User>> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Name, Expr::value(user.name()))
            .col_expr(user::Column::Email, Expr::value(user.email().as_str()))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(user.id().as_uuid()))
            .exec(conn)
            .await
            .map_err(write_error)?;

        Ok((result.rows_affected > 0).then(|| user.clone()))
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, id: Identifier) -> AppResult<bool> {
        let result = UserEntity::delete_by_id(id.as_uuid()).exec(conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Unique violations on email surface as a domain conflict.
    fn write_error(err: DbErr) -> AppError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::warn!("Unique constraint violated on users: {}", detail);
                AppError::UserAlreadyExists
            }
            _ => AppError::Database(err),
        }
    }
}
