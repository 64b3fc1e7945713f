//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Email, HashedPassword, Identifier, User};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// Rows are re-validated; a row that breaks a domain invariant is reported
/// as an internal error rather than handed to the use cases.
impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = model.id;
        let email = Email::new(&model.email).map_err(|e| {
            AppError::internal(format!("Stored user {} has invalid email: {}", id, e))
        })?;

        User::new(
            Identifier::from(id),
            model.name,
            email,
            HashedPassword::from_hash(model.password_hash),
        )
        .map_err(|e| AppError::internal(format!("Stored user {} is invalid: {}", id, e)))
    }
}
