//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - SeaORM-backed repositories
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use db::{Database, Migrator};
pub use repositories::{UserRepository, UserStore};
pub use unit_of_work::{Persistence, TransactionContext, TxUserRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
