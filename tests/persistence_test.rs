//! Repository and unit-of-work tests against in-memory SQLite.

mod common;

use user_auth_api::domain::{Email, HashedPassword, Identifier, User};
use user_auth_api::errors::AppError;
use user_auth_api::infra::{Persistence, UnitOfWork, UserRepository, UserStore};
use user_auth_api::with_transaction;

use common::test_database;

fn user(name: &str, email: &str) -> User {
    User::new(
        Identifier::generate(),
        name,
        Email::new(email).unwrap(),
        HashedPassword::from_hash("$argon2id$hash"),
    )
    .unwrap()
}

#[tokio::test]
async fn test_store_round_trip() {
    let db = test_database().await;
    let store = UserStore::new(db.get_connection());
    let alice = user("Alice", "alice@example.com");

    store.save(&alice).await.unwrap();

    assert_eq!(store.get_by_id(alice.id()).await.unwrap(), Some(alice.clone()));
    assert_eq!(
        store.get_by_email(alice.email()).await.unwrap(),
        Some(alice.clone())
    );
    assert_eq!(store.get_by_id(Identifier::generate()).await.unwrap(), None);
}

#[tokio::test]
async fn test_unique_email_violation_maps_to_conflict() {
    let db = test_database().await;
    let store = UserStore::new(db.get_connection());
    store.save(&user("Alice", "alice@example.com")).await.unwrap();

    let result = store.save(&user("Impostor", "alice@example.com")).await;

    assert!(matches!(result, Err(AppError::UserAlreadyExists)));
}

#[tokio::test]
async fn test_update_and_delete() {
    let db = test_database().await;
    let store = UserStore::new(db.get_connection());
    let alice = user("Alice", "alice@example.com");
    store.save(&alice).await.unwrap();

    let renamed = User::new(
        alice.id(),
        "Alicia",
        Email::new("alicia@example.com").unwrap(),
        alice.password().clone(),
    )
    .unwrap();
    assert_eq!(store.update(&renamed).await.unwrap(), Some(renamed.clone()));
    assert_eq!(store.get_by_id(alice.id()).await.unwrap(), Some(renamed));

    let ghost = user("Ghost", "ghost@example.com");
    assert_eq!(store.update(&ghost).await.unwrap(), None);

    assert!(store.delete(alice.id()).await.unwrap());
    assert!(!store.delete(alice.id()).await.unwrap());
    assert_eq!(store.get_by_id(alice.id()).await.unwrap(), None);
}

#[tokio::test]
async fn test_transaction_commits_on_success() {
    let db = test_database().await;
    let uow = Persistence::new(db.get_connection());
    let alice = user("Alice", "alice@example.com");

    let saved = alice.clone();
    let id = with_transaction!(uow, |ctx| {
        ctx.users().save(&saved).await?;
        Ok::<_, AppError>(saved.id())
    })
    .unwrap();

    assert_eq!(uow.users().get_by_id(id).await.unwrap(), Some(alice));
}

#[tokio::test]
async fn test_transaction_rolls_back_on_error() {
    let db = test_database().await;
    let uow = Persistence::new(db.get_connection());
    let alice = user("Alice", "alice@example.com");

    let saved = alice.clone();
    let result: Result<(), AppError> = with_transaction!(uow, |ctx| {
        ctx.users().save(&saved).await?;
        // Visible inside the transaction
        assert!(ctx.users().get_by_id(saved.id()).await?.is_some());
        Err(AppError::validation("abort"))
    });

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(uow.users().get_by_id(alice.id()).await.unwrap(), None);
}

#[tokio::test]
async fn test_migration_status_and_rollback() {
    let db = test_database().await;

    let status = db.migration_status().await.unwrap();
    assert_eq!(status.len(), 2);
    assert!(status.iter().all(|(_, applied)| *applied));

    db.rollback_migration().await.unwrap();
    let status = db.migration_status().await.unwrap();
    assert_eq!(status.iter().filter(|(_, applied)| *applied).count(), 1);
    assert!(!status[1].1);

    db.run_migrations().await.unwrap();
    assert!(db.ping().await.is_ok());
}
