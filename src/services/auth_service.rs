//! Authentication service - credential checks and access tokens.
//!
//! Every credential failure surfaces as the same `AuthenticationFailed`
//! error, and every token failure as `InvalidToken`, so callers cannot tell
//! which check rejected them.

use async_trait::async_trait;
use std::sync::Arc;

use super::token_provider::{parse_subject, subject_for, TokenProvider, TokenResponse};
use crate::domain::{Email, HashedPassword, Hasher, PlaintextPassword, User, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Well-formed Argon2id hash that matches no password. Verified against when
/// the email is unknown so both failure paths run the hasher.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check an email/password pair.
    async fn authenticate(&self, email: String, password: String) -> AppResult<UserResponse>;

    /// Check credentials and issue an access token for the user.
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Resolve the user a bearer token was issued for.
    async fn current_user(&self, token: &str) -> AppResult<UserResponse>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    hasher: Arc<dyn Hasher>,
    tokens: Arc<dyn TokenProvider>,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, hasher: Arc<dyn Hasher>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            uow,
            hasher,
            tokens,
        }
    }

    async fn verify_credentials(&self, email: &str, password: String) -> AppResult<User> {
        let email = Email::new(email).map_err(|_| AppError::AuthenticationFailed)?;
        let user = self.uow.users().get_by_email(&email).await?;

        let password = PlaintextPassword::new(password).ok();

        let verified = match (&user, &password) {
            (Some(user), Some(password)) => self.hasher.verify(password, user.password()),
            (None, Some(password)) => {
                let dummy = HashedPassword::from_hash(DUMMY_PASSWORD_HASH);
                let _ = self.hasher.verify(password, &dummy);
                false
            }
            _ => false,
        };

        match user {
            Some(user) if verified => Ok(user),
            _ => {
                tracing::debug!("Authentication failed for {}", email);
                Err(AppError::AuthenticationFailed)
            }
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn authenticate(&self, email: String, password: String) -> AppResult<UserResponse> {
        let user = self.verify_credentials(&email, password).await?;
        Ok(UserResponse::from(user))
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user = self.verify_credentials(&email, password).await?;
        let token = self.tokens.create_access_token(&subject_for(&user.id()))?;
        tracing::info!("Issued access token for user {}", user.id());
        Ok(token)
    }

    async fn current_user(&self, token: &str) -> AppResult<UserResponse> {
        let subject = self.tokens.get_subject(token).map_err(|_| AppError::InvalidToken)?;
        let id = parse_subject(&subject)?;

        self.uow
            .users()
            .get_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or(AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identifier, MockHasher};
    use crate::infra::testing::{InMemoryUserRepository, TestUnitOfWork};
    use crate::infra::{MockUserRepository, UserRepository};
    use crate::services::token_provider::{JwtProvider, MockTokenProvider};
    use jsonwebtoken::Algorithm;

    const PASSWORD: &str = "correct horse";

    fn stored_user() -> User {
        User::new(
            Identifier::generate(),
            "Alice",
            Email::new("alice@example.com").unwrap(),
            HashedPassword::from_hash("stored-hash"),
        )
        .unwrap()
    }

    /// Hasher accepting only `PASSWORD` against "stored-hash".
    fn checking_hasher() -> MockHasher {
        let mut hasher = MockHasher::new();
        hasher
            .expect_verify()
            .returning(|p, h| p.as_str() == PASSWORD && h.as_str() == "stored-hash");
        hasher
    }

    fn jwt() -> Arc<JwtProvider> {
        Arc::new(JwtProvider::new(b"auth-service-secret", Algorithm::HS256, 30))
    }

    fn service(
        repo: impl UserRepository + 'static,
        hasher: MockHasher,
        tokens: Arc<dyn TokenProvider>,
    ) -> Authenticator<TestUnitOfWork> {
        let uow = Arc::new(TestUnitOfWork::new(Arc::new(repo)));
        Authenticator::new(uow, Arc::new(hasher), tokens)
    }

    async fn seeded() -> (InMemoryUserRepository, User) {
        let repo = InMemoryUserRepository::new();
        let user = stored_user();
        repo.save(&user).await.unwrap();
        (repo, user)
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let (repo, user) = seeded().await;
        let service = service(repo, checking_hasher(), jwt());

        let found = service
            .authenticate("ALICE@example.com".into(), PASSWORD.into())
            .await
            .unwrap();

        assert_eq!(found, UserResponse::from(&user));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
        let (repo, _) = seeded().await;
        let service = service(repo, checking_hasher(), jwt());

        let wrong_password = service
            .authenticate("alice@example.com".into(), "wrong password".into())
            .await
            .unwrap_err();
        let unknown_email = service
            .authenticate("bob@example.com".into(), PASSWORD.into())
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::AuthenticationFailed));
        assert!(matches!(unknown_email, AppError::AuthenticationFailed));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_unknown_email_still_runs_hasher() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().returning(|_| Ok(None));
        let mut hasher = MockHasher::new();
        hasher
            .expect_verify()
            .times(1)
            .withf(|_, h| h.as_str() == DUMMY_PASSWORD_HASH)
            .returning(|_, _| true);
        let service = service(repo, hasher, jwt());

        let result = service
            .authenticate("nobody@example.com".into(), PASSWORD.into())
            .await;

        assert!(matches!(result, Err(AppError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn test_malformed_credentials_fold_into_authentication_failed() {
        let (repo, _) = seeded().await;
        let service = service(repo, checking_hasher(), jwt());

        let bad_email = service.authenticate("invalid".into(), PASSWORD.into()).await;
        let short_password = service
            .authenticate("alice@example.com".into(), "short".into())
            .await;

        assert!(matches!(bad_email, Err(AppError::AuthenticationFailed)));
        assert!(matches!(short_password, Err(AppError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn test_login_issues_token_for_user_subject() {
        let (repo, user) = seeded().await;
        let tokens = jwt();
        let service = service(repo, checking_hasher(), tokens.clone());

        let token = service
            .login("alice@example.com".into(), PASSWORD.into())
            .await
            .unwrap();

        assert_eq!(token.token_type, "bearer");
        assert_eq!(
            tokens.get_subject(&token.access_token).unwrap(),
            format!("user_id:{}", user.id())
        );
    }

    #[tokio::test]
    async fn test_login_failure_issues_nothing() {
        let (repo, _) = seeded().await;
        let mut tokens = MockTokenProvider::new();
        tokens.expect_create_access_token().times(0);
        let service = service(repo, checking_hasher(), Arc::new(tokens));

        let result = service
            .login("alice@example.com".into(), "wrong password".into())
            .await;

        assert!(matches!(result, Err(AppError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn test_current_user_round_trip() {
        let (repo, user) = seeded().await;
        let service = service(repo, checking_hasher(), jwt());
        let token = service
            .login("alice@example.com".into(), PASSWORD.into())
            .await
            .unwrap();

        let me = service.current_user(&token.access_token).await.unwrap();

        assert_eq!(me, UserResponse::from(&user));
    }

    #[tokio::test]
    async fn test_current_user_rejections() {
        let (repo, _) = seeded().await;
        let tokens = jwt();
        let service = service(repo, MockHasher::new(), tokens.clone());

        let garbage = service.current_user("garbage").await;
        let bad_subject = tokens.create_access_token("someone").unwrap();
        let bad_subject = service.current_user(&bad_subject.access_token).await;
        let deleted = tokens
            .create_access_token(&subject_for(&Identifier::generate()))
            .unwrap();
        let deleted = service.current_user(&deleted.access_token).await;

        assert!(matches!(garbage, Err(AppError::InvalidToken)));
        assert!(matches!(bad_subject, Err(AppError::InvalidToken)));
        assert!(matches!(deleted, Err(AppError::InvalidToken)));
    }
}
