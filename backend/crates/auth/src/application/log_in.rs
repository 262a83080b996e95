//! Log In Use Case
//!
//! Authenticates email + password and issues a fresh credential.
//! Error contract: a malformed email fails before any lookup; an unknown
//! email signals `EmailNotFound`, never `InvalidPassword`.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::{AuthOutput, TokenIssuer};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Log in input
pub struct LogInInput {
    pub email: String,
    pub password: String,
}

/// Log in use case
pub struct LogInUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    issuer: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<R> LogInUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, issuer: Arc<TokenIssuer>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            issuer,
            config,
        }
    }

    pub async fn execute(&self, input: LogInInput) -> AuthResult<AuthOutput> {
        if input.email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if input.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        // Format check happens before the lookup
        let email = Email::new(input.email)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::EmailNotFound)?;

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidPassword)?;

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidPassword);
        }

        let token = self.issuer.issue(&user)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(AuthOutput { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use kernel::id::UserId;

    use crate::domain::entity::user::User;
    use crate::domain::value_object::user_role::UserRole;

    struct FakeRepo {
        users: Mutex<Vec<User>>,
        lookups: AtomicUsize,
    }

    impl FakeRepo {
        fn with_user(user: User) -> Self {
            Self {
                users: Mutex::new(vec![user]),
                lookups: AtomicUsize::new(0),
            }
        }
    }

    impl UserRepository for FakeRepo {
        async fn create(&self, user: &User) -> AuthResult<()> {
            self.users.lock().unwrap().push(user.clone());
            Ok(())
        }

        async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.user_id == *user_id)
                .cloned())
        }

        async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == *email)
                .cloned())
        }

        async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .any(|u| u.email == *email))
        }

        async fn list_all(&self) -> AuthResult<Vec<User>> {
            Ok(self.users.lock().unwrap().clone())
        }

        async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|u| u.user_id != *user_id);
            Ok(users.len() != before)
        }
    }

    fn registered_user() -> User {
        let hash = ClearTextPassword::new("hunter2".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        User::new(
            "A Student".to_string(),
            Email::new("student@example.com").unwrap(),
            hash,
            UserRole::Student,
        )
    }

    fn use_case(repo: Arc<FakeRepo>) -> LogInUseCase<FakeRepo> {
        let issuer = Arc::new(TokenIssuer::new(
            b"test-secret",
            Duration::from_secs(7 * 24 * 3600),
        ));
        LogInUseCase::new(repo, issuer, Arc::new(AuthConfig::new("test-secret")))
    }

    fn input(email: &str, password: &str) -> LogInInput {
        LogInInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_log_in_happy_path() {
        let user = registered_user();
        let repo = Arc::new(FakeRepo::with_user(user.clone()));

        let output = use_case(repo)
            .execute(input("student@example.com", "hunter2"))
            .await
            .unwrap();

        assert!(!output.token.is_empty());
        assert_eq!(output.user.user_id, user.user_id);
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_invalid_password() {
        let repo = Arc::new(FakeRepo::with_user(registered_user()));

        let err = use_case(repo)
            .execute(input("nobody@example.com", "hunter2"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailNotFound));
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let repo = Arc::new(FakeRepo::with_user(registered_user()));

        let err = use_case(repo)
            .execute(input("student@example.com", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidPassword));
    }

    #[tokio::test]
    async fn test_malformed_email_fails_before_lookup() {
        let repo = Arc::new(FakeRepo::with_user(registered_user()));

        let err = use_case(repo.clone())
            .execute(input("a@b", "hunter2"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidEmailFormat));
        assert_eq!(repo.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let repo = Arc::new(FakeRepo::with_user(registered_user()));
        let use_case = use_case(repo);

        assert!(matches!(
            use_case.execute(input("", "pw")).await.unwrap_err(),
            AuthError::MissingField("email")
        ));
        assert!(matches!(
            use_case
                .execute(input("student@example.com", ""))
                .await
                .unwrap_err(),
            AuthError::MissingField("password")
        ));
    }
}
