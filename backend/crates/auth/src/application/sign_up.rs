//! Sign Up Use Case
//!
//! Creates a new user account and issues its first credential.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::{AuthOutput, TokenIssuer};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Role override; defaults to student
    pub role: Option<String>,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    issuer: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<R> SignUpUseCase<R>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<AuthOutput> {
        if input.name.trim().is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        if input.email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if input.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let email = Email::new(input.email)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailInUse);
        }

        let role = match input.role.as_deref() {
            None | Some("") => UserRole::default(),
            Some(code) => {
                UserRole::from_code(code).ok_or_else(|| AuthError::UnknownRole(code.to_string()))?
            }
        };

        // Validate and hash the password (salted Argon2id)
        let password = ClearTextPassword::new(input.password)?;
        let password_hash = password.hash(self.config.pepper())?;

        let user = User::new(input.name.trim().to_string(), email, password_hash, role);

        self.repo.create(&user).await?;

        let token = self.issuer.issue(&user)?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            role = %user.role,
            "User signed up"
        );

        Ok(AuthOutput { token, user })
    }
}
