//! Admin User Management Use Case
//!
//! Listing and removal of accounts. Authorization (admin role) is checked
//! at the presentation layer before these run.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Admin user management use case
pub struct AdminUsersUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> AdminUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Lists every account, newest first.
    pub async fn list(&self) -> AuthResult<Vec<User>> {
        self.repo.list_all().await
    }

    /// Permanently removes an account. Owned papers are deleted by the
    /// database cascade.
    pub async fn delete(&self, user_id: UserId) -> AuthResult<()> {
        let deleted = self.repo.delete(&user_id).await?;
        if !deleted {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "User deleted by admin");

        Ok(())
    }
}
