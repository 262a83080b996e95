//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, user_role::UserRole};

/// User entity
///
/// The password hash is set once at signup and never updated in-scope.
/// The badge set is owned by the badge evaluator: monotonic, unordered,
/// no duplicates; this crate only reads it back for user views.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Email (unique, lowercased)
    pub email: Email,
    /// Argon2id PHC hash
    pub password_hash: HashedPassword,
    /// Role (Student, Admin)
    pub role: UserRole,
    /// Earned badge tags
    pub badges: Vec<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with an empty badge set
    pub fn new(name: String, email: Email, password_hash: HashedPassword, role: UserRole) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password_hash,
            role,
            badges: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this user moderates content
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
