//! Bearer Credential Issuer
//!
//! Issues and verifies stateless HS256 credentials. There is no
//! server-side revocation list: a token stays structurally valid until
//! its expiry even if its subject was deleted in the meantime.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Claims embedded in bearer credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID (standard `sub` claim)
    pub sub: String,
    /// Role code ("student" / "admin")
    pub role: String,
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// Issued at (unix timestamp)
    pub iat: i64,
    /// Expiry (unix timestamp)
    pub exp: i64,
}

/// Authenticated identity derived from a verified credential
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: UserId,
    pub role: UserRole,
    pub name: String,
    pub email: String,
}

impl Principal {
    /// Build from verified claims; fails when the subject is not a UUID
    /// or the role code is unknown
    pub fn from_claims(claims: &Claims) -> AuthResult<Self> {
        let uuid = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::TokenInvalid)?;
        let role = UserRole::from_code(&claims.role).ok_or(AuthError::TokenInvalid)?;

        Ok(Self {
            user_id: UserId::from_uuid(uuid),
            role,
            name: claims.name.clone(),
            email: claims.email.clone(),
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Ownership-or-admin check: admins may act on any resource,
    /// everyone else only on their own
    pub fn can_act_on(&self, owner_id: &UserId) -> bool {
        self.is_admin() || self.user_id == *owner_id
    }
}

/// Output of the authenticating use cases: a fresh credential plus the
/// redacted user it identifies
#[derive(Debug)]
pub struct AuthOutput {
    pub token: String,
    pub user: User,
}

/// Signs and verifies bearer credentials with a process-wide secret
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    /// Issue a signed credential for this user
    pub fn issue(&self, user: &User) -> AuthResult<String> {
        let now = chrono::Utc::now().timestamp();

        let claims = Claims {
            sub: user.user_id.to_string(),
            role: user.role.code().to_string(),
            name: user.name.clone(),
            email: user.email.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {}", e)))
    }

    /// Verify signature and expiry, returning the embedded claims
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::TokenInvalid)
    }
}
