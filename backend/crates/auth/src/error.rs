//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email does not match the expected shape
    #[error("Invalid email format")]
    InvalidEmailFormat,

    /// Email already registered
    #[error("Email in use")]
    EmailInUse,

    /// No account for this email
    #[error("No account found for this email")]
    EmailNotFound,

    /// Wrong password for an existing account
    #[error("Invalid password")]
    InvalidPassword,

    /// Required request field absent or empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Role string not recognized
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Password violated the policy
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Missing or unparseable bearer credential
    #[error("Unauthorized")]
    Unauthorized,

    /// Credential failed signature or expiry verification
    #[error("Invalid or expired token")]
    TokenInvalid,

    /// Role or ownership mismatch
    #[error("Forbidden")]
    Forbidden,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidEmailFormat
            | AuthError::EmailInUse
            | AuthError::EmailNotFound
            | AuthError::MissingField(_)
            | AuthError::UnknownRole(_)
            | AuthError::PasswordValidation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidPassword | AuthError::Unauthorized | AuthError::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidEmailFormat
            | AuthError::EmailInUse
            | AuthError::EmailNotFound
            | AuthError::MissingField(_)
            | AuthError::UnknownRole(_)
            | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::InvalidPassword | AuthError::Unauthorized | AuthError::TokenInvalid => {
                ErrorKind::Unauthorized
            }
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable machine-readable code for the response body
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidEmailFormat => "INVALID_EMAIL_FORMAT",
            AuthError::EmailInUse => "EMAIL_IN_USE",
            AuthError::EmailNotFound => "EMAIL_NOT_FOUND",
            AuthError::InvalidPassword => "INVALID_PASSWORD",
            AuthError::MissingField(_) => "MISSING_FIELD",
            AuthError::UnknownRole(_) => "UNKNOWN_ROLE",
            AuthError::PasswordValidation(_) => "PASSWORD_POLICY",
            AuthError::Unauthorized | AuthError::TokenInvalid => "UNAUTHORIZED",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::Database(_) | AuthError::Internal(_) => "INTERNAL",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string()).with_code(self.code())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidPassword => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenInvalid => {
                tracing::warn!("Rejected bearer credential");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<platform::password::PasswordPolicyError> for AuthError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        AuthError::PasswordValidation(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::InvalidEmailFormat.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::EmailNotFound.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidPassword.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_codes() {
        assert_eq!(AuthError::InvalidEmailFormat.code(), "INVALID_EMAIL_FORMAT");
        assert_eq!(AuthError::EmailInUse.code(), "EMAIL_IN_USE");
        assert_eq!(AuthError::InvalidPassword.code(), "INVALID_PASSWORD");
    }
}
