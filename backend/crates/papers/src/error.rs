//! Paper Error Types
//!
//! Paper-specific error variants that integrate with the unified
//! `kernel::error::AppError` system, plus dedicated error types for the
//! two outbound gateways (object store, authenticity scorer).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Paper-specific result type alias
pub type PaperResult<T> = Result<T, PaperError>;

// ============================================================================
// Gateway Errors
// ============================================================================

/// Object store gateway failures. Always fatal for the upload.
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    /// Upload endpoint or api key not configured
    #[error("Object store is not configured")]
    Unconfigured,

    /// Request exceeded the configured deadline
    #[error("Object store request timed out")]
    Timeout,

    /// Connection-level failure
    #[error("Object store transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-success HTTP status from the store
    #[error("Object store returned status {0}")]
    UpstreamStatus(StatusCode),

    /// Response body did not match the expected shape
    #[error("Malformed object store response: {0}")]
    MalformedResponse(String),
}

/// Authenticity scorer failures. Never fatal; the upload degrades instead.
#[derive(Debug, Error)]
pub enum ScorerError {
    /// Scorer base URL not configured
    #[error("Authenticity scorer is not configured")]
    Unconfigured,

    /// Request exceeded the configured deadline
    #[error("Authenticity scorer request timed out")]
    Timeout,

    /// Connection-level failure
    #[error("Authenticity scorer transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-success HTTP status from the scorer
    #[error("Authenticity scorer returned status {0}")]
    UpstreamStatus(StatusCode),

    /// Response body did not match the expected shape
    #[error("Malformed scorer response: {0}")]
    MalformedResponse(String),
}

impl ScorerError {
    /// Short reason surfaced in the degraded review feedback
    pub fn reason(&self) -> &'static str {
        match self {
            ScorerError::Unconfigured => "scorer not configured",
            ScorerError::Timeout => "scorer timed out",
            ScorerError::Transport(_) => "scorer unreachable",
            ScorerError::UpstreamStatus(_) => "scorer request failed",
            ScorerError::MalformedResponse(_) => "scorer response unreadable",
        }
    }
}

// ============================================================================
// Paper Errors
// ============================================================================

/// Paper-specific error variants
#[derive(Debug, Error)]
pub enum PaperError {
    /// Required upload field absent or empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Upload carried no file part
    #[error("No file attached")]
    MissingFile,

    /// Query parameter outside the accepted set
    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    /// Paper not found
    #[error("Paper not found")]
    NotFound,

    /// User not found (badge profile lookup)
    #[error("User not found")]
    UserNotFound,

    /// Caller is neither owner nor admin
    #[error("Forbidden")]
    Forbidden,

    /// No verified identity on a protected route
    #[error("Unauthorized")]
    Unauthorized,

    /// Object store failure aborting the upload
    #[error(transparent)]
    ObjectStore(#[from] ObjectStoreError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaperError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaperError::MissingField(_) | PaperError::MissingFile | PaperError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            PaperError::Unauthorized => StatusCode::UNAUTHORIZED,
            PaperError::Forbidden => StatusCode::FORBIDDEN,
            PaperError::NotFound | PaperError::UserNotFound => StatusCode::NOT_FOUND,
            PaperError::ObjectStore(_) | PaperError::Database(_) | PaperError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaperError::MissingField(_) | PaperError::MissingFile | PaperError::InvalidQuery(_) => {
                ErrorKind::BadRequest
            }
            PaperError::Unauthorized => ErrorKind::Unauthorized,
            PaperError::Forbidden => ErrorKind::Forbidden,
            PaperError::NotFound | PaperError::UserNotFound => ErrorKind::NotFound,
            PaperError::ObjectStore(_) | PaperError::Database(_) | PaperError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Stable machine-readable code for the response body
    pub fn code(&self) -> &'static str {
        match self {
            PaperError::MissingField(_) => "MISSING_FIELD",
            PaperError::MissingFile => "MISSING_FILE",
            PaperError::InvalidQuery(_) => "INVALID_QUERY",
            PaperError::NotFound => "PAPER_NOT_FOUND",
            PaperError::UserNotFound => "USER_NOT_FOUND",
            PaperError::Forbidden => "FORBIDDEN",
            PaperError::Unauthorized => "UNAUTHORIZED",
            PaperError::ObjectStore(_) => "OBJECT_STORE",
            PaperError::Database(_) | PaperError::Internal(_) => "INTERNAL",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string()).with_code(self.code())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PaperError::ObjectStore(e) => {
                tracing::error!(error = %e, "Object store failure");
            }
            PaperError::Database(e) => {
                tracing::error!(error = %e, "Paper database error");
            }
            PaperError::Internal(msg) => {
                tracing::error!(message = %msg, "Paper internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Paper error");
            }
        }
    }
}

impl IntoResponse for PaperError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for PaperError {
    fn from(err: AppError) -> Self {
        PaperError::Internal(err.to_string())
    }
}
