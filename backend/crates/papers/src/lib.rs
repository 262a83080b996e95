//! Papers Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository and gateway traits
//! - `application/` - Use cases
//! - `infra/` - Database and outbound HTTP implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Pipeline Model
//! - Uploads run a linear pipeline: validate, store the file, score against
//!   the corpus, persist as pending. No retries, no rollback.
//! - The object store is load-bearing (failure aborts); the scorer is not
//!   (failure degrades the review to "not yet verified").
//! - Badges are monotonic and recomputed synchronously on each approval.
//! - View counters use single-statement SQL increments.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::PapersConfig;
pub use error::{ObjectStoreError, PaperError, PaperResult, ScorerError};
pub use infra::object_store::{HttpObjectStore, ObjectStoreConfig};
pub use infra::postgres::PgPaperRepository;
pub use infra::scorer::{HttpScorerClient, ScorerConfig};
pub use presentation::router::papers_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod badges {
    pub use crate::domain::services::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
