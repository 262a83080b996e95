//! Browse Papers Use Case
//!
//! Public listing, single fetch, and the unauthenticated view counter.

use std::sync::Arc;

use kernel::id::PaperId;

use crate::application::config::PapersConfig;
use crate::domain::entities::PaperWithUploader;
use crate::domain::repository::PaperRepository;
use crate::domain::value_objects::{PaperQuery, SortOrder, VisibilityPolicy};
use crate::error::{PaperError, PaperResult};

/// Listing filters as supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct BrowseFilter {
    pub subject: Option<String>,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub sort: SortOrder,
}

/// Browse Papers Use Case
pub struct BrowsePapersUseCase<R>
where
    R: PaperRepository,
{
    repo: Arc<R>,
    config: Arc<PapersConfig>,
}

impl<R> BrowsePapersUseCase<R>
where
    R: PaperRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<PapersConfig>) -> Self {
        Self { repo, config }
    }

    /// List papers. `is_admin` lifts the visibility restriction.
    pub async fn list(
        &self,
        filter: BrowseFilter,
        is_admin: bool,
    ) -> PaperResult<Vec<PaperWithUploader>> {
        let visible_only = match self.config.visibility_policy {
            VisibilityPolicy::Open => false,
            VisibilityPolicy::ModeratedOnly => !is_admin,
        };

        let query = PaperQuery {
            subject: filter.subject,
            department: filter.department,
            year: filter.year,
            sort: filter.sort,
            min_score: None,
            visible_only,
        };

        self.repo.list(&query).await
    }

    pub async fn get(&self, paper_id: PaperId) -> PaperResult<PaperWithUploader> {
        self.repo
            .find_by_id(&paper_id)
            .await?
            .ok_or(PaperError::NotFound)
    }

    /// Unconditional counter bump, returns the updated record
    pub async fn record_download(&self, paper_id: PaperId) -> PaperResult<PaperWithUploader> {
        self.repo
            .increment_views(&paper_id)
            .await?
            .ok_or(PaperError::NotFound)
    }
}
