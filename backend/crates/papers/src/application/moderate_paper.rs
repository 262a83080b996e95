//! Moderate Paper Use Case
//!
//! Admin moderation: filtered listing, approve, reject. Approval triggers a
//! badge recompute for the uploader, exactly once and synchronously.
//! Rejection does not. Any status can move to any other.

use std::sync::Arc;

use kernel::id::PaperId;

use crate::application::award_badges::AwardBadgesUseCase;
use crate::domain::entities::PaperWithUploader;
use crate::domain::repository::{PaperRepository, UserDirectory};
use crate::domain::value_objects::{ModerationStatus, PaperQuery, SortOrder};
use crate::error::{PaperError, PaperResult};

/// Approve result: the updated paper plus any badges the approval unlocked
pub struct ApproveOutput {
    pub paper: PaperWithUploader,
    pub awarded_badges: Vec<String>,
}

/// Moderate Paper Use Case
pub struct ModeratePaperUseCase<R, U>
where
    R: PaperRepository,
    U: UserDirectory,
{
    repo: Arc<R>,
    users: Arc<U>,
}

impl<R, U> ModeratePaperUseCase<R, U>
where
    R: PaperRepository,
    U: UserDirectory,
{
    pub fn new(repo: Arc<R>, users: Arc<U>) -> Self {
        Self { repo, users }
    }

    /// Full listing with an optional minimum-score filter, newest first
    pub async fn list(&self, min_score: Option<f64>) -> PaperResult<Vec<PaperWithUploader>> {
        let query = PaperQuery {
            sort: SortOrder::Recency,
            min_score,
            ..PaperQuery::default()
        };

        self.repo.list(&query).await
    }

    pub async fn approve(&self, paper_id: PaperId) -> PaperResult<ApproveOutput> {
        let record = self
            .repo
            .set_status(&paper_id, ModerationStatus::Approved)
            .await?
            .ok_or(PaperError::NotFound)?;

        tracing::info!(paper_id = %paper_id, "Paper approved");

        let badge_use_case = AwardBadgesUseCase::new(self.repo.clone(), self.users.clone());
        let awarded_badges = badge_use_case.recompute(&record.paper.uploaded_by).await?;

        Ok(ApproveOutput {
            paper: record,
            awarded_badges,
        })
    }

    pub async fn reject(&self, paper_id: PaperId) -> PaperResult<PaperWithUploader> {
        let record = self
            .repo
            .set_status(&paper_id, ModerationStatus::Rejected)
            .await?
            .ok_or(PaperError::NotFound)?;

        tracing::info!(paper_id = %paper_id, "Paper rejected");

        Ok(record)
    }
}
