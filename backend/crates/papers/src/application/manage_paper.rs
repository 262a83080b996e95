//! Manage Paper Use Case
//!
//! Ownership-gated update and delete. Update only touches the descriptive
//! metadata fields; status, review, counters and ownership never change here.

use std::sync::Arc;

use auth::Principal;
use kernel::id::PaperId;

use crate::domain::entities::PaperWithUploader;
use crate::domain::repository::PaperRepository;
use crate::domain::value_objects::MetadataPatch;
use crate::error::{PaperError, PaperResult};

/// Manage Paper Use Case
pub struct ManagePaperUseCase<R>
where
    R: PaperRepository,
{
    repo: Arc<R>,
}

impl<R> ManagePaperUseCase<R>
where
    R: PaperRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    async fn authorize(
        &self,
        principal: &Principal,
        paper_id: &PaperId,
    ) -> PaperResult<PaperWithUploader> {
        let record = self
            .repo
            .find_by_id(paper_id)
            .await?
            .ok_or(PaperError::NotFound)?;

        if !principal.can_act_on(&record.paper.uploaded_by) {
            return Err(PaperError::Forbidden);
        }

        Ok(record)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        paper_id: PaperId,
        patch: MetadataPatch,
    ) -> PaperResult<PaperWithUploader> {
        self.authorize(principal, &paper_id).await?;

        self.repo
            .update_metadata(&paper_id, &patch)
            .await?
            .ok_or(PaperError::NotFound)
    }

    pub async fn delete(&self, principal: &Principal, paper_id: PaperId) -> PaperResult<()> {
        self.authorize(principal, &paper_id).await?;

        if !self.repo.delete(&paper_id).await? {
            return Err(PaperError::NotFound);
        }

        tracing::info!(paper_id = %paper_id, user_id = %principal.user_id, "Paper deleted");

        Ok(())
    }
}
