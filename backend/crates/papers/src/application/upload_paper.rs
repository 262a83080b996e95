//! Upload Paper Use Case
//!
//! Linear pipeline: validate, store the file, gather the corpus, score,
//! persist. No retries and no rollback. A store failure aborts before
//! anything is persisted; a scorer failure degrades the review instead of
//! aborting. An object left orphaned by a failed insert is logged, not
//! compensated.

use chrono::Utc;
use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::PapersConfig;
use crate::domain::entities::{Paper, PaperMetadata, PaperWithUploader};
use crate::domain::repository::{
    AuthenticityScorer, ObjectStore, PaperRepository, ScoreOutcome,
};
use crate::domain::value_objects::CorpusPolicy;
use crate::error::{PaperError, PaperResult};

/// Upload paper input
pub struct UploadPaperInput {
    pub department: String,
    pub subject: String,
    pub year: Option<i32>,
    pub semester: String,
    pub university: Option<String>,
    pub file_name: String,
    pub file_bytes: Vec<u8>,
}

/// Upload Paper Use Case
pub struct UploadPaperUseCase<R, O, S>
where
    R: PaperRepository,
    O: ObjectStore,
    S: AuthenticityScorer,
{
    repo: Arc<R>,
    store: Arc<O>,
    scorer: Arc<S>,
    config: Arc<PapersConfig>,
}

impl<R, O, S> UploadPaperUseCase<R, O, S>
where
    R: PaperRepository,
    O: ObjectStore,
    S: AuthenticityScorer,
{
    pub fn new(repo: Arc<R>, store: Arc<O>, scorer: Arc<S>, config: Arc<PapersConfig>) -> Self {
        Self {
            repo,
            store,
            scorer,
            config,
        }
    }

    pub async fn execute(
        &self,
        uploader: UserId,
        input: UploadPaperInput,
    ) -> PaperResult<PaperWithUploader> {
        let started_at = Utc::now();

        // 1. Validate before any side effect
        if input.department.trim().is_empty() {
            return Err(PaperError::MissingField("department"));
        }
        if input.subject.trim().is_empty() {
            return Err(PaperError::MissingField("subject"));
        }
        let year = input.year.ok_or(PaperError::MissingField("year"))?;
        if input.semester.trim().is_empty() {
            return Err(PaperError::MissingField("semester"));
        }
        if input.file_bytes.is_empty() {
            return Err(PaperError::MissingFile);
        }

        let metadata = PaperMetadata {
            department: input.department,
            subject: input.subject,
            year,
            semester: input.semester,
            university: input.university,
        };

        // 2. Store the file. Failure aborts with nothing persisted.
        let stored = self.store.store(input.file_bytes, &input.file_name).await?;

        tracing::info!(url = %stored.url, "Stored uploaded file");

        // 3. Corpus for the scorer
        let before = match self.config.corpus_policy {
            CorpusPolicy::All => None,
            CorpusPolicy::PriorOnly => Some(started_at),
        };
        let corpus = self.repo.corpus_texts(before).await?;

        // 4. Score with degraded fallback
        let outcome = match self.scorer.score(&metadata, &stored.url, &corpus).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, "Scorer unavailable, storing degraded review");
                ScoreOutcome::degraded(e.reason())
            }
        };

        // 5. Persist as pending
        let paper = Paper::new(
            metadata,
            stored.url,
            stored.storage_id.clone(),
            uploader,
            outcome.review,
            outcome.extracted_text,
        );

        if let Err(e) = self.repo.create(&paper).await {
            // Known gap: the stored object is now orphaned
            tracing::error!(
                storage_id = %stored.storage_id,
                error = %e,
                "Paper insert failed after file was stored; object is orphaned"
            );
            return Err(e);
        }

        tracing::info!(
            paper_id = %paper.paper_id,
            uploader = %uploader,
            score = paper.review.authenticity_score,
            "Paper uploaded"
        );

        // Uploader name comes from the fresh read so responses always embed it
        self.repo
            .find_by_id(&paper.paper_id)
            .await?
            .ok_or_else(|| PaperError::Internal("Uploaded paper vanished".to_string()))
    }
}
