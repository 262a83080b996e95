//! Repository and Gateway Traits
//!
//! Interfaces for persistence and for the two outbound services.
//! Implementations live in the infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::{PaperId, UserId};

use crate::domain::entities::{
    AiReview, BadgeProfile, LeaderboardEntry, Paper, PaperMetadata, PaperWithUploader,
    UploaderStats,
};
use crate::domain::value_objects::{LeaderboardKind, MetadataPatch, ModerationStatus, PaperQuery};
use crate::error::{ObjectStoreError, PaperResult, ScorerError};

/// Paper repository trait
#[trait_variant::make(PaperRepository: Send)]
pub trait LocalPaperRepository {
    /// Persist a new paper
    async fn create(&self, paper: &Paper) -> PaperResult<()>;

    /// Fetch one paper with its uploader's name
    async fn find_by_id(&self, paper_id: &PaperId) -> PaperResult<Option<PaperWithUploader>>;

    /// Filtered, sorted listing
    async fn list(&self, query: &PaperQuery) -> PaperResult<Vec<PaperWithUploader>>;

    /// Patch descriptive metadata, returning the updated record
    async fn update_metadata(
        &self,
        paper_id: &PaperId,
        patch: &MetadataPatch,
    ) -> PaperResult<Option<PaperWithUploader>>;

    /// Hard delete. Returns false when the paper was absent.
    async fn delete(&self, paper_id: &PaperId) -> PaperResult<bool>;

    /// Atomic view increment, returning the updated record
    async fn increment_views(&self, paper_id: &PaperId) -> PaperResult<Option<PaperWithUploader>>;

    /// Set moderation status, returning the updated record
    async fn set_status(
        &self,
        paper_id: &PaperId,
        status: ModerationStatus,
    ) -> PaperResult<Option<PaperWithUploader>>;

    /// Extracted texts feeding the scorer corpus. `before` restricts the
    /// corpus to papers created before that instant.
    async fn corpus_texts(&self, before: Option<DateTime<Utc>>) -> PaperResult<Vec<String>>;

    /// Count and aggregate views of one user's approved papers
    async fn approved_stats(&self, user_id: &UserId) -> PaperResult<UploaderStats>;
}

/// User directory trait: the slice of user state the paper domain touches
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    /// Current badge set, `None` when the user is absent
    async fn find_badges(&self, user_id: &UserId) -> PaperResult<Option<Vec<String>>>;

    /// Replace the stored badge set
    async fn set_badges(&self, user_id: &UserId, badges: &[String]) -> PaperResult<()>;

    /// Name + badges for the badge profile endpoint
    async fn badge_profile(&self, user_id: &UserId) -> PaperResult<Option<BadgeProfile>>;

    /// Students ranked by the requested dimension, descending, top 100.
    /// One aggregate query, never per-user loops.
    async fn leaderboard(&self, kind: LeaderboardKind) -> PaperResult<Vec<LeaderboardEntry>>;
}

// ============================================================================
// Outbound Gateways
// ============================================================================

/// A stored file as reported by the object store
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub url: String,
    pub storage_id: String,
}

/// Scorer verdict plus the text it extracted from the document
#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    pub review: AiReview,
    pub extracted_text: String,
}

impl ScoreOutcome {
    /// Degraded result used when the scorer cannot be reached: score 0
    /// ("not yet verified"), authentic by default, feedback names the
    /// failure. The paper still persists as pending.
    pub fn degraded(reason: &str) -> Self {
        Self {
            review: AiReview {
                authenticity_score: 0.0,
                is_authentic: true,
                feedback: format!("Authenticity check unavailable: {}", reason),
            },
            extracted_text: String::new(),
        }
    }
}

/// Object store gateway trait
#[trait_variant::make(ObjectStore: Send)]
pub trait LocalObjectStore {
    /// Upload file bytes, returning the public URL and storage identifier
    async fn store(&self, bytes: Vec<u8>, file_name: &str)
    -> Result<StoredObject, ObjectStoreError>;
}

/// Authenticity scorer gateway trait
#[trait_variant::make(AuthenticityScorer: Send)]
pub trait LocalAuthenticityScorer {
    /// Submit a stored paper for scoring against the given corpus
    async fn score(
        &self,
        metadata: &PaperMetadata,
        file_url: &str,
        corpus: &[String],
    ) -> Result<ScoreOutcome, ScorerError>;
}
