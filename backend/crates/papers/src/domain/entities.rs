//! Domain Entities
//!
//! Core business entities for the paper-sharing domain.

use chrono::{DateTime, Utc};
use kernel::id::{PaperId, UserId};

use crate::domain::value_objects::ModerationStatus;

/// Descriptive metadata supplied by the uploader
#[derive(Debug, Clone)]
pub struct PaperMetadata {
    pub department: String,
    pub subject: String,
    pub year: i32,
    pub semester: String,
    pub university: Option<String>,
}

/// Authenticity review attached to every paper at creation
#[derive(Debug, Clone)]
pub struct AiReview {
    /// 0 means "not yet verified"
    pub authenticity_score: f64,
    pub is_authentic: bool,
    pub feedback: String,
}

/// Paper entity - one uploaded document and its moderation state
#[derive(Debug, Clone)]
pub struct Paper {
    pub paper_id: PaperId,
    pub metadata: PaperMetadata,
    pub file_url: String,
    pub storage_id: String,
    pub uploaded_by: UserId,
    pub status: ModerationStatus,
    pub review: AiReview,
    pub extracted_text: String,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Paper {
    /// Create a new pending paper
    pub fn new(
        metadata: PaperMetadata,
        file_url: String,
        storage_id: String,
        uploaded_by: UserId,
        review: AiReview,
        extracted_text: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            paper_id: PaperId::new(),
            metadata,
            file_url,
            storage_id,
            uploaded_by,
            status: ModerationStatus::Pending,
            review,
            extracted_text,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Paper joined with the uploader's display name for API responses
#[derive(Debug, Clone)]
pub struct PaperWithUploader {
    pub paper: Paper,
    pub uploader_name: String,
}

/// Query-time aggregates over a user's approved papers
#[derive(Debug, Clone, Copy, Default)]
pub struct UploaderStats {
    pub approved_count: i64,
    pub approved_views: i64,
}

/// Leaderboard row: one student with an aggregate score
#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub name: String,
    pub badges: Vec<String>,
    pub score: i64,
}

/// Badge profile: a user's name and earned badge set
#[derive(Debug, Clone)]
pub struct BadgeProfile {
    pub user_id: UserId,
    pub name: String,
    pub badges: Vec<String>,
}
