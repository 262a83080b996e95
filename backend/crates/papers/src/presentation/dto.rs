//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{LeaderboardEntry, PaperWithUploader, UploaderStats};
use crate::domain::value_objects::MetadataPatch;

// ============================================================================
// Paper Views
// ============================================================================

/// Uploader reference embedded in paper responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploaderRef {
    pub id: String,
    pub name: String,
}

/// Authenticity review as exposed over the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResultView {
    pub is_authentic: bool,
    pub authenticity_score: f64,
    pub ai_feedback: String,
}

/// Paper response body. Storage identifier and extracted text stay internal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperView {
    pub id: String,
    pub department: String,
    pub subject: String,
    pub year: i32,
    pub semester: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    pub file_url: String,
    pub uploaded_by: UploaderRef,
    pub status: String,
    pub ai_result: AiResultView,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PaperWithUploader> for PaperView {
    fn from(record: &PaperWithUploader) -> Self {
        let paper = &record.paper;
        Self {
            id: paper.paper_id.to_string(),
            department: paper.metadata.department.clone(),
            subject: paper.metadata.subject.clone(),
            year: paper.metadata.year,
            semester: paper.metadata.semester.clone(),
            university: paper.metadata.university.clone(),
            file_url: paper.file_url.clone(),
            uploaded_by: UploaderRef {
                id: paper.uploaded_by.to_string(),
                name: record.uploader_name.clone(),
            },
            status: paper.status.code().to_string(),
            ai_result: AiResultView {
                is_authentic: paper.review.is_authentic,
                authenticity_score: paper.review.authenticity_score,
                ai_feedback: paper.review.feedback.clone(),
            },
            views: paper.views,
            created_at: paper.created_at,
            updated_at: paper.updated_at,
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Listing query parameters
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListPapersParams {
    pub subject: Option<String>,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub sort: Option<String>,
}

/// Admin listing query parameters
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdminPapersParams {
    pub min_score: Option<f64>,
}

/// Leaderboard query parameters
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LeaderboardParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Metadata update request. Absent fields stay unchanged.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaperRequest {
    pub department: Option<String>,
    pub subject: Option<String>,
    pub year: Option<i32>,
    pub semester: Option<String>,
    pub university: Option<String>,
}

impl From<UpdatePaperRequest> for MetadataPatch {
    fn from(req: UpdatePaperRequest) -> Self {
        Self {
            department: req.department,
            subject: req.subject,
            year: req.year,
            semester: req.semester,
            university: req.university,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Approve response: the paper plus badges the approval unlocked
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveResponse {
    pub paper: PaperView,
    pub awarded_badges: Vec<String>,
}

/// Leaderboard row response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryView {
    pub id: String,
    pub name: String,
    pub badges: Vec<String>,
    pub score: i64,
}

impl From<&LeaderboardEntry> for LeaderboardEntryView {
    fn from(entry: &LeaderboardEntry) -> Self {
        Self {
            id: entry.user_id.to_string(),
            name: entry.name.clone(),
            badges: entry.badges.clone(),
            score: entry.score,
        }
    }
}

/// Badge profile stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatsView {
    pub approved_papers: i64,
    pub total_views: i64,
}

impl From<UploaderStats> for BadgeStatsView {
    fn from(stats: UploaderStats) -> Self {
        Self {
            approved_papers: stats.approved_count,
            total_views: stats.approved_views,
        }
    }
}

/// Badge profile response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeProfileResponse {
    pub id: String,
    pub name: String,
    pub badges: Vec<String>,
    pub stats: BadgeStatsView,
}
