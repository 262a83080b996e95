//! Domain Value Objects

use std::fmt;

/// Moderation status
///
/// Stored as SMALLINT in the database. Admin endpoints may move any status
/// to any other (re-triage is allowed in both directions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i16)]
pub enum ModerationStatus {
    #[default]
    Pending = 0,
    Approved = 1,
    Rejected = 2,
}

impl ModerationStatus {
    /// Database representation
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// API representation
    pub fn code(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(ModerationStatus::Pending),
            1 => Some(ModerationStatus::Approved),
            2 => Some(ModerationStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, ModerationStatus::Approved)
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Listing sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest first
    #[default]
    Recency,
    /// Most viewed first
    Views,
}

impl SortOrder {
    pub fn from_query(s: &str) -> Self {
        match s {
            "views" => SortOrder::Views,
            _ => SortOrder::Recency,
        }
    }
}

/// What non-admin callers see in the public listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityPolicy {
    /// Everyone sees every paper regardless of status
    Open,
    /// Non-admins see only approved papers with a positive score
    #[default]
    ModeratedOnly,
}

impl VisibilityPolicy {
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "open" => Some(VisibilityPolicy::Open),
            "moderated" => Some(VisibilityPolicy::ModeratedOnly),
            _ => None,
        }
    }
}

/// Which papers feed the scorer's comparison corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorpusPolicy {
    /// Every stored paper with extracted text
    #[default]
    All,
    /// Only papers created before the upload began
    PriorOnly,
}

impl CorpusPolicy {
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "all" => Some(CorpusPolicy::All),
            "prior" => Some(CorpusPolicy::PriorOnly),
            _ => None,
        }
    }
}

/// Leaderboard ranking dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaderboardKind {
    /// Ranked by count of approved papers
    #[default]
    Uploads,
    /// Ranked by aggregate views across approved papers
    Views,
}

impl LeaderboardKind {
    pub fn from_query(s: &str) -> Option<Self> {
        match s {
            "uploads" => Some(LeaderboardKind::Uploads),
            "views" => Some(LeaderboardKind::Views),
            _ => None,
        }
    }
}

/// Listing filter
///
/// `visible_only` is set by the use case from the visibility policy and the
/// caller's role, never directly from request input.
#[derive(Debug, Clone, Default)]
pub struct PaperQuery {
    pub subject: Option<String>,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub sort: SortOrder,
    pub min_score: Option<f64>,
    pub visible_only: bool,
}

/// Partial metadata update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct MetadataPatch {
    pub department: Option<String>,
    pub subject: Option<String>,
    pub year: Option<i32>,
    pub semester: Option<String>,
    pub university: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moderation_status_roundtrip() {
        for status in [
            ModerationStatus::Pending,
            ModerationStatus::Approved,
            ModerationStatus::Rejected,
        ] {
            assert_eq!(ModerationStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(ModerationStatus::from_id(7), None);
    }

    #[test]
    fn test_sort_order_defaults_to_recency() {
        assert_eq!(SortOrder::from_query("views"), SortOrder::Views);
        assert_eq!(SortOrder::from_query("anything"), SortOrder::Recency);
        assert_eq!(SortOrder::from_query(""), SortOrder::Recency);
    }

    #[test]
    fn test_leaderboard_kind_rejects_unknown() {
        assert_eq!(
            LeaderboardKind::from_query("uploads"),
            Some(LeaderboardKind::Uploads)
        );
        assert_eq!(
            LeaderboardKind::from_query("views"),
            Some(LeaderboardKind::Views)
        );
        assert_eq!(LeaderboardKind::from_query("downloads"), None);
    }
}
