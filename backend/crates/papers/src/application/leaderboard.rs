//! Leaderboard & Badge Profile Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::{BadgeProfile, LeaderboardEntry, UploaderStats};
use crate::domain::repository::{PaperRepository, UserDirectory};
use crate::domain::value_objects::LeaderboardKind;
use crate::error::{PaperError, PaperResult};

/// Badge profile plus the stats it was computed from
#[derive(Debug)]
pub struct BadgeProfileOutput {
    pub profile: BadgeProfile,
    pub stats: UploaderStats,
}

/// Leaderboard Use Case
pub struct LeaderboardUseCase<R, U>
where
    R: PaperRepository,
    U: UserDirectory,
{
    repo: Arc<R>,
    users: Arc<U>,
}

impl<R, U> LeaderboardUseCase<R, U>
where
    R: PaperRepository,
    U: UserDirectory,
{
    pub fn new(repo: Arc<R>, users: Arc<U>) -> Self {
        Self { repo, users }
    }

    /// Top 100 students by the requested dimension
    pub async fn ranking(&self, kind: LeaderboardKind) -> PaperResult<Vec<LeaderboardEntry>> {
        self.users.leaderboard(kind).await
    }

    pub async fn badge_profile(&self, user_id: UserId) -> PaperResult<BadgeProfileOutput> {
        let profile = self
            .users
            .badge_profile(&user_id)
            .await?
            .ok_or(PaperError::UserNotFound)?;

        let stats = self.repo.approved_stats(&user_id).await?;

        Ok(BadgeProfileOutput { profile, stats })
    }
}
