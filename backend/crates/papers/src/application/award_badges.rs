//! Award Badges Use Case
//!
//! Recomputes a user's badge set from their approved-paper stats and unions
//! the earned tags into the stored set. Idempotent; persists only on change.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::{PaperRepository, UserDirectory};
use crate::domain::services::{earned_badges, merge_badge_tags};
use crate::error::PaperResult;

/// Award Badges Use Case
pub struct AwardBadgesUseCase<R, U>
where
    R: PaperRepository,
    U: UserDirectory,
{
    repo: Arc<R>,
    users: Arc<U>,
}

impl<R, U> AwardBadgesUseCase<R, U>
where
    R: PaperRepository,
    U: UserDirectory,
{
    pub fn new(repo: Arc<R>, users: Arc<U>) -> Self {
        Self { repo, users }
    }

    /// Returns the newly-added tags, empty when nothing changed.
    /// A missing user is a no-op.
    pub async fn recompute(&self, user_id: &UserId) -> PaperResult<Vec<String>> {
        let Some(mut badges) = self.users.find_badges(user_id).await? else {
            return Ok(Vec::new());
        };

        let stats = self.repo.approved_stats(user_id).await?;
        let earned = earned_badges(&stats);

        let added = merge_badge_tags(&mut badges, &earned);

        if !added.is_empty() {
            self.users.set_badges(user_id, &badges).await?;

            tracing::info!(
                user_id = %user_id,
                added = ?added,
                "Awarded badges"
            );
        }

        Ok(added)
    }
}
