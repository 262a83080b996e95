//! Application Layer
//!
//! Use cases and application services.

pub mod award_badges;
pub mod browse_papers;
pub mod config;
pub mod leaderboard;
pub mod manage_paper;
pub mod moderate_paper;
pub mod upload_paper;

// Re-exports
pub use award_badges::AwardBadgesUseCase;
pub use browse_papers::{BrowseFilter, BrowsePapersUseCase};
pub use config::PapersConfig;
pub use leaderboard::{BadgeProfileOutput, LeaderboardUseCase};
pub use manage_paper::ManagePaperUseCase;
pub use moderate_paper::{ApproveOutput, ModeratePaperUseCase};
pub use upload_paper::{UploadPaperInput, UploadPaperUseCase};
