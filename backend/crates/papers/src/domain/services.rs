//! Domain Services
//!
//! Pure badge rules. Badges are monotonic: once earned they are never
//! revoked, so the evaluator only ever unions new tags into the stored set.

use crate::domain::entities::UploaderStats;

pub const FIRST_UPLOAD: &str = "first_upload";
pub const TEN_UPLOADS: &str = "ten_uploads";
pub const FIFTY_UPLOADS: &str = "fifty_uploads";
pub const HUNDRED_UPLOADS: &str = "hundred_uploads";
pub const POPULAR: &str = "popular";
pub const QUALITY_CONTRIBUTOR: &str = "quality_contributor";
pub const TOP_CONTRIBUTOR: &str = "top_contributor";

/// Human-readable badge name, `None` for unknown tags
pub fn badge_display_name(tag: &str) -> Option<&'static str> {
    match tag {
        FIRST_UPLOAD => Some("First Upload"),
        TEN_UPLOADS => Some("Contributor"),
        FIFTY_UPLOADS => Some("Active Contributor"),
        HUNDRED_UPLOADS => Some("Super Contributor"),
        POPULAR => Some("Popular"),
        QUALITY_CONTRIBUTOR => Some("Quality Contributor"),
        TOP_CONTRIBUTOR => Some("Top Contributor"),
        _ => None,
    }
}

/// Compute the full badge set a user's current stats entitle them to
pub fn earned_badges(stats: &UploaderStats) -> Vec<&'static str> {
    let mut earned = Vec::new();

    if stats.approved_count >= 1 {
        earned.push(FIRST_UPLOAD);
    }
    if stats.approved_count >= 10 {
        earned.push(TEN_UPLOADS);
        earned.push(QUALITY_CONTRIBUTOR);
    }
    if stats.approved_count >= 50 {
        earned.push(FIFTY_UPLOADS);
        earned.push(TOP_CONTRIBUTOR);
    }
    if stats.approved_count >= 100 {
        earned.push(HUNDRED_UPLOADS);
    }
    if stats.approved_views >= 1000 {
        earned.push(POPULAR);
    }

    earned
}

/// Union `earned` into `current`, preserving existing order.
/// Returns the tags that were actually new.
pub fn merge_badge_tags(current: &mut Vec<String>, earned: &[&str]) -> Vec<String> {
    let mut added = Vec::new();
    for tag in earned {
        if !current.iter().any(|b| b == tag) {
            current.push((*tag).to_string());
            added.push((*tag).to_string());
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(approved_count: i64, approved_views: i64) -> UploaderStats {
        UploaderStats {
            approved_count,
            approved_views,
        }
    }

    #[test]
    fn test_empty_stats_earn_nothing() {
        assert!(earned_badges(&stats(0, 0)).is_empty());
    }

    #[test]
    fn test_popular_keys_on_view_volume_alone() {
        // The popular rule reads only the aggregate view count
        assert!(earned_badges(&stats(0, 5000)).contains(&POPULAR));
    }

    #[test]
    fn test_first_upload_at_one() {
        assert_eq!(earned_badges(&stats(1, 0)), vec![FIRST_UPLOAD]);
    }

    #[test]
    fn test_tier_at_ten() {
        let earned = earned_badges(&stats(10, 0));
        assert!(earned.contains(&FIRST_UPLOAD));
        assert!(earned.contains(&TEN_UPLOADS));
        assert!(earned.contains(&QUALITY_CONTRIBUTOR));
        assert!(!earned.contains(&FIFTY_UPLOADS));
    }

    #[test]
    fn test_tier_boundaries() {
        assert!(!earned_badges(&stats(9, 0)).contains(&TEN_UPLOADS));
        assert!(!earned_badges(&stats(49, 0)).contains(&FIFTY_UPLOADS));
        assert!(earned_badges(&stats(50, 0)).contains(&TOP_CONTRIBUTOR));
        assert!(earned_badges(&stats(100, 0)).contains(&HUNDRED_UPLOADS));
    }

    #[test]
    fn test_popular_at_thousand_views() {
        assert!(!earned_badges(&stats(1, 999)).contains(&POPULAR));
        assert!(earned_badges(&stats(1, 1000)).contains(&POPULAR));
    }

    #[test]
    fn test_merge_is_monotonic() {
        let mut current = vec![FIRST_UPLOAD.to_string(), "legacy_badge".to_string()];

        let added = merge_badge_tags(&mut current, &[FIRST_UPLOAD, TEN_UPLOADS]);
        assert_eq!(added, vec![TEN_UPLOADS.to_string()]);
        // Nothing is ever removed
        assert!(current.iter().any(|b| b == "legacy_badge"));

        // Second merge with the same input is a no-op
        let added = merge_badge_tags(&mut current, &[FIRST_UPLOAD, TEN_UPLOADS]);
        assert!(added.is_empty());
        assert_eq!(current.len(), 3);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(badge_display_name(TEN_UPLOADS), Some("Contributor"));
        assert_eq!(badge_display_name("nonsense"), None);
    }
}
