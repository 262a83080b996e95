//! Unit tests for the papers crate
//!
//! Use cases run against in-memory fakes so the orchestration contracts
//! (abort vs. degrade, badge monotonicity, visibility) are exercised without
//! a database.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use auth::Principal;
use auth::models::UserRole;
use kernel::id::{PaperId, UserId};

use crate::application::config::PapersConfig;
use crate::application::{
    AwardBadgesUseCase, BrowseFilter, BrowsePapersUseCase, ManagePaperUseCase,
    ModeratePaperUseCase, UploadPaperInput, UploadPaperUseCase,
};
use crate::domain::entities::{
    AiReview, BadgeProfile, LeaderboardEntry, Paper, PaperMetadata, PaperWithUploader,
    UploaderStats,
};
use crate::domain::repository::{
    AuthenticityScorer, ObjectStore, PaperRepository, ScoreOutcome, StoredObject, UserDirectory,
};
use crate::domain::services;
use crate::domain::value_objects::{
    CorpusPolicy, LeaderboardKind, MetadataPatch, ModerationStatus, PaperQuery, SortOrder,
    VisibilityPolicy,
};
use crate::error::{ObjectStoreError, PaperError, PaperResult, ScorerError};

// ============================================================================
// Fakes
// ============================================================================

struct FakeUser {
    user_id: UserId,
    name: String,
    is_admin: bool,
    badges: Vec<String>,
}

#[derive(Default)]
struct MemoryRepo {
    papers: Mutex<Vec<Paper>>,
    users: Mutex<Vec<FakeUser>>,
}

impl MemoryRepo {
    fn with_user(name: &str) -> (Arc<Self>, UserId) {
        let repo = Arc::new(Self::default());
        let user_id = repo.add_user(name, false);
        (repo, user_id)
    }

    fn add_user(&self, name: &str, is_admin: bool) -> UserId {
        let user_id = UserId::new();
        self.users.lock().unwrap().push(FakeUser {
            user_id,
            name: name.to_string(),
            is_admin,
            badges: Vec::new(),
        });
        user_id
    }

    fn uploader_name(&self, user_id: &UserId) -> String {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == *user_id)
            .map(|u| u.name.clone())
            .unwrap_or_default()
    }

    fn paper_count(&self) -> usize {
        self.papers.lock().unwrap().len()
    }

    fn with_name(&self, paper: Paper) -> PaperWithUploader {
        let uploader_name = self.uploader_name(&paper.uploaded_by);
        PaperWithUploader {
            paper,
            uploader_name,
        }
    }
}

impl PaperRepository for MemoryRepo {
    async fn create(&self, paper: &Paper) -> PaperResult<()> {
        self.papers.lock().unwrap().push(paper.clone());
        Ok(())
    }

    async fn find_by_id(&self, paper_id: &PaperId) -> PaperResult<Option<PaperWithUploader>> {
        let paper = self
            .papers
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.paper_id == *paper_id)
            .cloned();
        Ok(paper.map(|p| self.with_name(p)))
    }

    async fn list(&self, query: &PaperQuery) -> PaperResult<Vec<PaperWithUploader>> {
        let mut papers: Vec<Paper> = self
            .papers
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                let subject_ok = query.subject.as_deref().is_none_or(|s| {
                    p.metadata
                        .subject
                        .to_lowercase()
                        .contains(&s.to_lowercase())
                });
                let department_ok = query.department.as_deref().is_none_or(|d| {
                    p.metadata
                        .department
                        .to_lowercase()
                        .contains(&d.to_lowercase())
                });
                let year_ok = query.year.is_none_or(|y| p.metadata.year == y);
                let score_ok = query
                    .min_score
                    .is_none_or(|m| p.review.authenticity_score >= m);
                let visible_ok = !query.visible_only
                    || (p.status.is_approved() && p.review.authenticity_score > 0.0);
                subject_ok && department_ok && year_ok && score_ok && visible_ok
            })
            .cloned()
            .collect();

        match query.sort {
            SortOrder::Views => papers.sort_by(|a, b| b.views.cmp(&a.views)),
            SortOrder::Recency => papers.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        Ok(papers.into_iter().map(|p| self.with_name(p)).collect())
    }

    async fn update_metadata(
        &self,
        paper_id: &PaperId,
        patch: &MetadataPatch,
    ) -> PaperResult<Option<PaperWithUploader>> {
        let mut papers = self.papers.lock().unwrap();
        let Some(paper) = papers.iter_mut().find(|p| p.paper_id == *paper_id) else {
            return Ok(None);
        };
        if let Some(v) = &patch.department {
            paper.metadata.department = v.clone();
        }
        if let Some(v) = &patch.subject {
            paper.metadata.subject = v.clone();
        }
        if let Some(v) = patch.year {
            paper.metadata.year = v;
        }
        if let Some(v) = &patch.semester {
            paper.metadata.semester = v.clone();
        }
        if let Some(v) = &patch.university {
            paper.metadata.university = Some(v.clone());
        }
        paper.updated_at = Utc::now();
        let updated = paper.clone();
        drop(papers);
        Ok(Some(self.with_name(updated)))
    }

    async fn delete(&self, paper_id: &PaperId) -> PaperResult<bool> {
        let mut papers = self.papers.lock().unwrap();
        let before = papers.len();
        papers.retain(|p| p.paper_id != *paper_id);
        Ok(papers.len() < before)
    }

    async fn increment_views(&self, paper_id: &PaperId) -> PaperResult<Option<PaperWithUploader>> {
        let mut papers = self.papers.lock().unwrap();
        let Some(paper) = papers.iter_mut().find(|p| p.paper_id == *paper_id) else {
            return Ok(None);
        };
        paper.views += 1;
        paper.updated_at = Utc::now();
        let updated = paper.clone();
        drop(papers);
        Ok(Some(self.with_name(updated)))
    }

    async fn set_status(
        &self,
        paper_id: &PaperId,
        status: ModerationStatus,
    ) -> PaperResult<Option<PaperWithUploader>> {
        let mut papers = self.papers.lock().unwrap();
        let Some(paper) = papers.iter_mut().find(|p| p.paper_id == *paper_id) else {
            return Ok(None);
        };
        paper.status = status;
        paper.updated_at = Utc::now();
        let updated = paper.clone();
        drop(papers);
        Ok(Some(self.with_name(updated)))
    }

    async fn corpus_texts(&self, before: Option<DateTime<Utc>>) -> PaperResult<Vec<String>> {
        Ok(self
            .papers
            .lock()
            .unwrap()
            .iter()
            .filter(|p| !p.extracted_text.is_empty())
            .filter(|p| before.is_none_or(|cutoff| p.created_at < cutoff))
            .map(|p| p.extracted_text.clone())
            .collect())
    }

    async fn approved_stats(&self, user_id: &UserId) -> PaperResult<UploaderStats> {
        let papers = self.papers.lock().unwrap();
        let approved = papers
            .iter()
            .filter(|p| p.uploaded_by == *user_id && p.status.is_approved());
        let mut stats = UploaderStats::default();
        for p in approved {
            stats.approved_count += 1;
            stats.approved_views += p.views;
        }
        Ok(stats)
    }
}

impl UserDirectory for MemoryRepo {
    async fn find_badges(&self, user_id: &UserId) -> PaperResult<Option<Vec<String>>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == *user_id)
            .map(|u| u.badges.clone()))
    }

    async fn set_badges(&self, user_id: &UserId, badges: &[String]) -> PaperResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.user_id == *user_id) {
            user.badges = badges.to_vec();
        }
        Ok(())
    }

    async fn badge_profile(&self, user_id: &UserId) -> PaperResult<Option<BadgeProfile>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == *user_id)
            .map(|u| BadgeProfile {
                user_id: u.user_id,
                name: u.name.clone(),
                badges: u.badges.clone(),
            }))
    }

    async fn leaderboard(&self, kind: LeaderboardKind) -> PaperResult<Vec<LeaderboardEntry>> {
        let users = self.users.lock().unwrap();
        let papers = self.papers.lock().unwrap();
        let mut entries: Vec<LeaderboardEntry> = users
            .iter()
            .filter(|u| !u.is_admin)
            .map(|u| {
                let approved = papers
                    .iter()
                    .filter(|p| p.uploaded_by == u.user_id && p.status.is_approved());
                let score = match kind {
                    LeaderboardKind::Uploads => approved.count() as i64,
                    LeaderboardKind::Views => approved.map(|p| p.views).sum(),
                };
                LeaderboardEntry {
                    user_id: u.user_id,
                    name: u.name.clone(),
                    badges: u.badges.clone(),
                    score,
                }
            })
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(100);
        Ok(entries)
    }
}

#[derive(Default)]
struct FakeStore {
    fail: bool,
    calls: AtomicUsize,
}

impl ObjectStore for FakeStore {
    async fn store(
        &self,
        _bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<StoredObject, ObjectStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ObjectStoreError::Unconfigured);
        }
        Ok(StoredObject {
            url: format!("https://files.example/campuspapers/{}", file_name),
            storage_id: format!("campuspapers/{}", file_name),
        })
    }
}

enum FakeScorer {
    Succeed { score: f64 },
    Fail,
}

impl AuthenticityScorer for FakeScorer {
    async fn score(
        &self,
        _metadata: &PaperMetadata,
        _file_url: &str,
        corpus: &[String],
    ) -> Result<ScoreOutcome, ScorerError> {
        match self {
            FakeScorer::Succeed { score } => Ok(ScoreOutcome {
                review: AiReview {
                    authenticity_score: *score,
                    is_authentic: *score >= 50.0,
                    feedback: format!("Compared against {} texts", corpus.len()),
                },
                extracted_text: "lorem ipsum".to_string(),
            }),
            FakeScorer::Fail => Err(ScorerError::Timeout),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn upload_input() -> UploadPaperInput {
    UploadPaperInput {
        department: "CSE".to_string(),
        subject: "Operating Systems".to_string(),
        year: Some(2024),
        semester: "Fall".to_string(),
        university: Some("State University".to_string()),
        file_name: "os-final.pdf".to_string(),
        file_bytes: vec![1, 2, 3, 4],
    }
}

fn seed_paper(repo: &MemoryRepo, uploader: UserId, status: ModerationStatus, score: f64) -> Paper {
    let mut paper = Paper::new(
        PaperMetadata {
            department: "CSE".to_string(),
            subject: "Databases".to_string(),
            year: 2023,
            semester: "Spring".to_string(),
            university: None,
        },
        "https://files.example/x.pdf".to_string(),
        "campuspapers/x.pdf".to_string(),
        uploader,
        AiReview {
            authenticity_score: score,
            is_authentic: true,
            feedback: "ok".to_string(),
        },
        "seed text".to_string(),
    );
    paper.status = status;
    repo.papers.lock().unwrap().push(paper.clone());
    paper
}

fn student_principal(user_id: UserId) -> Principal {
    Principal {
        user_id,
        role: UserRole::Student,
        name: "Student".to_string(),
        email: "student@campus.edu".to_string(),
    }
}

fn admin_principal() -> Principal {
    Principal {
        user_id: UserId::new(),
        role: UserRole::Admin,
        name: "Admin".to_string(),
        email: "admin@campus.edu".to_string(),
    }
}

fn upload_use_case(
    repo: Arc<MemoryRepo>,
    store: Arc<FakeStore>,
    scorer: Arc<FakeScorer>,
) -> UploadPaperUseCase<MemoryRepo, FakeStore, FakeScorer> {
    UploadPaperUseCase::new(repo, store, scorer, Arc::new(PapersConfig::default()))
}

// ============================================================================
// Upload Pipeline
// ============================================================================

#[cfg(test)]
mod upload_tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_happy_path() {
        let (repo, user_id) = MemoryRepo::with_user("Asha");
        let store = Arc::new(FakeStore::default());
        let use_case = upload_use_case(
            repo.clone(),
            store.clone(),
            Arc::new(FakeScorer::Succeed { score: 88.0 }),
        );

        let record = use_case.execute(user_id, upload_input()).await.unwrap();

        assert_eq!(record.paper.status, ModerationStatus::Pending);
        assert_eq!(record.paper.views, 0);
        assert_eq!(record.paper.review.authenticity_score, 88.0);
        assert_eq!(record.paper.extracted_text, "lorem ipsum");
        assert_eq!(record.uploader_name, "Asha");
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(repo.paper_count(), 1);
    }

    #[tokio::test]
    async fn test_upload_validation_has_no_side_effects() {
        let (repo, user_id) = MemoryRepo::with_user("Asha");
        let store = Arc::new(FakeStore::default());
        let use_case = upload_use_case(
            repo.clone(),
            store.clone(),
            Arc::new(FakeScorer::Succeed { score: 88.0 }),
        );

        let mut input = upload_input();
        input.subject = "  ".to_string();

        let err = use_case.execute(user_id, input).await.unwrap_err();
        assert!(matches!(err, PaperError::MissingField("subject")));
        // Nothing stored, nothing persisted
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
        assert_eq!(repo.paper_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_requires_file() {
        let (repo, user_id) = MemoryRepo::with_user("Asha");
        let store = Arc::new(FakeStore::default());
        let use_case = upload_use_case(
            repo.clone(),
            store.clone(),
            Arc::new(FakeScorer::Succeed { score: 88.0 }),
        );

        let mut input = upload_input();
        input.file_bytes = Vec::new();

        let err = use_case.execute(user_id, input).await.unwrap_err();
        assert!(matches!(err, PaperError::MissingFile));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_failure_aborts_upload() {
        let (repo, user_id) = MemoryRepo::with_user("Asha");
        let store = Arc::new(FakeStore {
            fail: true,
            calls: AtomicUsize::new(0),
        });
        let use_case = upload_use_case(
            repo.clone(),
            store,
            Arc::new(FakeScorer::Succeed { score: 88.0 }),
        );

        let err = use_case.execute(user_id, upload_input()).await.unwrap_err();
        assert!(matches!(err, PaperError::ObjectStore(_)));
        assert_eq!(repo.paper_count(), 0);
    }

    #[tokio::test]
    async fn test_scorer_failure_degrades_but_persists() {
        let (repo, user_id) = MemoryRepo::with_user("Asha");
        let use_case = upload_use_case(
            repo.clone(),
            Arc::new(FakeStore::default()),
            Arc::new(FakeScorer::Fail),
        );

        let record = use_case.execute(user_id, upload_input()).await.unwrap();

        assert_eq!(record.paper.status, ModerationStatus::Pending);
        assert_eq!(record.paper.review.authenticity_score, 0.0);
        assert!(record.paper.review.is_authentic);
        assert!(record.paper.review.feedback.contains("scorer timed out"));
        assert!(record.paper.extracted_text.is_empty());
    }

    #[tokio::test]
    async fn test_corpus_fed_from_existing_texts() {
        let (repo, user_id) = MemoryRepo::with_user("Asha");
        seed_paper(&repo, user_id, ModerationStatus::Approved, 90.0);
        seed_paper(&repo, user_id, ModerationStatus::Pending, 80.0);

        let use_case = upload_use_case(
            repo.clone(),
            Arc::new(FakeStore::default()),
            Arc::new(FakeScorer::Succeed { score: 70.0 }),
        );

        let record = use_case.execute(user_id, upload_input()).await.unwrap();
        // The fake echoes the corpus size it was given
        assert!(record.paper.review.feedback.contains("2 texts"));
    }
}

// ============================================================================
// Badge Evaluation
// ============================================================================

#[cfg(test)]
mod badge_tests {
    use super::*;

    #[tokio::test]
    async fn test_approval_awards_first_upload() {
        let (repo, user_id) = MemoryRepo::with_user("Asha");
        let paper = seed_paper(&repo, user_id, ModerationStatus::Pending, 75.0);

        let use_case = ModeratePaperUseCase::new(repo.clone(), repo.clone());
        let output = use_case.approve(paper.paper_id).await.unwrap();

        assert_eq!(output.paper.paper.status, ModerationStatus::Approved);
        assert_eq!(output.awarded_badges, vec![services::FIRST_UPLOAD]);

        let badges = repo.find_badges(&user_id).await.unwrap().unwrap();
        assert_eq!(badges, vec![services::FIRST_UPLOAD]);
    }

    #[tokio::test]
    async fn test_repeat_approval_is_idempotent() {
        let (repo, user_id) = MemoryRepo::with_user("Asha");
        let paper = seed_paper(&repo, user_id, ModerationStatus::Pending, 75.0);

        let use_case = ModeratePaperUseCase::new(repo.clone(), repo.clone());
        use_case.approve(paper.paper_id).await.unwrap();
        let second = use_case.approve(paper.paper_id).await.unwrap();

        assert!(second.awarded_badges.is_empty());
        let badges = repo.find_badges(&user_id).await.unwrap().unwrap();
        assert_eq!(badges.len(), 1);
    }

    #[tokio::test]
    async fn test_reject_never_awards() {
        let (repo, user_id) = MemoryRepo::with_user("Asha");
        let paper = seed_paper(&repo, user_id, ModerationStatus::Pending, 75.0);

        let use_case = ModeratePaperUseCase::new(repo.clone(), repo.clone());
        let record = use_case.reject(paper.paper_id).await.unwrap();

        assert_eq!(record.paper.status, ModerationStatus::Rejected);
        let badges = repo.find_badges(&user_id).await.unwrap().unwrap();
        assert!(badges.is_empty());
    }

    #[tokio::test]
    async fn test_contributor_tier_at_ten_approvals() {
        let (repo, user_id) = MemoryRepo::with_user("Asha");
        for _ in 0..9 {
            seed_paper(&repo, user_id, ModerationStatus::Approved, 75.0);
        }
        let tenth = seed_paper(&repo, user_id, ModerationStatus::Pending, 75.0);

        let use_case = ModeratePaperUseCase::new(repo.clone(), repo.clone());
        let output = use_case.approve(tenth.paper_id).await.unwrap();

        assert!(output
            .awarded_badges
            .iter()
            .any(|b| b == services::TEN_UPLOADS));
        assert!(output
            .awarded_badges
            .iter()
            .any(|b| b == services::QUALITY_CONTRIBUTOR));
    }

    #[tokio::test]
    async fn test_recompute_for_missing_user_is_noop() {
        let repo = Arc::new(MemoryRepo::default());
        let use_case = AwardBadgesUseCase::new(repo.clone(), repo.clone());

        let added = use_case.recompute(&UserId::new()).await.unwrap();
        assert!(added.is_empty());
    }
}

// ============================================================================
// Browsing & Visibility
// ============================================================================

#[cfg(test)]
mod browse_tests {
    use super::*;

    fn browse(
        repo: Arc<MemoryRepo>,
        policy: VisibilityPolicy,
    ) -> BrowsePapersUseCase<MemoryRepo> {
        BrowsePapersUseCase::new(
            repo,
            Arc::new(PapersConfig::new(policy, CorpusPolicy::All)),
        )
    }

    #[tokio::test]
    async fn test_moderated_policy_hides_unapproved_from_students() {
        let (repo, user_id) = MemoryRepo::with_user("Asha");
        seed_paper(&repo, user_id, ModerationStatus::Approved, 90.0);
        seed_paper(&repo, user_id, ModerationStatus::Pending, 80.0);
        seed_paper(&repo, user_id, ModerationStatus::Approved, 0.0);

        let use_case = browse(repo.clone(), VisibilityPolicy::ModeratedOnly);

        let visible = use_case.list(BrowseFilter::default(), false).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert!(visible[0].paper.status.is_approved());

        // Admins see everything
        let all = use_case.list(BrowseFilter::default(), true).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_open_policy_shows_everything() {
        let (repo, user_id) = MemoryRepo::with_user("Asha");
        seed_paper(&repo, user_id, ModerationStatus::Pending, 0.0);
        seed_paper(&repo, user_id, ModerationStatus::Rejected, 40.0);

        let use_case = browse(repo.clone(), VisibilityPolicy::Open);

        let visible = use_case.list(BrowseFilter::default(), false).await.unwrap();
        assert_eq!(visible.len(), 2);
    }

    #[tokio::test]
    async fn test_filters_apply_case_insensitively() {
        let (repo, user_id) = MemoryRepo::with_user("Asha");
        seed_paper(&repo, user_id, ModerationStatus::Approved, 90.0);

        let use_case = browse(repo.clone(), VisibilityPolicy::Open);

        let filter = BrowseFilter {
            subject: Some("dataBASES".to_string()),
            ..BrowseFilter::default()
        };
        assert_eq!(use_case.list(filter, false).await.unwrap().len(), 1);

        let filter = BrowseFilter {
            subject: Some("chemistry".to_string()),
            ..BrowseFilter::default()
        };
        assert!(use_case.list(filter, false).await.unwrap().is_empty());

        let filter = BrowseFilter {
            year: Some(1999),
            ..BrowseFilter::default()
        };
        assert!(use_case.list(filter, false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_download_bumps_views() {
        let (repo, user_id) = MemoryRepo::with_user("Asha");
        let paper = seed_paper(&repo, user_id, ModerationStatus::Approved, 90.0);

        let use_case = browse(repo.clone(), VisibilityPolicy::Open);

        let first = use_case.record_download(paper.paper_id).await.unwrap();
        assert_eq!(first.paper.views, 1);
        let second = use_case.record_download(paper.paper_id).await.unwrap();
        assert_eq!(second.paper.views, 2);

        let err = use_case.record_download(PaperId::new()).await.unwrap_err();
        assert!(matches!(err, PaperError::NotFound));
    }
}

// ============================================================================
// Ownership
// ============================================================================

#[cfg(test)]
mod ownership_tests {
    use super::*;

    #[tokio::test]
    async fn test_only_owner_or_admin_may_delete() {
        let (repo, owner_id) = MemoryRepo::with_user("Asha");
        let stranger_id = repo.add_user("Bram", false);
        let paper = seed_paper(&repo, owner_id, ModerationStatus::Approved, 90.0);

        let use_case = ManagePaperUseCase::new(repo.clone());

        let err = use_case
            .delete(&student_principal(stranger_id), paper.paper_id)
            .await
            .unwrap_err();
        assert!(matches!(err, PaperError::Forbidden));
        assert_eq!(repo.paper_count(), 1);

        use_case
            .delete(&student_principal(owner_id), paper.paper_id)
            .await
            .unwrap();
        assert_eq!(repo.paper_count(), 0);

        // Admin may delete someone else's paper
        let other = seed_paper(&repo, owner_id, ModerationStatus::Pending, 10.0);
        use_case
            .delete(&admin_principal(), other.paper_id)
            .await
            .unwrap();
        assert_eq!(repo.paper_count(), 0);
    }

    #[tokio::test]
    async fn test_update_patches_metadata_only() {
        let (repo, owner_id) = MemoryRepo::with_user("Asha");
        let paper = seed_paper(&repo, owner_id, ModerationStatus::Approved, 90.0);

        let use_case = ManagePaperUseCase::new(repo.clone());

        let patch = MetadataPatch {
            subject: Some("Distributed Systems".to_string()),
            ..MetadataPatch::default()
        };
        let updated = use_case
            .update(&student_principal(owner_id), paper.paper_id, patch)
            .await
            .unwrap();

        assert_eq!(updated.paper.metadata.subject, "Distributed Systems");
        // Untouched fields keep their values
        assert_eq!(updated.paper.metadata.department, "CSE");
        assert_eq!(updated.paper.status, ModerationStatus::Approved);
        assert_eq!(updated.paper.review.authenticity_score, 90.0);
    }

    #[tokio::test]
    async fn test_update_missing_paper_is_not_found() {
        let (repo, owner_id) = MemoryRepo::with_user("Asha");
        let use_case = ManagePaperUseCase::new(repo.clone());

        let err = use_case
            .update(
                &student_principal(owner_id),
                PaperId::new(),
                MetadataPatch::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PaperError::NotFound));
    }
}

// ============================================================================
// Leaderboard
// ============================================================================

#[cfg(test)]
mod leaderboard_tests {
    use super::*;
    use crate::application::LeaderboardUseCase;

    #[tokio::test]
    async fn test_ranking_orders_by_approved_uploads() {
        let repo = Arc::new(MemoryRepo::default());
        let prolific = repo.add_user("Prolific", false);
        let casual = repo.add_user("Casual", false);
        let admin = repo.add_user("Moderator", true);

        for _ in 0..3 {
            seed_paper(&repo, prolific, ModerationStatus::Approved, 90.0);
        }
        seed_paper(&repo, casual, ModerationStatus::Approved, 90.0);
        seed_paper(&repo, casual, ModerationStatus::Pending, 90.0);
        seed_paper(&repo, admin, ModerationStatus::Approved, 90.0);

        let use_case = LeaderboardUseCase::new(repo.clone(), repo.clone());
        let entries = use_case.ranking(LeaderboardKind::Uploads).await.unwrap();

        // Admins are excluded; pending papers do not count
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Prolific");
        assert_eq!(entries[0].score, 3);
        assert_eq!(entries[1].score, 1);
    }

    #[tokio::test]
    async fn test_ranking_by_views_sums_approved_only() {
        let repo = Arc::new(MemoryRepo::default());
        let user_id = repo.add_user("Asha", false);

        let approved = seed_paper(&repo, user_id, ModerationStatus::Approved, 90.0);
        let pending = seed_paper(&repo, user_id, ModerationStatus::Pending, 90.0);
        {
            let mut papers = repo.papers.lock().unwrap();
            papers
                .iter_mut()
                .find(|p| p.paper_id == approved.paper_id)
                .unwrap()
                .views = 120;
            papers
                .iter_mut()
                .find(|p| p.paper_id == pending.paper_id)
                .unwrap()
                .views = 999;
        }

        let use_case = LeaderboardUseCase::new(repo.clone(), repo.clone());
        let entries = use_case.ranking(LeaderboardKind::Views).await.unwrap();

        assert_eq!(entries[0].score, 120);
    }

    #[tokio::test]
    async fn test_badge_profile_includes_stats() {
        let repo = Arc::new(MemoryRepo::default());
        let user_id = repo.add_user("Asha", false);
        let paper = seed_paper(&repo, user_id, ModerationStatus::Approved, 90.0);
        repo.papers
            .lock()
            .unwrap()
            .iter_mut()
            .find(|p| p.paper_id == paper.paper_id)
            .unwrap()
            .views = 42;

        let use_case = LeaderboardUseCase::new(repo.clone(), repo.clone());
        let output = use_case.badge_profile(user_id).await.unwrap();

        assert_eq!(output.profile.name, "Asha");
        assert_eq!(output.stats.approved_count, 1);
        assert_eq!(output.stats.approved_views, 42);

        let err = use_case.badge_profile(UserId::new()).await.unwrap_err();
        assert!(matches!(err, PaperError::UserNotFound));
    }
}
