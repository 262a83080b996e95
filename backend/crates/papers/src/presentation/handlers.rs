//! HTTP Handlers

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;
use uuid::Uuid;

use auth::Principal;
use auth::middleware::MaybePrincipal;
use kernel::id::{PaperId, UserId};

use crate::application::config::PapersConfig;
use crate::application::{
    BrowseFilter, BrowsePapersUseCase, LeaderboardUseCase, ManagePaperUseCase,
    ModeratePaperUseCase, UploadPaperInput, UploadPaperUseCase,
};
use crate::domain::repository::{AuthenticityScorer, ObjectStore, PaperRepository, UserDirectory};
use crate::domain::value_objects::{LeaderboardKind, SortOrder};
use crate::error::{PaperError, PaperResult};
use crate::presentation::dto::{
    AdminPapersParams, ApproveResponse, BadgeProfileResponse, LeaderboardEntryView,
    LeaderboardParams, ListPapersParams, PaperView, UpdatePaperRequest,
};

/// Shared state for paper handlers
#[derive(Clone)]
pub struct PapersAppState<R, O, S>
where
    R: PaperRepository + UserDirectory + Clone + Send + Sync + 'static,
    O: ObjectStore + Clone + Send + Sync + 'static,
    S: AuthenticityScorer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub store: Arc<O>,
    pub scorer: Arc<S>,
    pub config: Arc<PapersConfig>,
}

fn parse_paper_id(id: &str) -> PaperResult<PaperId> {
    Uuid::parse_str(id)
        .map(PaperId::from_uuid)
        .map_err(|_| PaperError::NotFound)
}

// ============================================================================
// Public Browsing
// ============================================================================

/// GET /api/papers
pub async fn list_papers<R, O, S>(
    State(state): State<PapersAppState<R, O, S>>,
    Extension(MaybePrincipal(principal)): Extension<MaybePrincipal>,
    Query(params): Query<ListPapersParams>,
) -> PaperResult<Json<Vec<PaperView>>>
where
    R: PaperRepository + UserDirectory + Clone + Send + Sync + 'static,
    O: ObjectStore + Clone + Send + Sync + 'static,
    S: AuthenticityScorer + Clone + Send + Sync + 'static,
{
    let use_case = BrowsePapersUseCase::new(state.repo.clone(), state.config.clone());

    let filter = BrowseFilter {
        subject: params.subject,
        department: params.department,
        year: params.year,
        sort: params
            .sort
            .as_deref()
            .map(SortOrder::from_query)
            .unwrap_or_default(),
    };

    let is_admin = principal.is_some_and(|p| p.is_admin());

    let records = use_case.list(filter, is_admin).await?;

    Ok(Json(records.iter().map(PaperView::from).collect()))
}

/// GET /api/papers/{id}
pub async fn get_paper<R, O, S>(
    State(state): State<PapersAppState<R, O, S>>,
    Path(id): Path<String>,
) -> PaperResult<Json<PaperView>>
where
    R: PaperRepository + UserDirectory + Clone + Send + Sync + 'static,
    O: ObjectStore + Clone + Send + Sync + 'static,
    S: AuthenticityScorer + Clone + Send + Sync + 'static,
{
    let use_case = BrowsePapersUseCase::new(state.repo.clone(), state.config.clone());

    let record = use_case.get(parse_paper_id(&id)?).await?;

    Ok(Json(PaperView::from(&record)))
}

/// POST /api/papers/{id}/download
pub async fn download_paper<R, O, S>(
    State(state): State<PapersAppState<R, O, S>>,
    Path(id): Path<String>,
) -> PaperResult<Json<PaperView>>
where
    R: PaperRepository + UserDirectory + Clone + Send + Sync + 'static,
    O: ObjectStore + Clone + Send + Sync + 'static,
    S: AuthenticityScorer + Clone + Send + Sync + 'static,
{
    let use_case = BrowsePapersUseCase::new(state.repo.clone(), state.config.clone());

    let record = use_case.record_download(parse_paper_id(&id)?).await?;

    Ok(Json(PaperView::from(&record)))
}

// ============================================================================
// Upload
// ============================================================================

async fn read_upload_form(mut multipart: Multipart) -> PaperResult<UploadPaperInput> {
    let mut input = UploadPaperInput {
        department: String::new(),
        subject: String::new(),
        year: None,
        semester: String::new(),
        university: None,
        file_name: String::new(),
        file_bytes: Vec::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PaperError::InvalidQuery(format!("malformed multipart body: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "department" => input.department = read_text(field).await?,
            "subject" => input.subject = read_text(field).await?,
            "semester" => input.semester = read_text(field).await?,
            "university" => {
                let value = read_text(field).await?;
                if !value.trim().is_empty() {
                    input.university = Some(value);
                }
            }
            "year" => {
                let value = read_text(field).await?;
                input.year = Some(
                    value
                        .trim()
                        .parse()
                        .map_err(|_| PaperError::InvalidQuery("year must be a number".to_string()))?,
                );
            }
            "file" => {
                input.file_name = field.file_name().unwrap_or("upload.pdf").to_string();
                input.file_bytes = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        PaperError::InvalidQuery(format!("malformed multipart body: {}", e))
                    })?
                    .to_vec();
            }
            _ => {}
        }
    }

    Ok(input)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> PaperResult<String> {
    field
        .text()
        .await
        .map_err(|e| PaperError::InvalidQuery(format!("malformed multipart body: {}", e)))
}

/// POST /api/papers/upload
pub async fn upload_paper<R, O, S>(
    State(state): State<PapersAppState<R, O, S>>,
    Extension(principal): Extension<Principal>,
    multipart: Multipart,
) -> PaperResult<Json<PaperView>>
where
    R: PaperRepository + UserDirectory + Clone + Send + Sync + 'static,
    O: ObjectStore + Clone + Send + Sync + 'static,
    S: AuthenticityScorer + Clone + Send + Sync + 'static,
{
    let input = read_upload_form(multipart).await?;

    let use_case = UploadPaperUseCase::new(
        state.repo.clone(),
        state.store.clone(),
        state.scorer.clone(),
        state.config.clone(),
    );

    let record = use_case.execute(principal.user_id, input).await?;

    Ok(Json(PaperView::from(&record)))
}

// ============================================================================
// Owner Management
// ============================================================================

/// PUT /api/papers/{id}
pub async fn update_paper<R, O, S>(
    State(state): State<PapersAppState<R, O, S>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePaperRequest>,
) -> PaperResult<Json<PaperView>>
where
    R: PaperRepository + UserDirectory + Clone + Send + Sync + 'static,
    O: ObjectStore + Clone + Send + Sync + 'static,
    S: AuthenticityScorer + Clone + Send + Sync + 'static,
{
    let use_case = ManagePaperUseCase::new(state.repo.clone());

    let record = use_case
        .update(&principal, parse_paper_id(&id)?, req.into())
        .await?;

    Ok(Json(PaperView::from(&record)))
}

/// DELETE /api/papers/{id}
pub async fn delete_paper<R, O, S>(
    State(state): State<PapersAppState<R, O, S>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> PaperResult<StatusCode>
where
    R: PaperRepository + UserDirectory + Clone + Send + Sync + 'static,
    O: ObjectStore + Clone + Send + Sync + 'static,
    S: AuthenticityScorer + Clone + Send + Sync + 'static,
{
    let use_case = ManagePaperUseCase::new(state.repo.clone());

    use_case.delete(&principal, parse_paper_id(&id)?).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Admin Moderation
// ============================================================================

/// GET /api/admin/papers
pub async fn admin_list_papers<R, O, S>(
    State(state): State<PapersAppState<R, O, S>>,
    Query(params): Query<AdminPapersParams>,
) -> PaperResult<Json<Vec<PaperView>>>
where
    R: PaperRepository + UserDirectory + Clone + Send + Sync + 'static,
    O: ObjectStore + Clone + Send + Sync + 'static,
    S: AuthenticityScorer + Clone + Send + Sync + 'static,
{
    let use_case = ModeratePaperUseCase::new(state.repo.clone(), state.repo.clone());

    let records = use_case.list(params.min_score).await?;

    Ok(Json(records.iter().map(PaperView::from).collect()))
}

/// PUT /api/admin/papers/{id}/approve
pub async fn approve_paper<R, O, S>(
    State(state): State<PapersAppState<R, O, S>>,
    Path(id): Path<String>,
) -> PaperResult<Json<ApproveResponse>>
where
    R: PaperRepository + UserDirectory + Clone + Send + Sync + 'static,
    O: ObjectStore + Clone + Send + Sync + 'static,
    S: AuthenticityScorer + Clone + Send + Sync + 'static,
{
    let use_case = ModeratePaperUseCase::new(state.repo.clone(), state.repo.clone());

    let output = use_case.approve(parse_paper_id(&id)?).await?;

    Ok(Json(ApproveResponse {
        paper: PaperView::from(&output.paper),
        awarded_badges: output.awarded_badges,
    }))
}

/// PUT /api/admin/papers/{id}/reject
pub async fn reject_paper<R, O, S>(
    State(state): State<PapersAppState<R, O, S>>,
    Path(id): Path<String>,
) -> PaperResult<Json<PaperView>>
where
    R: PaperRepository + UserDirectory + Clone + Send + Sync + 'static,
    O: ObjectStore + Clone + Send + Sync + 'static,
    S: AuthenticityScorer + Clone + Send + Sync + 'static,
{
    let use_case = ModeratePaperUseCase::new(state.repo.clone(), state.repo.clone());

    let record = use_case.reject(parse_paper_id(&id)?).await?;

    Ok(Json(PaperView::from(&record)))
}

// ============================================================================
// Leaderboard & Badges
// ============================================================================

/// GET /api/leaderboard
pub async fn leaderboard<R, O, S>(
    State(state): State<PapersAppState<R, O, S>>,
    Query(params): Query<LeaderboardParams>,
) -> PaperResult<Json<Vec<LeaderboardEntryView>>>
where
    R: PaperRepository + UserDirectory + Clone + Send + Sync + 'static,
    O: ObjectStore + Clone + Send + Sync + 'static,
    S: AuthenticityScorer + Clone + Send + Sync + 'static,
{
    let kind = match params.kind.as_deref() {
        None => LeaderboardKind::Uploads,
        Some(s) => LeaderboardKind::from_query(s)
            .ok_or_else(|| PaperError::InvalidQuery(format!("unknown leaderboard type: {}", s)))?,
    };

    let use_case = LeaderboardUseCase::new(state.repo.clone(), state.repo.clone());

    let entries = use_case.ranking(kind).await?;

    Ok(Json(entries.iter().map(LeaderboardEntryView::from).collect()))
}

/// GET /api/badges/{userId}
pub async fn user_badges<R, O, S>(
    State(state): State<PapersAppState<R, O, S>>,
    Path(user_id): Path<String>,
) -> PaperResult<Json<BadgeProfileResponse>>
where
    R: PaperRepository + UserDirectory + Clone + Send + Sync + 'static,
    O: ObjectStore + Clone + Send + Sync + 'static,
    S: AuthenticityScorer + Clone + Send + Sync + 'static,
{
    let user_id = Uuid::parse_str(&user_id)
        .map(UserId::from_uuid)
        .map_err(|_| PaperError::UserNotFound)?;

    let use_case = LeaderboardUseCase::new(state.repo.clone(), state.repo.clone());

    let output = use_case.badge_profile(user_id).await?;

    Ok(Json(BadgeProfileResponse {
        id: output.profile.user_id.to_string(),
        name: output.profile.name,
        badges: output.profile.badges,
        stats: output.stats.into(),
    }))
}
