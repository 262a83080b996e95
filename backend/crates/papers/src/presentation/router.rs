//! Papers Router

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use std::sync::Arc;

use auth::middleware::{AuthGuardState, attach_principal, require_admin, require_auth};

use crate::application::config::PapersConfig;
use crate::domain::repository::{AuthenticityScorer, ObjectStore, PaperRepository, UserDirectory};
use crate::infra::object_store::HttpObjectStore;
use crate::infra::postgres::PgPaperRepository;
use crate::infra::scorer::HttpScorerClient;
use crate::presentation::handlers::{self, PapersAppState};

/// Uploads above this size are rejected before the handler runs
const MAX_UPLOAD_BYTES: usize = 15 * 1024 * 1024;

/// Create the Papers router with the production gateways
pub fn papers_router(
    repo: PgPaperRepository,
    store: HttpObjectStore,
    scorer: HttpScorerClient,
    guard: AuthGuardState,
    config: PapersConfig,
) -> Router {
    papers_router_generic(repo, store, scorer, guard, config)
}

/// Create a generic Papers router for any repository and gateway set
pub fn papers_router_generic<R, O, S>(
    repo: R,
    store: O,
    scorer: S,
    guard: AuthGuardState,
    config: PapersConfig,
) -> Router
where
    R: PaperRepository + UserDirectory + Clone + Send + Sync + 'static,
    O: ObjectStore + Clone + Send + Sync + 'static,
    S: AuthenticityScorer + Clone + Send + Sync + 'static,
{
    let state = PapersAppState {
        repo: Arc::new(repo),
        store: Arc::new(store),
        scorer: Arc::new(scorer),
        config: Arc::new(config),
    };

    let public_routes = Router::new()
        .route("/papers", get(handlers::list_papers::<R, O, S>))
        .route("/papers/{id}", get(handlers::get_paper::<R, O, S>))
        .route(
            "/papers/{id}/download",
            post(handlers::download_paper::<R, O, S>),
        )
        .route("/leaderboard", get(handlers::leaderboard::<R, O, S>))
        .route("/badges/{userId}", get(handlers::user_badges::<R, O, S>))
        .route_layer(from_fn_with_state(guard.clone(), attach_principal));

    let owner_routes = Router::new()
        .route(
            "/papers/upload",
            post(handlers::upload_paper::<R, O, S>)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/papers/{id}",
            put(handlers::update_paper::<R, O, S>).delete(handlers::delete_paper::<R, O, S>),
        )
        .route_layer(from_fn_with_state(guard.clone(), require_auth));

    let admin_routes = Router::new()
        .route("/admin/papers", get(handlers::admin_list_papers::<R, O, S>))
        .route(
            "/admin/papers/{id}/approve",
            put(handlers::approve_paper::<R, O, S>),
        )
        .route(
            "/admin/papers/{id}/reject",
            put(handlers::reject_paper::<R, O, S>),
        )
        .route_layer(from_fn_with_state(guard, require_admin));

    Router::new()
        .merge(public_routes)
        .merge(owner_routes)
        .merge(admin_routes)
        .with_state(state)
}
