//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthGuardState, require_admin};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, issuer: Arc<TokenIssuer>, config: AuthConfig) -> Router {
    auth_router_generic(repo, issuer, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, issuer: Arc<TokenIssuer>, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        issuer: issuer.clone(),
        config: Arc::new(config),
    };

    let guard = AuthGuardState::new(issuer);

    let admin_routes = Router::new()
        .route("/admin/users", get(handlers::list_users::<R>))
        .route("/admin/users/{id}", delete(handlers::delete_user::<R>))
        .route_layer(from_fn_with_state(guard, require_admin));

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::log_in::<R>))
        .merge(admin_routes)
        .with_state(state)
}
