//! Access Guard Middleware
//!
//! Stateless credential checks for protected routes. Verified identities
//! ride in request extensions as `Principal`.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::bearer::extract_bearer;

use crate::application::token::{Principal, TokenIssuer};
use crate::error::AuthError;

/// Guard state shared by all protected routers
#[derive(Clone)]
pub struct AuthGuardState {
    pub issuer: Arc<TokenIssuer>,
}

impl AuthGuardState {
    pub fn new(issuer: Arc<TokenIssuer>) -> Self {
        Self { issuer }
    }
}

/// Verified identity when the caller presented a credential, `None` otherwise
#[derive(Clone)]
pub struct MaybePrincipal(pub Option<Principal>);

fn verify_request(state: &AuthGuardState, req: &Request<Body>) -> Result<Principal, AuthError> {
    let token = extract_bearer(req.headers()).ok_or(AuthError::Unauthorized)?;
    let claims = state.issuer.verify(token)?;
    Principal::from_claims(&claims)
}

/// Middleware that requires a valid bearer credential
pub async fn require_auth(
    State(state): State<AuthGuardState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let principal = verify_request(&state, &req).map_err(|e| e.into_response())?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Middleware that requires a valid credential with the admin role
pub async fn require_admin(
    State(state): State<AuthGuardState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let principal = verify_request(&state, &req).map_err(|e| e.into_response())?;

    if !principal.is_admin() {
        return Err(AuthError::Forbidden.into_response());
    }

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Middleware that attaches the caller's identity when present but never
/// rejects the request. Public listings use it for visibility decisions.
pub async fn attach_principal(
    State(state): State<AuthGuardState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let principal = verify_request(&state, &req).ok();

    req.extensions_mut().insert(MaybePrincipal(principal));

    next.run(req).await
}
