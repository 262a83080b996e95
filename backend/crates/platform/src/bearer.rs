//! Bearer Credential Extraction
//!
//! Pulls the bearer token out of the standard `Authorization` header.

use axum::http::{HeaderMap, header};

/// Extract a bearer token from `Authorization: Bearer <token>`
///
/// Returns `None` when the header is absent, not valid UTF-8, or does not
/// use the `Bearer` scheme. The scheme comparison is case-insensitive per
/// RFC 6750.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}
