//! Request header extraction shared by the gate and the routes.

use axum::http::HeaderMap;

use warden_core::{AUTHORIZATION_HEADER, ORGANIZATION_HEADER};

/// Organization named by the request, if any.
pub fn extract_org(headers: &HeaderMap) -> Option<&str> {
    let org = headers.get(ORGANIZATION_HEADER)?.to_str().ok()?.trim();
    (!org.is_empty()).then_some(org)
}

/// Bearer token from `Authorization: Bearer <token>` (scheme is
/// case-insensitive).
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION_HEADER)?.to_str().ok()?;
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
