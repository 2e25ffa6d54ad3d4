use axum::{
    extract::Request,
    http::{header::COOKIE, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::{verify_token, Claims, SESSION_COOKIE};
use crate::error::ApiError;

/// Capability gate for the admin pages. Reads the session cookie and verifies
/// it; anything short of a valid, unexpired token sends the client back to
/// the site root instead of surfacing an error status. The verified identity
/// is not injected downstream; there is one protected surface and one
/// principal.
pub async fn page_guard(request: Request, next: Next) -> Response {
    match session_from_headers(request.headers()) {
        Some(_) => next.run(request).await,
        None => Redirect::to("/").into_response(),
    }
}

/// API-side session check: same verification, but a 401 instead of a
/// redirect. Handlers call this before touching anything persistent.
pub fn require_session(headers: &HeaderMap) -> Result<Claims, ApiError> {
    session_from_headers(headers)
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))
}

fn session_from_headers(headers: &HeaderMap) -> Option<Claims> {
    let cookie_header = headers.get(COOKIE)?.to_str().ok()?;
    let token = cookie_value(cookie_header, SESSION_COOKIE)?;
    verify_token(&token)
}

/// Pull a single cookie's value out of a Cookie header.
fn cookie_value(header: &str, name: &str) -> Option<String> {
    for cookie in header.split(';') {
        let mut parts = cookie.trim().splitn(2, '=');
        if parts.next() == Some(name) {
            return parts.next().map(|v| v.to_string());
        }
    }
    None
}
