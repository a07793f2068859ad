//! Authentication middleware — Bearer token extraction and verification.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum::http::header::AUTHORIZATION;

use adboards_core::auth::jwt::verify_token;

use crate::AppState;

/// Axum middleware: extracts `Authorization: Bearer <token>`, verifies it,
/// and injects the verified `Claims` into request extensions.
///
/// An absent or invalid token leaves the request anonymous rather than
/// rejecting it; the per-handler extractors enforce each route's declared
/// policy.
pub async fn extract_claims(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    if let Some(token) = token
        && let Some(claims) = verify_token(token, &state.config.token)
    {
        request.extensions_mut().insert(claims);
    }

    next.run(request).await
}
