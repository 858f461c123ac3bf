use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use quill_common::ApiError;

use crate::error::ApiFailure;
use crate::state::ApiState;

/// Layered over every protected route. On success the request carries an
/// `AuthedRequest` extension for handlers that care who is calling.
pub async fn require_auth(
    State(state): State<ApiState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiFailure> {
    let bearer = extract_bearer(req.headers())
        .ok_or_else(|| ApiError::unauthorized("missing bearer token"))?;
    let ip = client_ip(req.headers());
    let authed = state.api_keys.authenticate(&bearer, ip).await?;
    req.extensions_mut().insert(authed);
    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if auth.len() > prefix.len() && auth[..prefix.len()].eq_ignore_ascii_case(prefix) {
        let token = auth[prefix.len()..].trim();
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }
    None
}

fn client_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers.get("x-forwarded-for")?.to_str().ok()?;
    let first = forwarded.split(',').next()?.trim();
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}
