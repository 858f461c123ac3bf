use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;

use quill_core::services::AuthedRequest;

use crate::error::{ApiJson, ApiResponse};
use crate::state::ApiState;
use crate::views;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RegisterRequest {
    email: String,
    first_name: String,
    last_name: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LoginRequest {
    email: String,
    password: String,
}

pub fn public_routes() -> Router<ApiState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn protected_routes() -> Router<ApiState> {
    Router::new().route("/auth/profile", get(profile))
}

async fn register(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> ApiResponse<impl IntoResponse> {
    let user = state
        .auth
        .register(&body.email, &body.first_name, &body.last_name, &body.password)
        .await?;
    Ok((StatusCode::CREATED, Json(views::user_json(&user))))
}

async fn login(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> ApiResponse<impl IntoResponse> {
    let outcome = state.auth.login(&body.email, &body.password).await?;
    Ok(Json(serde_json::json!({
        "token": outcome.token,
        "user": views::user_json(&outcome.user),
    })))
}

async fn profile(Extension(authed): Extension<AuthedRequest>) -> impl IntoResponse {
    Json(views::authed_json(&authed))
}
