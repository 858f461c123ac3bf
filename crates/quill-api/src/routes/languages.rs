use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{ApiJson, ApiResponse};
use crate::state::ApiState;
use crate::views;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateLanguageRequest {
    code: String,
    name: String,
    #[serde(default)]
    is_default: bool,
    #[serde(default = "default_true")]
    is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateLanguageRequest {
    name: Option<String>,
    is_default: Option<bool>,
    is_active: Option<bool>,
}

pub fn public_routes() -> Router<ApiState> {
    Router::new().route("/languages", get(list_active))
}

pub fn protected_routes() -> Router<ApiState> {
    Router::new()
        .route("/languages/all", get(list_all))
        .route("/languages", post(create))
        .route("/languages/{id}", get(show))
        .route("/languages/{id}", patch(update))
        .route("/languages/{id}", delete(remove))
}

async fn list_active(State(state): State<ApiState>) -> ApiResponse<impl IntoResponse> {
    let languages = state.languages.list(true).await?;
    let docs: Vec<_> = languages.iter().map(views::language_json).collect();
    Ok(Json(serde_json::json!({ "languages": docs })))
}

async fn list_all(State(state): State<ApiState>) -> ApiResponse<impl IntoResponse> {
    let languages = state.languages.list(false).await?;
    let docs: Vec<_> = languages.iter().map(views::language_json).collect();
    Ok(Json(serde_json::json!({ "languages": docs })))
}

async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<CreateLanguageRequest>,
) -> ApiResponse<impl IntoResponse> {
    let language = state
        .languages
        .create(&body.code, &body.name, body.is_default, body.is_active)
        .await?;
    Ok((StatusCode::CREATED, Json(views::language_json(&language))))
}

async fn show(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    let language = state.languages.get(id).await?;
    Ok(Json(views::language_json(&language)))
}

async fn update(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UpdateLanguageRequest>,
) -> ApiResponse<impl IntoResponse> {
    let language = state
        .languages
        .update(id, body.name, body.is_default, body.is_active)
        .await?;
    Ok(Json(views::language_json(&language)))
}

async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    state.languages.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
