use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;

use super::articles::{TranslationBody, translation_inputs};
use crate::error::{ApiJson, ApiResponse};
use crate::state::ApiState;
use crate::views;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateTagRequest {
    translations: Vec<TranslationBody>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateTagRequest {
    is_active: Option<bool>,
    translations: Option<Vec<TranslationBody>>,
}

#[derive(Deserialize)]
struct LanguageQuery {
    language: Option<String>,
}

pub fn public_routes() -> Router<ApiState> {
    Router::new()
        .route("/tags", get(list))
        .route("/tags/slug/{slug}", get(show_by_slug))
}

pub fn protected_routes() -> Router<ApiState> {
    Router::new()
        .route("/admin/tags", post(create))
        .route("/admin/tags/{id}", get(show))
        .route("/admin/tags/{id}", patch(update))
        .route("/admin/tags/{id}", delete(remove))
}

async fn list(
    State(state): State<ApiState>,
    Query(query): Query<LanguageQuery>,
) -> ApiResponse<impl IntoResponse> {
    let tags = state.content.list_tags(query.language.as_deref()).await?;
    let docs: Vec<_> = tags.iter().map(views::tag_json).collect();
    Ok(Json(serde_json::json!({ "tags": docs })))
}

async fn show_by_slug(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> ApiResponse<impl IntoResponse> {
    let tag = state
        .content
        .get_tag_by_slug(&slug, query.language.as_deref())
        .await?;
    Ok(Json(views::tag_json(&tag)))
}

async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<CreateTagRequest>,
) -> ApiResponse<impl IntoResponse> {
    let tag = state
        .content
        .create_tag(translation_inputs(body.translations))
        .await?;
    Ok((StatusCode::CREATED, Json(views::tag_json(&tag))))
}

async fn show(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Query(query): Query<LanguageQuery>,
) -> ApiResponse<impl IntoResponse> {
    let tag = state.content.get_tag(id, query.language.as_deref()).await?;
    Ok(Json(views::tag_json(&tag)))
}

async fn update(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UpdateTagRequest>,
) -> ApiResponse<impl IntoResponse> {
    let tag = state
        .content
        .update_tag(id, body.is_active, body.translations.map(translation_inputs))
        .await?;
    Ok(Json(views::tag_json(&tag)))
}

async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    state.content.delete_tag(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
