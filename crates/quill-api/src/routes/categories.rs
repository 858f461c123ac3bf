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
struct CreateCategoryRequest {
    #[serde(default)]
    sort_order: i32,
    translations: Vec<TranslationBody>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateCategoryRequest {
    is_active: Option<bool>,
    sort_order: Option<i32>,
    translations: Option<Vec<TranslationBody>>,
}

#[derive(Deserialize)]
struct LanguageQuery {
    language: Option<String>,
}

pub fn public_routes() -> Router<ApiState> {
    Router::new()
        .route("/categories", get(list))
        .route("/categories/slug/{slug}", get(show_by_slug))
}

pub fn protected_routes() -> Router<ApiState> {
    Router::new()
        .route("/admin/categories", post(create))
        .route("/admin/categories/{id}", get(show))
        .route("/admin/categories/{id}", patch(update))
        .route("/admin/categories/{id}", delete(remove))
}

async fn list(
    State(state): State<ApiState>,
    Query(query): Query<LanguageQuery>,
) -> ApiResponse<impl IntoResponse> {
    let categories = state.content.list_categories(query.language.as_deref()).await?;
    let docs: Vec<_> = categories.iter().map(views::category_json).collect();
    Ok(Json(serde_json::json!({ "categories": docs })))
}

async fn show_by_slug(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> ApiResponse<impl IntoResponse> {
    let category = state
        .content
        .get_category_by_slug(&slug, query.language.as_deref())
        .await?;
    Ok(Json(views::category_json(&category)))
}

async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<CreateCategoryRequest>,
) -> ApiResponse<impl IntoResponse> {
    let category = state
        .content
        .create_category(body.sort_order, translation_inputs(body.translations))
        .await?;
    Ok((StatusCode::CREATED, Json(views::category_json(&category))))
}

async fn show(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Query(query): Query<LanguageQuery>,
) -> ApiResponse<impl IntoResponse> {
    let category = state
        .content
        .get_category(id, query.language.as_deref())
        .await?;
    Ok(Json(views::category_json(&category)))
}

async fn update(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UpdateCategoryRequest>,
) -> ApiResponse<impl IntoResponse> {
    let category = state
        .content
        .update_category(
            id,
            body.is_active,
            body.sort_order,
            body.translations.map(translation_inputs),
        )
        .await?;
    Ok(Json(views::category_json(&category)))
}

async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    state.content.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
