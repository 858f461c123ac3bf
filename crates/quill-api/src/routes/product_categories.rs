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
struct CreateCategoryRequest {
    name: String,
    description: Option<String>,
    #[serde(default)]
    sort_order: i32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateCategoryRequest {
    name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    description: Option<Option<String>>,
    is_active: Option<bool>,
    sort_order: Option<i32>,
}

pub fn public_routes() -> Router<ApiState> {
    Router::new().route("/product-categories", get(list))
}

pub fn protected_routes() -> Router<ApiState> {
    Router::new()
        .route("/admin/product-categories", post(create))
        .route("/admin/product-categories/{id}", get(show))
        .route("/admin/product-categories/{id}", patch(update))
        .route("/admin/product-categories/{id}", delete(remove))
}

async fn list(State(state): State<ApiState>) -> ApiResponse<impl IntoResponse> {
    let categories = state.catalog.list_product_categories().await?;
    let docs: Vec<_> = categories.iter().map(views::product_category_json).collect();
    Ok(Json(serde_json::json!({ "product_categories": docs })))
}

async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<CreateCategoryRequest>,
) -> ApiResponse<impl IntoResponse> {
    let category = state
        .catalog
        .create_product_category(&body.name, body.description, body.sort_order)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(views::product_category_json(&category)),
    ))
}

async fn show(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    let category = state.catalog.get_product_category(id).await?;
    Ok(Json(views::product_category_json(&category)))
}

async fn update(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UpdateCategoryRequest>,
) -> ApiResponse<impl IntoResponse> {
    let category = state
        .catalog
        .update_product_category(id, body.name, body.description, body.is_active, body.sort_order)
        .await?;
    Ok(Json(views::product_category_json(&category)))
}

async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    state.catalog.delete_product_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
