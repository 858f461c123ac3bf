use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiJson, ApiResponse};
use crate::state::ApiState;
use crate::views;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateCarouselRequest {
    name: String,
    description: Option<String>,
    items: Value,
    #[serde(default)]
    sort_order: i32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateCarouselRequest {
    name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    description: Option<Option<String>>,
    items: Option<Value>,
    is_active: Option<bool>,
    sort_order: Option<i32>,
}

pub fn public_routes() -> Router<ApiState> {
    Router::new()
        .route("/carousels", get(list_active))
        .route("/carousels/slug/{slug}", get(show_by_slug))
}

pub fn protected_routes() -> Router<ApiState> {
    Router::new()
        .route("/admin/carousels", get(list_all))
        .route("/admin/carousels", post(create))
        .route("/admin/carousels/{id}", get(show))
        .route("/admin/carousels/{id}", patch(update))
        .route("/admin/carousels/{id}", delete(remove))
}

async fn list_active(State(state): State<ApiState>) -> ApiResponse<impl IntoResponse> {
    let carousels = state.carousels.list(true).await?;
    let docs: Vec<_> = carousels.iter().map(views::carousel_json).collect();
    Ok(Json(serde_json::json!({ "carousels": docs })))
}

async fn list_all(State(state): State<ApiState>) -> ApiResponse<impl IntoResponse> {
    let carousels = state.carousels.list(false).await?;
    let docs: Vec<_> = carousels.iter().map(views::carousel_json).collect();
    Ok(Json(serde_json::json!({ "carousels": docs })))
}

async fn show_by_slug(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> ApiResponse<impl IntoResponse> {
    let carousel = state.carousels.get_by_slug(&slug).await?;
    Ok(Json(views::carousel_json(&carousel)))
}

async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<CreateCarouselRequest>,
) -> ApiResponse<impl IntoResponse> {
    let carousel = state
        .carousels
        .create(&body.name, body.description, body.items, body.sort_order)
        .await?;
    Ok((StatusCode::CREATED, Json(views::carousel_json(&carousel))))
}

async fn show(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    let carousel = state.carousels.get(id).await?;
    Ok(Json(views::carousel_json(&carousel)))
}

async fn update(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UpdateCarouselRequest>,
) -> ApiResponse<impl IntoResponse> {
    let carousel = state
        .carousels
        .update(
            id,
            body.name,
            body.description,
            body.items,
            body.is_active,
            body.sort_order,
        )
        .await?;
    Ok(Json(views::carousel_json(&carousel)))
}

async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    state.carousels.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
