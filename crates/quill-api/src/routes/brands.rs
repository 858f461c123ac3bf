use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;

use quill_core::services::{BrandUpdateInput, NewBrandInput};

use crate::error::{ApiJson, ApiResponse};
use crate::state::ApiState;
use crate::views;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateBrandRequest {
    name: String,
    description: Option<String>,
    logo: Option<String>,
    website: Option<String>,
    #[serde(default)]
    sort_order: i32,
    #[serde(default)]
    category_ids: Vec<i64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateBrandRequest {
    name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    description: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    logo: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    website: Option<Option<String>>,
    is_active: Option<bool>,
    sort_order: Option<i32>,
    category_ids: Option<Vec<i64>>,
}

pub fn public_routes() -> Router<ApiState> {
    Router::new()
        .route("/brands", get(list_active))
        .route("/brands/slug/{slug}", get(show_by_slug))
}

pub fn protected_routes() -> Router<ApiState> {
    Router::new()
        .route("/admin/brands", get(list_all))
        .route("/admin/brands", post(create))
        .route("/admin/brands/{id}", get(show))
        .route("/admin/brands/{id}", patch(update))
        .route("/admin/brands/{id}", delete(remove))
}

async fn list_active(State(state): State<ApiState>) -> ApiResponse<impl IntoResponse> {
    let brands = state.catalog.list_brands(true).await?;
    let docs: Vec<_> = brands.iter().map(views::brand_json).collect();
    Ok(Json(serde_json::json!({ "brands": docs })))
}

async fn list_all(State(state): State<ApiState>) -> ApiResponse<impl IntoResponse> {
    let brands = state.catalog.list_brands(false).await?;
    let docs: Vec<_> = brands.iter().map(views::brand_json).collect();
    Ok(Json(serde_json::json!({ "brands": docs })))
}

async fn show_by_slug(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> ApiResponse<impl IntoResponse> {
    let brand = state.catalog.get_brand_by_slug(&slug).await?;
    Ok(Json(views::brand_json(&brand)))
}

async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<CreateBrandRequest>,
) -> ApiResponse<impl IntoResponse> {
    let brand = state
        .catalog
        .create_brand(NewBrandInput {
            name: body.name,
            description: body.description,
            logo: body.logo,
            website: body.website,
            sort_order: body.sort_order,
            category_ids: body.category_ids,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(views::brand_json(&brand))))
}

async fn show(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    let brand = state.catalog.get_brand(id).await?;
    Ok(Json(views::brand_json(&brand)))
}

async fn update(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UpdateBrandRequest>,
) -> ApiResponse<impl IntoResponse> {
    let brand = state
        .catalog
        .update_brand(
            id,
            BrandUpdateInput {
                name: body.name,
                description: body.description,
                logo: body.logo,
                website: body.website,
                is_active: body.is_active,
                sort_order: body.sort_order,
                category_ids: body.category_ids,
            },
        )
        .await?;
    Ok(Json(views::brand_json(&brand)))
}

async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    state.catalog.delete_brand(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
