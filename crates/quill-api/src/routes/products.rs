use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;

use quill_core::services::NewProductInput;
use quill_storage::ProductPatch;

use crate::error::{ApiJson, ApiResponse};
use crate::state::ApiState;
use crate::views;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateProductRequest {
    product_category_id: i64,
    brand_id: Option<i64>,
    name: String,
    sku: String,
    purchase_price: f64,
    sale_price: f64,
    offer_price: Option<f64>,
    #[serde(default)]
    stock: i64,
    #[serde(default)]
    stock_reservation_limit: i64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateProductRequest {
    product_category_id: Option<i64>,
    #[serde(default, deserialize_with = "super::double_option")]
    brand_id: Option<Option<i64>>,
    name: Option<String>,
    sku: Option<String>,
    purchase_price: Option<f64>,
    sale_price: Option<f64>,
    #[serde(default, deserialize_with = "super::double_option")]
    offer_price: Option<Option<f64>>,
    stock: Option<i64>,
    stock_reservation_limit: Option<i64>,
    is_active: Option<bool>,
}

#[derive(Deserialize)]
struct ListProductsQuery {
    category_id: Option<i64>,
    brand_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AddMediaRequest {
    path: String,
    alt: Option<String>,
    #[serde(default)]
    sort_order: i32,
}

pub fn public_routes() -> Router<ApiState> {
    Router::new()
        .route("/products", get(list_public))
        .route("/products/slug/{slug}", get(show_by_slug))
}

pub fn protected_routes() -> Router<ApiState> {
    Router::new()
        .route("/admin/products", get(list_admin))
        .route("/admin/products", post(create))
        .route("/admin/products/{id}", get(show))
        .route("/admin/products/{id}", patch(update))
        .route("/admin/products/{id}", delete(remove))
        .route("/admin/products/{id}/media", get(list_media))
        .route("/admin/products/{id}/media", post(add_media))
        .route("/admin/products/{id}/media/{media_id}", delete(remove_media))
}

async fn list_public(
    State(state): State<ApiState>,
    Query(query): Query<ListProductsQuery>,
) -> ApiResponse<impl IntoResponse> {
    let products = state
        .catalog
        .list_products(query.category_id, query.brand_id, true)
        .await?;
    let docs: Vec<_> = products.iter().map(views::product_public_json).collect();
    Ok(Json(serde_json::json!({ "products": docs })))
}

async fn show_by_slug(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> ApiResponse<impl IntoResponse> {
    let product = state.catalog.get_product_by_slug(&slug).await?;
    Ok(Json(views::product_public_json(&product)))
}

async fn list_admin(
    State(state): State<ApiState>,
    Query(query): Query<ListProductsQuery>,
) -> ApiResponse<impl IntoResponse> {
    let products = state
        .catalog
        .list_products(query.category_id, query.brand_id, false)
        .await?;
    let docs: Vec<_> = products.iter().map(views::product_admin_json).collect();
    Ok(Json(serde_json::json!({ "products": docs })))
}

async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<CreateProductRequest>,
) -> ApiResponse<impl IntoResponse> {
    let product = state
        .catalog
        .create_product(NewProductInput {
            product_category_id: body.product_category_id,
            brand_id: body.brand_id,
            name: body.name,
            sku: body.sku,
            purchase_price: body.purchase_price,
            sale_price: body.sale_price,
            offer_price: body.offer_price,
            stock: body.stock,
            stock_reservation_limit: body.stock_reservation_limit,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(views::product_admin_json(&product))))
}

async fn show(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    let product = state.catalog.get_product(id).await?;
    Ok(Json(views::product_admin_json(&product)))
}

async fn update(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UpdateProductRequest>,
) -> ApiResponse<impl IntoResponse> {
    let product = state
        .catalog
        .update_product(
            id,
            ProductPatch {
                product_category_id: body.product_category_id,
                brand_id: body.brand_id,
                name: body.name,
                sku: body.sku,
                purchase_price: body.purchase_price,
                sale_price: body.sale_price,
                offer_price: body.offer_price,
                stock: body.stock,
                stock_reservation_limit: body.stock_reservation_limit,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(views::product_admin_json(&product)))
}

async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    state.catalog.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_media(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    let media = state.catalog.list_product_media(id).await?;
    let docs: Vec<_> = media.iter().map(views::product_media_json).collect();
    Ok(Json(serde_json::json!({ "media": docs })))
}

async fn add_media(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<AddMediaRequest>,
) -> ApiResponse<impl IntoResponse> {
    let media = state
        .catalog
        .add_product_media(id, body.path, body.alt, body.sort_order)
        .await?;
    let docs: Vec<_> = media.iter().map(views::product_media_json).collect();
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "media": docs })),
    ))
}

async fn remove_media(
    State(state): State<ApiState>,
    Path((id, media_id)): Path<(i64, i64)>,
) -> ApiResponse<impl IntoResponse> {
    state.catalog.remove_product_media(id, media_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
