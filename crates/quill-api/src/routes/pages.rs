use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;

use quill_core::services::{AuthedRequest, NewPageInput, PageUpdateInput};

use crate::error::{ApiJson, ApiResponse};
use crate::state::ApiState;
use crate::views;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreatePageRequest {
    title: String,
    content: String,
    #[serde(default = "default_status")]
    status: String,
    parent_id: Option<i64>,
    #[serde(default)]
    menu_order: i32,
    #[serde(default)]
    show_in_home_menu: bool,
    #[serde(default)]
    show_in_footer_menu: bool,
    seo_title: Option<String>,
    seo_description: Option<String>,
    seo_keywords: Option<String>,
}

fn default_status() -> String {
    "draft".to_string()
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdatePageRequest {
    title: Option<String>,
    content: Option<String>,
    status: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    parent_id: Option<Option<i64>>,
    menu_order: Option<i32>,
    show_in_home_menu: Option<bool>,
    show_in_footer_menu: Option<bool>,
    #[serde(default, deserialize_with = "super::double_option")]
    seo_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    seo_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    seo_keywords: Option<Option<String>>,
    is_active: Option<bool>,
}

#[derive(Deserialize)]
struct ListPagesQuery {
    status: Option<String>,
}

pub fn public_routes() -> Router<ApiState> {
    Router::new()
        .route("/pages/slug/{slug}", get(show_by_slug))
        .route("/menus/{slot}", get(menu))
}

pub fn protected_routes() -> Router<ApiState> {
    Router::new()
        .route("/admin/pages", get(list))
        .route("/admin/pages", post(create))
        .route("/admin/pages/roots", get(roots))
        .route("/admin/pages/{id}", get(show))
        .route("/admin/pages/{id}", patch(update))
        .route("/admin/pages/{id}", delete(remove))
        .route("/admin/pages/{id}/children", get(children))
}

/// Public reads count as a view.
async fn show_by_slug(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> ApiResponse<impl IntoResponse> {
    let page = state.pages.get_by_slug(&slug).await?;
    state.pages.record_view(page.id).await?;
    Ok(Json(views::page_json(&page)))
}

async fn menu(
    State(state): State<ApiState>,
    Path(slot): Path<String>,
) -> ApiResponse<impl IntoResponse> {
    let footer = match slot.as_str() {
        "home" => false,
        "footer" => true,
        other => {
            return Err(quill_common::ApiError::bad_request(format!(
                "unknown menu slot: {other}"
            ))
            .into());
        }
    };
    let nodes = state.pages.menu_structure(footer).await?;
    Ok(Json(serde_json::json!({ "menu": views::menu_json(&nodes) })))
}

async fn list(
    State(state): State<ApiState>,
    Query(query): Query<ListPagesQuery>,
) -> ApiResponse<impl IntoResponse> {
    let pages = state.pages.list(query.status.as_deref()).await?;
    let docs: Vec<_> = pages.iter().map(views::page_json).collect();
    Ok(Json(serde_json::json!({ "pages": docs })))
}

async fn create(
    State(state): State<ApiState>,
    Extension(authed): Extension<AuthedRequest>,
    ApiJson(body): ApiJson<CreatePageRequest>,
) -> ApiResponse<impl IntoResponse> {
    let page = state
        .pages
        .create(
            authed.user.id,
            NewPageInput {
                title: body.title,
                content: body.content,
                status: body.status,
                parent_id: body.parent_id,
                menu_order: body.menu_order,
                show_in_home_menu: body.show_in_home_menu,
                show_in_footer_menu: body.show_in_footer_menu,
                seo_title: body.seo_title,
                seo_description: body.seo_description,
                seo_keywords: body.seo_keywords,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::page_json(&page))))
}

async fn show(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    let page = state.pages.get(id).await?;
    Ok(Json(views::page_json(&page)))
}

async fn roots(State(state): State<ApiState>) -> ApiResponse<impl IntoResponse> {
    let pages = state.pages.roots().await?;
    let docs: Vec<_> = pages.iter().map(views::page_json).collect();
    Ok(Json(serde_json::json!({ "pages": docs })))
}

async fn children(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    let pages = state.pages.children(id).await?;
    let docs: Vec<_> = pages.iter().map(views::page_json).collect();
    Ok(Json(serde_json::json!({ "pages": docs })))
}

async fn update(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UpdatePageRequest>,
) -> ApiResponse<impl IntoResponse> {
    let page = state
        .pages
        .update(
            id,
            PageUpdateInput {
                title: body.title,
                content: body.content,
                status: body.status,
                parent_id: body.parent_id,
                menu_order: body.menu_order,
                show_in_home_menu: body.show_in_home_menu,
                show_in_footer_menu: body.show_in_footer_menu,
                seo_title: body.seo_title,
                seo_description: body.seo_description,
                seo_keywords: body.seo_keywords,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(views::page_json(&page)))
}

async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    state.pages.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
