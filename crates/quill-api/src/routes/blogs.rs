use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;

use quill_storage::BlogPatch;

use crate::error::{ApiJson, ApiResponse};
use crate::state::ApiState;
use crate::views;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateBlogRequest {
    owner_id: i64,
    name: String,
    description: Option<String>,
    seo_title: Option<String>,
    seo_description: Option<String>,
    seo_keywords: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateBlogRequest {
    name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    description: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    seo_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    seo_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    seo_keywords: Option<Option<String>>,
    is_active: Option<bool>,
}

#[derive(Deserialize)]
struct ListBlogsQuery {
    owner_id: Option<i64>,
}

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/blogs", post(create))
        .route("/blogs", get(list))
        .route("/blogs/{id}", get(show))
        .route("/blogs/slug/{slug}", get(show_by_slug))
        .route("/blogs/{id}", patch(update))
        .route("/blogs/{id}", delete(remove))
}

async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<CreateBlogRequest>,
) -> ApiResponse<impl IntoResponse> {
    let blog = state
        .blogs
        .create(
            body.owner_id,
            &body.name,
            body.description,
            body.seo_title,
            body.seo_description,
            body.seo_keywords,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::blog_json(&blog))))
}

async fn list(
    State(state): State<ApiState>,
    Query(query): Query<ListBlogsQuery>,
) -> ApiResponse<impl IntoResponse> {
    let blogs = state.blogs.list(query.owner_id).await?;
    let docs: Vec<_> = blogs.iter().map(views::blog_json).collect();
    Ok(Json(serde_json::json!({ "blogs": docs })))
}

async fn show(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    let blog = state.blogs.get(id).await?;
    Ok(Json(views::blog_json(&blog)))
}

async fn show_by_slug(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> ApiResponse<impl IntoResponse> {
    let blog = state.blogs.get_by_slug(&slug).await?;
    Ok(Json(views::blog_json(&blog)))
}

async fn update(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UpdateBlogRequest>,
) -> ApiResponse<impl IntoResponse> {
    let blog = state
        .blogs
        .update(
            id,
            BlogPatch {
                name: body.name,
                description: body.description,
                seo_title: body.seo_title,
                seo_description: body.seo_description,
                seo_keywords: body.seo_keywords,
                seo_json_ld: None,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(views::blog_json(&blog)))
}

async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    state.blogs.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
