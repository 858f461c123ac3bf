use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;

use quill_core::services::TranslationInput;

use crate::error::{ApiJson, ApiResponse};
use crate::state::ApiState;
use crate::views;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct TranslationBody {
    pub language_id: i64,
    pub title: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub description: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

impl From<TranslationBody> for TranslationInput {
    fn from(body: TranslationBody) -> Self {
        TranslationInput {
            language_id: body.language_id,
            title: body.title,
            content: body.content,
            excerpt: body.excerpt,
            description: body.description,
            seo_title: body.seo_title,
            seo_description: body.seo_description,
        }
    }
}

pub(super) fn translation_inputs(bodies: Vec<TranslationBody>) -> Vec<TranslationInput> {
    bodies.into_iter().map(TranslationInput::from).collect()
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateArticleRequest {
    blog_id: i64,
    author_id: i64,
    #[serde(default = "default_status")]
    status: String,
    featured_image: Option<String>,
    translations: Vec<TranslationBody>,
    #[serde(default)]
    category_ids: Vec<i64>,
    #[serde(default)]
    tag_ids: Vec<i64>,
}

fn default_status() -> String {
    "draft".to_string()
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateArticleRequest {
    editor_id: Option<i64>,
    status: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    featured_image: Option<Option<String>>,
    translations: Option<Vec<TranslationBody>>,
    category_ids: Option<Vec<i64>>,
    tag_ids: Option<Vec<i64>>,
}

#[derive(Deserialize)]
struct ListQuery {
    blog_id: Option<i64>,
    status: Option<String>,
    language: Option<String>,
}

#[derive(Deserialize)]
struct LanguageQuery {
    language: Option<String>,
}

pub fn public_routes() -> Router<ApiState> {
    Router::new()
        .route("/articles", get(list_published))
        .route("/articles/slug/{slug}", get(show_by_slug))
}

pub fn protected_routes() -> Router<ApiState> {
    Router::new()
        .route("/admin/articles", get(list_all))
        .route("/admin/articles", post(create))
        .route("/admin/articles/{id}", get(show))
        .route("/admin/articles/{id}", patch(update))
        .route("/admin/articles/{id}", delete(remove))
}

async fn list_published(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> ApiResponse<impl IntoResponse> {
    let articles = state
        .content
        .list_articles(query.blog_id, Some("published"), query.language.as_deref())
        .await?;
    let docs: Vec<_> = articles.iter().map(views::article_json).collect();
    Ok(Json(serde_json::json!({ "articles": docs })))
}

async fn show_by_slug(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> ApiResponse<impl IntoResponse> {
    let article = state
        .content
        .get_article_by_slug(&slug, query.language.as_deref())
        .await?;
    Ok(Json(views::article_json(&article)))
}

async fn list_all(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> ApiResponse<impl IntoResponse> {
    let articles = state
        .content
        .list_articles(
            query.blog_id,
            query.status.as_deref(),
            query.language.as_deref(),
        )
        .await?;
    let docs: Vec<_> = articles.iter().map(views::article_json).collect();
    Ok(Json(serde_json::json!({ "articles": docs })))
}

async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<CreateArticleRequest>,
) -> ApiResponse<impl IntoResponse> {
    let article = state
        .content
        .create_article(
            body.blog_id,
            body.author_id,
            &body.status,
            body.featured_image,
            translation_inputs(body.translations),
            body.category_ids,
            body.tag_ids,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::article_json(&article))))
}

async fn show(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Query(query): Query<LanguageQuery>,
) -> ApiResponse<impl IntoResponse> {
    let article = state
        .content
        .get_article(id, query.language.as_deref())
        .await?;
    Ok(Json(views::article_json(&article)))
}

async fn update(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UpdateArticleRequest>,
) -> ApiResponse<impl IntoResponse> {
    let article = state
        .content
        .update_article(
            id,
            body.editor_id,
            body.status,
            body.featured_image,
            body.translations.map(translation_inputs),
            body.category_ids,
            body.tag_ids,
        )
        .await?;
    Ok(Json(views::article_json(&article)))
}

async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    state.content.delete_article(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
