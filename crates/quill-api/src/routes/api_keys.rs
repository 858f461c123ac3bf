use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::error::{ApiJson, ApiResponse};
use crate::state::ApiState;
use crate::views;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateKeyRequest {
    user_id: i64,
    name: String,
    scopes: Option<Vec<String>>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    expires_at: Option<OffsetDateTime>,
}

#[derive(Deserialize)]
struct ListKeysQuery {
    user_id: Option<i64>,
}

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/api-keys", post(create))
        .route("/api-keys", get(list))
        .route("/api-keys/{id}", get(show))
        .route("/api-keys/{id}/deactivate", post(deactivate))
        .route("/api-keys/{id}", delete(remove))
        .route("/api-keys/cleanup", post(cleanup))
}

async fn create(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<CreateKeyRequest>,
) -> ApiResponse<impl IntoResponse> {
    let created = state
        .api_keys
        .create(body.user_id, &body.name, body.scopes, body.expires_at)
        .await?;
    let mut doc = views::api_key_json(&created.key);
    // The only response that ever carries the plaintext token.
    doc["token"] = serde_json::json!(created.token);
    Ok((StatusCode::CREATED, Json(doc)))
}

async fn list(
    State(state): State<ApiState>,
    Query(query): Query<ListKeysQuery>,
) -> ApiResponse<impl IntoResponse> {
    let keys = state.api_keys.list(query.user_id).await?;
    let docs: Vec<_> = keys.iter().map(views::api_key_json).collect();
    Ok(Json(serde_json::json!({ "api_keys": docs })))
}

async fn show(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    let key = state.api_keys.get(id).await?;
    Ok(Json(views::api_key_json(&key)))
}

async fn deactivate(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    state.api_keys.deactivate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    state.api_keys.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn cleanup(State(state): State<ApiState>) -> ApiResponse<impl IntoResponse> {
    let removed = state.api_keys.cleanup_expired().await?;
    Ok(Json(serde_json::json!({ "removed": removed })))
}
