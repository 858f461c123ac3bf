use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{ApiJson, ApiResponse};
use crate::state::ApiState;
use crate::views;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateUserRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    is_active: Option<bool>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AssignRolesRequest {
    role_ids: Vec<i64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ChangePasswordRequest {
    password: String,
}

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/users", get(list))
        .route("/users/{id}", get(show))
        .route("/users/{id}", patch(update))
        .route("/users/{id}", delete(remove))
        .route("/users/{id}/roles", put(assign_roles))
        .route("/users/{id}/password", post(change_password))
        .route("/roles", get(list_roles))
}

async fn list(State(state): State<ApiState>) -> ApiResponse<impl IntoResponse> {
    let users = state.users.list().await?;
    let docs: Vec<_> = users.iter().map(views::user_view_json).collect();
    Ok(Json(serde_json::json!({ "users": docs })))
}

async fn show(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    let user = state.users.get(id).await?;
    Ok(Json(views::user_view_json(&user)))
}

async fn update(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UpdateUserRequest>,
) -> ApiResponse<impl IntoResponse> {
    let user = state
        .users
        .update_profile(id, body.first_name, body.last_name, body.is_active)
        .await?;
    Ok(Json(views::user_view_json(&user)))
}

async fn assign_roles(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<AssignRolesRequest>,
) -> ApiResponse<impl IntoResponse> {
    let user = state.users.assign_roles(id, body.role_ids).await?;
    Ok(Json(views::user_view_json(&user)))
}

async fn change_password(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<ChangePasswordRequest>,
) -> ApiResponse<impl IntoResponse> {
    state.users.change_password(id, &body.password).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_roles(State(state): State<ApiState>) -> ApiResponse<impl IntoResponse> {
    let roles = state.users.list_roles().await?;
    let docs: Vec<_> = roles.iter().map(views::role_json).collect();
    Ok(Json(serde_json::json!({ "roles": docs })))
}
