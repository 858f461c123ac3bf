use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Extension, Json, Router};
use bytes::Bytes;
use serde::Deserialize;

use quill_common::ApiError;
use quill_core::services::{AuthedRequest, UploadInput};

use crate::error::ApiResponse;
use crate::state::ApiState;
use crate::views;

#[derive(Deserialize)]
struct ListFilesQuery {
    blog_id: Option<i64>,
    file_type: Option<String>,
}

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/files", post(upload))
        .route("/files", get(list))
        .route("/files/{id}", get(show))
        .route("/files/{id}", delete(remove))
}

struct UploadForm {
    original_name: String,
    mime_type: String,
    data: Bytes,
    blog_id: Option<i64>,
    folder: Option<String>,
    compress_images: bool,
    quality: Option<u8>,
}

/// Multipart form: one `file` part plus optional `blog_id`, `folder`,
/// `compress` and `quality` text parts.
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut file = None;
    let mut blog_id = None;
    let mut folder = None;
    let mut compress_images = true;
    let mut quality = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::bad_request(err.to_string()))?
    {
        match field.name().unwrap_or_default() {
            "file" => {
                let original_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| ApiError::bad_request("file part needs a filename"))?;
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|err| ApiError::bad_request(err.to_string()))?;
                file = Some((original_name, mime_type, data));
            }
            "blog_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|err| ApiError::bad_request(err.to_string()))?;
                blog_id = Some(
                    text.parse::<i64>()
                        .map_err(|_| ApiError::bad_request("blog_id must be an integer"))?,
                );
            }
            "folder" => {
                let text = field
                    .text()
                    .await
                    .map_err(|err| ApiError::bad_request(err.to_string()))?;
                if !text.is_empty() {
                    folder = Some(text);
                }
            }
            "compress" => {
                let text = field
                    .text()
                    .await
                    .map_err(|err| ApiError::bad_request(err.to_string()))?;
                compress_images = text != "false" && text != "0";
            }
            "quality" => {
                let text = field
                    .text()
                    .await
                    .map_err(|err| ApiError::bad_request(err.to_string()))?;
                quality = Some(
                    text.parse::<u8>()
                        .ok()
                        .filter(|quality| (1..=100).contains(quality))
                        .ok_or_else(|| {
                            ApiError::bad_request("quality must be an integer from 1 to 100")
                        })?,
                );
            }
            _ => {}
        }
    }

    let (original_name, mime_type, data) =
        file.ok_or_else(|| ApiError::bad_request("missing file part"))?;
    Ok(UploadForm {
        original_name,
        mime_type,
        data,
        blog_id,
        folder,
        compress_images,
        quality,
    })
}

async fn upload(
    State(state): State<ApiState>,
    Extension(authed): Extension<AuthedRequest>,
    multipart: Multipart,
) -> ApiResponse<impl IntoResponse> {
    let form = read_upload_form(multipart).await?;
    let file = state
        .uploads
        .upload(UploadInput {
            original_name: form.original_name,
            mime_type: form.mime_type,
            data: form.data,
            blog_id: form.blog_id,
            folder: form.folder,
            allowed: None,
            compress_images: form.compress_images,
            quality: form.quality,
            user_id: Some(authed.user.id),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(views::file_json(&file))))
}

async fn list(
    State(state): State<ApiState>,
    Query(query): Query<ListFilesQuery>,
) -> ApiResponse<impl IntoResponse> {
    let files = state
        .uploads
        .list(query.blog_id, query.file_type.as_deref())
        .await?;
    let docs: Vec<_> = files.iter().map(views::file_json).collect();
    Ok(Json(serde_json::json!({ "files": docs })))
}

async fn show(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    let file = state.uploads.get(id).await?;
    Ok(Json(views::file_json(&file)))
}

async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<impl IntoResponse> {
    state.uploads.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
