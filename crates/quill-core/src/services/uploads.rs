use std::sync::Arc;

use bytes::Bytes;

use quill_common::{ApiError, ApiResult};
use quill_media::{FileType, StorageProvider, UploadRequest};
use quill_storage::entities::files;
use quill_storage::{CmsStorage, NewFile};

#[derive(Debug, Clone)]
pub struct UploadInput {
    pub original_name: String,
    pub mime_type: String,
    pub data: Bytes,
    pub blog_id: Option<i64>,
    pub folder: Option<String>,
    pub allowed: Option<Vec<FileType>>,
    pub compress_images: bool,
    pub quality: Option<u8>,
    pub user_id: Option<i64>,
}

/// Ties the provider pipeline to the files table: every stored file gets a
/// row with its derivative records and public URL.
#[derive(Clone)]
pub struct UploadService {
    storage: CmsStorage,
    provider: Arc<dyn StorageProvider>,
    base_url: String,
}

impl UploadService {
    pub fn new(storage: CmsStorage, provider: Arc<dyn StorageProvider>, base_url: &str) -> Self {
        Self {
            storage,
            provider,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn public_url(&self, path: &str) -> String {
        format!("{}/uploads/{path}", self.base_url)
    }

    pub async fn upload(&self, input: UploadInput) -> ApiResult<files::Model> {
        if let Some(blog_id) = input.blog_id {
            self.storage
                .find_blog(blog_id)
                .await?
                .ok_or_else(|| ApiError::not_found("blog"))?;
        }

        let stored = self
            .provider
            .store(UploadRequest {
                original_name: input.original_name.clone(),
                mime_type: input.mime_type,
                data: input.data,
                blog_id: input.blog_id,
                folder: input.folder,
                allowed: input.allowed,
                compress_images: input.compress_images,
                quality: input.quality,
            })
            .await?;

        let processed_versions = serde_json::to_value(&stored.processed_versions)
            .map_err(|err| ApiError::internal(err.to_string()))?;
        let file = self
            .storage
            .insert_file(NewFile {
                url: self.public_url(&stored.path),
                filename: stored.filename,
                original_name: input.original_name,
                path: stored.path,
                size: stored.size,
                mime_type: stored.mime_type,
                file_type: stored.file_type.as_str().to_string(),
                file_format: stored.file_format,
                blog_id: input.blog_id,
                user_id: input.user_id,
                processed_versions,
            })
            .await?;
        tracing::info!(file_id = file.id, path = %file.path, "file stored");
        Ok(file)
    }

    pub async fn get(&self, id: i64) -> ApiResult<files::Model> {
        self.storage
            .find_file(id)
            .await?
            .ok_or_else(|| ApiError::not_found("file"))
    }

    pub async fn list(
        &self,
        blog_id: Option<i64>,
        file_type: Option<&str>,
    ) -> ApiResult<Vec<files::Model>> {
        Ok(self.storage.list_files(blog_id, file_type).await?)
    }

    /// The row is soft-deleted first; physical removal is best effort so a
    /// missing disk file cannot strand the record.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let file = self.get(id).await?;
        self.storage.soft_delete_file(id).await?;
        if let Err(err) = self.provider.delete(&file.path).await {
            tracing::warn!(file_id = id, error = %err, "failed to remove stored file");
        }
        Ok(())
    }
}
