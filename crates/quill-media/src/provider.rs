use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use quill_common::config::StorageProviderKind;

use crate::local::LocalProvider;
use crate::validate::FileType;

pub type MediaResult<T> = Result<T, MediaError>;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("{0}")]
    Invalid(String),
}

impl From<MediaError> for quill_common::ApiError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::Invalid(reason) => quill_common::ApiError::bad_request(reason),
            other => quill_common::ApiError::internal(other.to_string()),
        }
    }
}

/// Derivative written next to the primary file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedVersion {
    pub kind: String,
    pub path: String,
    pub size: i64,
}

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub original_name: String,
    pub mime_type: String,
    pub data: Bytes,
    pub blog_id: Option<i64>,
    pub folder: Option<String>,
    pub allowed: Option<Vec<FileType>>,
    pub compress_images: bool,
    /// 1-100, applied to the recompressed variant. `None` means 85.
    pub quality: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub filename: String,
    pub path: String,
    pub size: i64,
    pub mime_type: String,
    pub file_type: FileType,
    pub file_format: String,
    pub processed_versions: Vec<ProcessedVersion>,
}

#[async_trait]
pub trait StorageProvider: Send + Sync {
    async fn store(&self, request: UploadRequest) -> MediaResult<StoredFile>;

    /// Removes the primary file and, best effort, its derivatives.
    async fn delete(&self, path: &str) -> MediaResult<()>;
}

/// Chosen once at startup. Only the local backend exists; the other
/// selectors warn and fall back so a misconfigured box still boots.
pub fn provider_for(kind: StorageProviderKind, root: impl Into<PathBuf>) -> LocalProvider {
    if kind != StorageProviderKind::Local {
        tracing::warn!(
            provider = kind.as_str(),
            "storage provider not implemented, falling back to local"
        );
    }
    LocalProvider::new(root)
}
