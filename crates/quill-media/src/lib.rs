pub mod local;
pub mod paths;
pub mod provider;
pub mod validate;

pub use local::LocalProvider;
pub use provider::{
    MediaError, MediaResult, ProcessedVersion, StorageProvider, StoredFile, UploadRequest,
    provider_for,
};
pub use validate::{FileType, FileValidation, validate_file};
