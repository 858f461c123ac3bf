pub mod config;
pub mod error;
pub mod seo;
pub mod slug;

pub use config::{GlobalConfig, GlobalConfigError, GlobalConfigPatch, StorageProviderKind};
pub use error::{ApiError, ApiResult};
