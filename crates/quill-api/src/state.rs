use std::sync::{Arc, RwLock};

use quill_common::GlobalConfig;
use quill_core::auth::AuthTokens;
use quill_core::services::{
    ApiKeyService, AuthService, BlogService, CarouselService, CatalogService, ContentService,
    LanguageService, PageService, UploadService, UserService,
};
use quill_media::provider_for;
use quill_storage::CmsStorage;

/// Shared state behind every handler: one storage pool, one token issuer,
/// and the in-process config.
#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<RwLock<GlobalConfig>>,
    pub auth: AuthService,
    pub api_keys: ApiKeyService,
    pub users: UserService,
    pub languages: LanguageService,
    pub blogs: BlogService,
    pub content: ContentService,
    pub pages: PageService,
    pub catalog: CatalogService,
    pub carousels: CarouselService,
    pub uploads: UploadService,
}

impl ApiState {
    pub fn new(storage: CmsStorage, config: GlobalConfig) -> Self {
        let tokens = AuthTokens::new(&config.jwt_secret);
        let provider = Arc::new(provider_for(
            config.storage_provider,
            config.uploads_dir.clone(),
        ));
        let uploads = UploadService::new(storage.clone(), provider, &config.base_url);
        Self {
            auth: AuthService::new(storage.clone(), tokens.clone()),
            api_keys: ApiKeyService::new(storage.clone(), tokens),
            users: UserService::new(storage.clone()),
            languages: LanguageService::new(storage.clone()),
            blogs: BlogService::new(storage.clone()),
            content: ContentService::new(storage.clone()),
            pages: PageService::new(storage.clone()),
            catalog: CatalogService::new(storage.clone()),
            carousels: CarouselService::new(storage),
            uploads,
            config: Arc::new(RwLock::new(config)),
        }
    }

    pub fn uploads_dir(&self) -> String {
        self.config
            .read()
            .map(|config| config.uploads_dir.clone())
            .unwrap_or_else(|_| "uploads".to_string())
    }

    pub fn cors_origin(&self) -> Option<String> {
        self.config
            .read()
            .ok()
            .and_then(|config| config.cors_origin.clone())
    }
}
