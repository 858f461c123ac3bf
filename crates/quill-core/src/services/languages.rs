use quill_common::{ApiError, ApiResult};
use quill_storage::entities::languages;
use quill_storage::{CmsStorage, NewLanguage};

#[derive(Clone)]
pub struct LanguageService {
    storage: CmsStorage,
}

impl LanguageService {
    pub fn new(storage: CmsStorage) -> Self {
        Self { storage }
    }

    pub async fn create(
        &self,
        code: &str,
        name: &str,
        is_default: bool,
        is_active: bool,
    ) -> ApiResult<languages::Model> {
        if self.storage.find_language_by_code(code).await?.is_some() {
            return Err(ApiError::conflict("language code already exists"));
        }
        let language = self
            .storage
            .insert_language(NewLanguage {
                code: code.to_string(),
                name: name.to_string(),
                is_default,
                is_active,
            })
            .await?;
        Ok(language)
    }

    pub async fn update(
        &self,
        id: i64,
        name: Option<String>,
        is_default: Option<bool>,
        is_active: Option<bool>,
    ) -> ApiResult<languages::Model> {
        self.get(id).await?;
        self.storage
            .update_language(id, name, is_default, is_active)
            .await?;
        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<languages::Model> {
        self.storage
            .find_language(id)
            .await?
            .ok_or_else(|| ApiError::not_found("language"))
    }

    pub async fn get_by_code(&self, code: &str) -> ApiResult<languages::Model> {
        self.storage
            .find_language_by_code(code)
            .await?
            .ok_or_else(|| ApiError::not_found("language"))
    }

    pub async fn list(&self, active_only: bool) -> ApiResult<Vec<languages::Model>> {
        if active_only {
            Ok(self.storage.list_active_languages().await?)
        } else {
            Ok(self.storage.list_languages().await?)
        }
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let language = self.get(id).await?;
        if language.is_default {
            return Err(ApiError::bad_request("cannot delete the default language"));
        }
        self.storage.soft_delete_language(id).await?;
        Ok(())
    }
}
