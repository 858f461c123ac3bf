use serde_json::Value;

use quill_common::{ApiError, ApiResult, slug};
use quill_storage::entities::carousels;
use quill_storage::{CmsStorage, NewCarousel};

#[derive(Clone)]
pub struct CarouselService {
    storage: CmsStorage,
}

impl CarouselService {
    pub fn new(storage: CmsStorage) -> Self {
        Self { storage }
    }

    fn check_items(items: &Value) -> ApiResult<()> {
        if items.is_array() {
            Ok(())
        } else {
            Err(ApiError::bad_request("carousel items must be an array"))
        }
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<String>,
        items: Value,
        sort_order: i32,
    ) -> ApiResult<carousels::Model> {
        Self::check_items(&items)?;
        let existing = self.storage.carousel_slugs().await?;
        let carousel_slug = slug::generate_unique(name, &existing);
        let carousel = self
            .storage
            .insert_carousel(NewCarousel {
                name: name.to_string(),
                slug: carousel_slug,
                description,
                items,
                is_active: true,
                sort_order,
            })
            .await?;
        Ok(carousel)
    }

    pub async fn update(
        &self,
        id: i64,
        name: Option<String>,
        description: Option<Option<String>>,
        items: Option<Value>,
        is_active: Option<bool>,
        sort_order: Option<i32>,
    ) -> ApiResult<carousels::Model> {
        self.get(id).await?;
        if let Some(items) = &items {
            Self::check_items(items)?;
        }
        self.storage
            .update_carousel(id, name, description, items, is_active, sort_order)
            .await?;
        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<carousels::Model> {
        self.storage
            .find_carousel(id)
            .await?
            .ok_or_else(|| ApiError::not_found("carousel"))
    }

    pub async fn get_by_slug(&self, carousel_slug: &str) -> ApiResult<carousels::Model> {
        self.storage
            .find_carousel_by_slug(carousel_slug)
            .await?
            .ok_or_else(|| ApiError::not_found("carousel"))
    }

    pub async fn list(&self, active_only: bool) -> ApiResult<Vec<carousels::Model>> {
        Ok(self.storage.list_carousels(active_only).await?)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.get(id).await?;
        self.storage.soft_delete_carousel(id).await?;
        Ok(())
    }
}
