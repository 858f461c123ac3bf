use std::collections::HashSet;

use sea_orm::entity::prelude::Json;
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use time::OffsetDateTime;

use crate::entities;
use crate::storage::{CmsStorage, StorageResult};

#[derive(Debug, Clone)]
pub struct NewCarousel {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub items: Json,
    pub is_active: bool,
    pub sort_order: i32,
}

impl CmsStorage {
    pub async fn carousel_slugs(&self) -> StorageResult<HashSet<String>> {
        use entities::carousels::Column;
        let slugs: Vec<String> = entities::Carousels::find()
            .select_only()
            .column(Column::Slug)
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(slugs.into_iter().collect())
    }

    pub async fn insert_carousel(
        &self,
        input: NewCarousel,
    ) -> StorageResult<entities::carousels::Model> {
        let now = OffsetDateTime::now_utc();
        let active = entities::carousels::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(input.name),
            slug: ActiveValue::Set(input.slug),
            description: ActiveValue::Set(input.description),
            items: ActiveValue::Set(input.items),
            is_active: ActiveValue::Set(input.is_active),
            sort_order: ActiveValue::Set(input.sort_order),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        };
        let result = entities::Carousels::insert(active).exec(self.db()).await?;
        let carousel = entities::Carousels::find_by_id(result.last_insert_id)
            .one(self.db())
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("carousel after insert".into()))?;
        Ok(carousel)
    }

    pub async fn update_carousel(
        &self,
        id: i64,
        name: Option<String>,
        description: Option<Option<String>>,
        items: Option<Json>,
        is_active: Option<bool>,
        sort_order: Option<i32>,
    ) -> StorageResult<()> {
        let mut active = entities::carousels::ActiveModel {
            id: ActiveValue::Set(id),
            updated_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        if let Some(name) = name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(items) = items {
            active.items = ActiveValue::Set(items);
        }
        if let Some(is_active) = is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        if let Some(sort_order) = sort_order {
            active.sort_order = ActiveValue::Set(sort_order);
        }
        entities::Carousels::update(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn find_carousel(
        &self,
        id: i64,
    ) -> StorageResult<Option<entities::carousels::Model>> {
        use entities::carousels::Column;
        let carousel = entities::Carousels::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(carousel)
    }

    pub async fn find_carousel_by_slug(
        &self,
        slug: &str,
    ) -> StorageResult<Option<entities::carousels::Model>> {
        use entities::carousels::Column;
        let carousel = entities::Carousels::find()
            .filter(Column::Slug.eq(slug))
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(carousel)
    }

    pub async fn list_carousels(
        &self,
        active_only: bool,
    ) -> StorageResult<Vec<entities::carousels::Model>> {
        use entities::carousels::Column;
        let mut query = entities::Carousels::find().filter(Column::DeletedAt.is_null());
        if active_only {
            query = query.filter(Column::IsActive.eq(true));
        }
        let carousels = query
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .all(self.db())
            .await?;
        Ok(carousels)
    }

    pub async fn soft_delete_carousel(&self, id: i64) -> StorageResult<()> {
        let active = entities::carousels::ActiveModel {
            id: ActiveValue::Set(id),
            is_active: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        };
        entities::Carousels::update(active).exec(self.db()).await?;
        Ok(())
    }
}
