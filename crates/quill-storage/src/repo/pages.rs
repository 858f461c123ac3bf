use std::collections::{HashMap, HashSet};

use sea_orm::entity::prelude::Json;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue, ColumnTrait, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use time::OffsetDateTime;

use crate::entities;
use crate::storage::{CmsStorage, StorageResult};

#[derive(Debug, Clone)]
pub struct NewPage {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub status: String,
    pub parent_id: Option<i64>,
    pub author_id: i64,
    pub menu_order: i32,
    pub show_in_home_menu: bool,
    pub show_in_footer_menu: bool,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub seo_json_ld: Option<Json>,
    pub published_at: Option<OffsetDateTime>,
}

/// `None` leaves a column alone; `Some(None)` clears a nullable one.
#[derive(Debug, Clone, Default)]
pub struct PagePatch {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    pub parent_id: Option<Option<i64>>,
    pub menu_order: Option<i32>,
    pub show_in_home_menu: Option<bool>,
    pub show_in_footer_menu: Option<bool>,
    pub seo_title: Option<Option<String>>,
    pub seo_description: Option<Option<String>>,
    pub seo_keywords: Option<Option<String>>,
    pub seo_json_ld: Option<Option<Json>>,
    pub published_at: Option<Option<OffsetDateTime>>,
    pub is_active: Option<bool>,
}

impl CmsStorage {
    pub async fn page_slugs(&self) -> StorageResult<HashSet<String>> {
        use entities::pages::Column;
        let slugs: Vec<String> = entities::Pages::find()
            .select_only()
            .column(Column::Slug)
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(slugs.into_iter().collect())
    }

    pub async fn insert_page(&self, input: NewPage) -> StorageResult<entities::pages::Model> {
        let now = OffsetDateTime::now_utc();
        let active = entities::pages::ActiveModel {
            id: ActiveValue::NotSet,
            slug: ActiveValue::Set(input.slug),
            title: ActiveValue::Set(input.title),
            content: ActiveValue::Set(input.content),
            status: ActiveValue::Set(input.status),
            parent_id: ActiveValue::Set(input.parent_id),
            author_id: ActiveValue::Set(input.author_id),
            menu_order: ActiveValue::Set(input.menu_order),
            show_in_home_menu: ActiveValue::Set(input.show_in_home_menu),
            show_in_footer_menu: ActiveValue::Set(input.show_in_footer_menu),
            seo_title: ActiveValue::Set(input.seo_title),
            seo_description: ActiveValue::Set(input.seo_description),
            seo_keywords: ActiveValue::Set(input.seo_keywords),
            seo_json_ld: ActiveValue::Set(input.seo_json_ld),
            view_count: ActiveValue::Set(0),
            is_active: ActiveValue::Set(true),
            published_at: ActiveValue::Set(input.published_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        };
        let result = entities::Pages::insert(active).exec(self.db()).await?;
        let page = entities::Pages::find_by_id(result.last_insert_id)
            .one(self.db())
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("page after insert".into()))?;
        Ok(page)
    }

    pub async fn update_page(&self, id: i64, patch: PagePatch) -> StorageResult<()> {
        let mut active = entities::pages::ActiveModel {
            id: ActiveValue::Set(id),
            updated_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        if let Some(slug) = patch.slug {
            active.slug = ActiveValue::Set(slug);
        }
        if let Some(title) = patch.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(content) = patch.content {
            active.content = ActiveValue::Set(content);
        }
        if let Some(status) = patch.status {
            active.status = ActiveValue::Set(status);
        }
        if let Some(parent_id) = patch.parent_id {
            active.parent_id = ActiveValue::Set(parent_id);
        }
        if let Some(menu_order) = patch.menu_order {
            active.menu_order = ActiveValue::Set(menu_order);
        }
        if let Some(show_in_home_menu) = patch.show_in_home_menu {
            active.show_in_home_menu = ActiveValue::Set(show_in_home_menu);
        }
        if let Some(show_in_footer_menu) = patch.show_in_footer_menu {
            active.show_in_footer_menu = ActiveValue::Set(show_in_footer_menu);
        }
        if let Some(seo_title) = patch.seo_title {
            active.seo_title = ActiveValue::Set(seo_title);
        }
        if let Some(seo_description) = patch.seo_description {
            active.seo_description = ActiveValue::Set(seo_description);
        }
        if let Some(seo_keywords) = patch.seo_keywords {
            active.seo_keywords = ActiveValue::Set(seo_keywords);
        }
        if let Some(seo_json_ld) = patch.seo_json_ld {
            active.seo_json_ld = ActiveValue::Set(seo_json_ld);
        }
        if let Some(published_at) = patch.published_at {
            active.published_at = ActiveValue::Set(published_at);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        entities::Pages::update(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn find_page(&self, id: i64) -> StorageResult<Option<entities::pages::Model>> {
        use entities::pages::Column;
        let page = entities::Pages::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(page)
    }

    pub async fn find_page_by_slug(
        &self,
        slug: &str,
    ) -> StorageResult<Option<entities::pages::Model>> {
        use entities::pages::Column;
        let page = entities::Pages::find()
            .filter(Column::Slug.eq(slug))
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(page)
    }

    pub async fn list_pages(
        &self,
        status: Option<&str>,
    ) -> StorageResult<Vec<entities::pages::Model>> {
        use entities::pages::Column;
        let mut query = entities::Pages::find().filter(Column::DeletedAt.is_null());
        if let Some(status) = status {
            query = query.filter(Column::Status.eq(status));
        }
        let pages = query
            .order_by_asc(Column::MenuOrder)
            .order_by_asc(Column::Id)
            .all(self.db())
            .await?;
        Ok(pages)
    }

    pub async fn page_children(
        &self,
        parent_id: i64,
    ) -> StorageResult<Vec<entities::pages::Model>> {
        use entities::pages::Column;
        let pages = entities::Pages::find()
            .filter(Column::ParentId.eq(parent_id))
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::MenuOrder)
            .order_by_asc(Column::Id)
            .all(self.db())
            .await?;
        Ok(pages)
    }

    pub async fn page_child_count(&self, parent_id: i64) -> StorageResult<u64> {
        use entities::pages::Column;
        let count = entities::Pages::find()
            .filter(Column::ParentId.eq(parent_id))
            .filter(Column::DeletedAt.is_null())
            .count(self.db())
            .await?;
        Ok(count)
    }

    /// id -> parent_id map over live pages, for the cycle walk on reparent.
    pub async fn page_parent_index(&self) -> StorageResult<HashMap<i64, Option<i64>>> {
        use entities::pages::Column;
        let rows: Vec<(i64, Option<i64>)> = entities::Pages::find()
            .select_only()
            .column(Column::Id)
            .column(Column::ParentId)
            .filter(Column::DeletedAt.is_null())
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(rows.into_iter().collect())
    }

    /// Published, active pages flagged for the given menu slot.
    pub async fn menu_pages(&self, footer: bool) -> StorageResult<Vec<entities::pages::Model>> {
        use entities::pages::Column;
        let flag = if footer {
            Column::ShowInFooterMenu
        } else {
            Column::ShowInHomeMenu
        };
        let pages = entities::Pages::find()
            .filter(flag.eq(true))
            .filter(Column::Status.eq("published"))
            .filter(Column::IsActive.eq(true))
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::MenuOrder)
            .order_by_asc(Column::Id)
            .all(self.db())
            .await?;
        Ok(pages)
    }

    pub async fn increment_page_views(&self, id: i64) -> StorageResult<()> {
        use entities::pages::Column;
        entities::Pages::update_many()
            .col_expr(Column::ViewCount, Expr::col(Column::ViewCount).add(1))
            .filter(Column::Id.eq(id))
            .exec(self.db())
            .await?;
        Ok(())
    }

    pub async fn soft_delete_page(&self, id: i64) -> StorageResult<()> {
        let active = entities::pages::ActiveModel {
            id: ActiveValue::Set(id),
            is_active: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        };
        entities::Pages::update(active).exec(self.db()).await?;
        Ok(())
    }
}
