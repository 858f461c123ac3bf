use std::collections::HashSet;

use sea_orm::entity::prelude::Json;
use sea_orm::{
    ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use time::OffsetDateTime;

use crate::entities;
use crate::storage::{CmsStorage, StorageResult};

#[derive(Debug, Clone)]
pub struct NewBlog {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub seo_json_ld: Option<Json>,
}

/// `None` leaves a column alone; `Some(None)` clears a nullable one.
#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub seo_title: Option<Option<String>>,
    pub seo_description: Option<Option<String>>,
    pub seo_keywords: Option<Option<String>>,
    pub seo_json_ld: Option<Option<Json>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub blog_id: i64,
    pub author_id: i64,
    pub editor_id: Option<i64>,
    pub slug: String,
    pub status: String,
    pub featured_image: Option<String>,
    pub published_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct NewArticleTranslation {
    pub article_id: i64,
    pub language_id: i64,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_json_ld: Option<Json>,
}

#[derive(Debug, Clone, Default)]
pub struct ArticlePatch {
    pub editor_id: Option<Option<i64>>,
    pub status: Option<String>,
    pub featured_image: Option<Option<String>>,
    pub published_at: Option<Option<OffsetDateTime>>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub slug: String,
    pub is_active: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone)]
pub struct NewCategoryTranslation {
    pub category_id: i64,
    pub language_id: i64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub slug: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewTagTranslation {
    pub tag_id: i64,
    pub language_id: i64,
    pub slug: String,
    pub name: String,
}

impl CmsStorage {
    // --- blogs ---

    /// Every blog slug ever issued, soft-deleted rows included; the unique
    /// index spans them, so disambiguation has to as well.
    pub async fn blog_slugs(&self) -> StorageResult<HashSet<String>> {
        use entities::blogs::Column;
        let slugs: Vec<String> = entities::Blogs::find()
            .select_only()
            .column(Column::Slug)
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(slugs.into_iter().collect())
    }

    pub async fn insert_blog(&self, input: NewBlog) -> StorageResult<entities::blogs::Model> {
        let now = OffsetDateTime::now_utc();
        let active = entities::blogs::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(input.name),
            slug: ActiveValue::Set(input.slug),
            description: ActiveValue::Set(input.description),
            owner_id: ActiveValue::Set(input.owner_id),
            seo_title: ActiveValue::Set(input.seo_title),
            seo_description: ActiveValue::Set(input.seo_description),
            seo_keywords: ActiveValue::Set(input.seo_keywords),
            seo_json_ld: ActiveValue::Set(input.seo_json_ld),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        };
        let result = entities::Blogs::insert(active).exec(self.db()).await?;
        let blog = entities::Blogs::find_by_id(result.last_insert_id)
            .one(self.db())
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("blog after insert".into()))?;
        Ok(blog)
    }

    pub async fn find_blog(&self, id: i64) -> StorageResult<Option<entities::blogs::Model>> {
        use entities::blogs::Column;
        let blog = entities::Blogs::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(blog)
    }

    pub async fn find_blog_by_slug(
        &self,
        slug: &str,
    ) -> StorageResult<Option<entities::blogs::Model>> {
        use entities::blogs::Column;
        let blog = entities::Blogs::find()
            .filter(Column::Slug.eq(slug))
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(blog)
    }

    pub async fn list_blogs(&self, owner_id: Option<i64>) -> StorageResult<Vec<entities::blogs::Model>> {
        use entities::blogs::Column;
        let mut query = entities::Blogs::find().filter(Column::DeletedAt.is_null());
        if let Some(owner_id) = owner_id {
            query = query.filter(Column::OwnerId.eq(owner_id));
        }
        let blogs = query.order_by_asc(Column::Name).all(self.db()).await?;
        Ok(blogs)
    }

    pub async fn update_blog(&self, id: i64, patch: BlogPatch) -> StorageResult<()> {
        let mut active = entities::blogs::ActiveModel {
            id: ActiveValue::Set(id),
            updated_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        if let Some(name) = patch.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = patch.description {
            active.description = ActiveValue::Set(description);
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
        if let Some(is_active) = patch.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        entities::Blogs::update(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn soft_delete_blog(&self, id: i64) -> StorageResult<()> {
        let active = entities::blogs::ActiveModel {
            id: ActiveValue::Set(id),
            is_active: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        };
        entities::Blogs::update(active).exec(self.db()).await?;
        Ok(())
    }

    // --- articles ---

    pub async fn article_slugs(&self) -> StorageResult<HashSet<String>> {
        use entities::articles::Column;
        let slugs: Vec<String> = entities::Articles::find()
            .select_only()
            .column(Column::Slug)
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(slugs.into_iter().collect())
    }

    pub async fn insert_article(
        &self,
        input: NewArticle,
    ) -> StorageResult<entities::articles::Model> {
        let now = OffsetDateTime::now_utc();
        let active = entities::articles::ActiveModel {
            id: ActiveValue::NotSet,
            blog_id: ActiveValue::Set(input.blog_id),
            author_id: ActiveValue::Set(input.author_id),
            editor_id: ActiveValue::Set(input.editor_id),
            slug: ActiveValue::Set(input.slug),
            status: ActiveValue::Set(input.status),
            featured_image: ActiveValue::Set(input.featured_image),
            published_at: ActiveValue::Set(input.published_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        };
        let result = entities::Articles::insert(active).exec(self.db()).await?;
        let article = entities::Articles::find_by_id(result.last_insert_id)
            .one(self.db())
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("article after insert".into()))?;
        Ok(article)
    }

    pub async fn update_article(&self, id: i64, patch: ArticlePatch) -> StorageResult<()> {
        let mut active = entities::articles::ActiveModel {
            id: ActiveValue::Set(id),
            updated_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        if let Some(editor_id) = patch.editor_id {
            active.editor_id = ActiveValue::Set(editor_id);
        }
        if let Some(status) = patch.status {
            active.status = ActiveValue::Set(status);
        }
        if let Some(featured_image) = patch.featured_image {
            active.featured_image = ActiveValue::Set(featured_image);
        }
        if let Some(published_at) = patch.published_at {
            active.published_at = ActiveValue::Set(published_at);
        }
        entities::Articles::update(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn find_article(&self, id: i64) -> StorageResult<Option<entities::articles::Model>> {
        use entities::articles::Column;
        let article = entities::Articles::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(article)
    }

    pub async fn find_article_by_slug(
        &self,
        slug: &str,
    ) -> StorageResult<Option<entities::articles::Model>> {
        use entities::articles::Column;
        let article = entities::Articles::find()
            .filter(Column::Slug.eq(slug))
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(article)
    }

    pub async fn list_articles(
        &self,
        blog_id: Option<i64>,
        status: Option<&str>,
    ) -> StorageResult<Vec<entities::articles::Model>> {
        use entities::articles::Column;
        let mut query = entities::Articles::find().filter(Column::DeletedAt.is_null());
        if let Some(blog_id) = blog_id {
            query = query.filter(Column::BlogId.eq(blog_id));
        }
        if let Some(status) = status {
            query = query.filter(Column::Status.eq(status));
        }
        let articles = query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(self.db())
            .await?;
        Ok(articles)
    }

    pub async fn soft_delete_article(&self, id: i64) -> StorageResult<()> {
        let active = entities::articles::ActiveModel {
            id: ActiveValue::Set(id),
            deleted_at: ActiveValue::Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        };
        entities::Articles::update(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn insert_article_translation(
        &self,
        input: NewArticleTranslation,
    ) -> StorageResult<()> {
        let now = OffsetDateTime::now_utc();
        let active = entities::article_translations::ActiveModel {
            id: ActiveValue::NotSet,
            article_id: ActiveValue::Set(input.article_id),
            language_id: ActiveValue::Set(input.language_id),
            slug: ActiveValue::Set(input.slug),
            title: ActiveValue::Set(input.title),
            excerpt: ActiveValue::Set(input.excerpt),
            content: ActiveValue::Set(input.content),
            seo_title: ActiveValue::Set(input.seo_title),
            seo_description: ActiveValue::Set(input.seo_description),
            seo_json_ld: ActiveValue::Set(input.seo_json_ld),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };
        entities::ArticleTranslations::insert(active)
            .exec(self.db())
            .await?;
        Ok(())
    }

    /// Update fan-out: the incoming translation set wins wholesale.
    pub async fn replace_article_translations(
        &self,
        article_id: i64,
        translations: Vec<NewArticleTranslation>,
    ) -> StorageResult<()> {
        use entities::article_translations::Column;
        let now = OffsetDateTime::now_utc();
        let txn = self.db().begin().await?;
        entities::ArticleTranslations::delete_many()
            .filter(Column::ArticleId.eq(article_id))
            .exec(&txn)
            .await?;
        for input in translations {
            let active = entities::article_translations::ActiveModel {
                id: ActiveValue::NotSet,
                article_id: ActiveValue::Set(article_id),
                language_id: ActiveValue::Set(input.language_id),
                slug: ActiveValue::Set(input.slug),
                title: ActiveValue::Set(input.title),
                excerpt: ActiveValue::Set(input.excerpt),
                content: ActiveValue::Set(input.content),
                seo_title: ActiveValue::Set(input.seo_title),
                seo_description: ActiveValue::Set(input.seo_description),
                seo_json_ld: ActiveValue::Set(input.seo_json_ld),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };
            entities::ArticleTranslations::insert(active)
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(())
    }

    pub async fn article_translations(
        &self,
        article_id: i64,
    ) -> StorageResult<Vec<entities::article_translations::Model>> {
        use entities::article_translations::Column;
        let rows = entities::ArticleTranslations::find()
            .filter(Column::ArticleId.eq(article_id))
            .order_by_asc(Column::LanguageId)
            .all(self.db())
            .await?;
        Ok(rows)
    }

    pub async fn translations_for_articles(
        &self,
        article_ids: &[i64],
    ) -> StorageResult<Vec<entities::article_translations::Model>> {
        use entities::article_translations::Column;
        if article_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = entities::ArticleTranslations::find()
            .filter(Column::ArticleId.is_in(article_ids.to_vec()))
            .order_by_asc(Column::ArticleId)
            .order_by_asc(Column::LanguageId)
            .all(self.db())
            .await?;
        Ok(rows)
    }

    pub async fn set_article_categories(
        &self,
        article_id: i64,
        category_ids: &[i64],
    ) -> StorageResult<()> {
        use entities::article_categories::Column;
        let txn = self.db().begin().await?;
        entities::ArticleCategories::delete_many()
            .filter(Column::ArticleId.eq(article_id))
            .exec(&txn)
            .await?;
        for category_id in category_ids {
            let active = entities::article_categories::ActiveModel {
                id: ActiveValue::NotSet,
                article_id: ActiveValue::Set(article_id),
                category_id: ActiveValue::Set(*category_id),
            };
            entities::ArticleCategories::insert(active).exec(&txn).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    pub async fn set_article_tags(&self, article_id: i64, tag_ids: &[i64]) -> StorageResult<()> {
        use entities::article_tags::Column;
        let txn = self.db().begin().await?;
        entities::ArticleTags::delete_many()
            .filter(Column::ArticleId.eq(article_id))
            .exec(&txn)
            .await?;
        for tag_id in tag_ids {
            let active = entities::article_tags::ActiveModel {
                id: ActiveValue::NotSet,
                article_id: ActiveValue::Set(article_id),
                tag_id: ActiveValue::Set(*tag_id),
            };
            entities::ArticleTags::insert(active).exec(&txn).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    pub async fn article_category_ids(&self, article_id: i64) -> StorageResult<Vec<i64>> {
        use entities::article_categories::Column;
        let ids = entities::ArticleCategories::find()
            .filter(Column::ArticleId.eq(article_id))
            .select_only()
            .column(Column::CategoryId)
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(ids)
    }

    pub async fn article_tag_ids(&self, article_id: i64) -> StorageResult<Vec<i64>> {
        use entities::article_tags::Column;
        let ids = entities::ArticleTags::find()
            .filter(Column::ArticleId.eq(article_id))
            .select_only()
            .column(Column::TagId)
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(ids)
    }

    // --- categories ---

    pub async fn category_slugs(&self) -> StorageResult<HashSet<String>> {
        use entities::categories::Column;
        let slugs: Vec<String> = entities::Categories::find()
            .select_only()
            .column(Column::Slug)
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(slugs.into_iter().collect())
    }

    pub async fn insert_category(
        &self,
        input: NewCategory,
    ) -> StorageResult<entities::categories::Model> {
        let now = OffsetDateTime::now_utc();
        let active = entities::categories::ActiveModel {
            id: ActiveValue::NotSet,
            slug: ActiveValue::Set(input.slug),
            is_active: ActiveValue::Set(input.is_active),
            sort_order: ActiveValue::Set(input.sort_order),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        };
        let result = entities::Categories::insert(active).exec(self.db()).await?;
        let category = entities::Categories::find_by_id(result.last_insert_id)
            .one(self.db())
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("category after insert".into()))?;
        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: i64,
        is_active: Option<bool>,
        sort_order: Option<i32>,
    ) -> StorageResult<()> {
        let mut active = entities::categories::ActiveModel {
            id: ActiveValue::Set(id),
            updated_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        if let Some(is_active) = is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        if let Some(sort_order) = sort_order {
            active.sort_order = ActiveValue::Set(sort_order);
        }
        entities::Categories::update(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn find_category(
        &self,
        id: i64,
    ) -> StorageResult<Option<entities::categories::Model>> {
        use entities::categories::Column;
        let category = entities::Categories::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(category)
    }

    pub async fn find_category_by_slug(
        &self,
        slug: &str,
    ) -> StorageResult<Option<entities::categories::Model>> {
        use entities::categories::Column;
        let category = entities::Categories::find()
            .filter(Column::Slug.eq(slug))
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(category)
    }

    pub async fn find_categories_by_ids(
        &self,
        ids: &[i64],
    ) -> StorageResult<Vec<entities::categories::Model>> {
        use entities::categories::Column;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let categories = entities::Categories::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .filter(Column::DeletedAt.is_null())
            .all(self.db())
            .await?;
        Ok(categories)
    }

    pub async fn list_categories(&self) -> StorageResult<Vec<entities::categories::Model>> {
        use entities::categories::Column;
        let categories = entities::Categories::find()
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Slug)
            .all(self.db())
            .await?;
        Ok(categories)
    }

    pub async fn soft_delete_category(&self, id: i64) -> StorageResult<()> {
        let active = entities::categories::ActiveModel {
            id: ActiveValue::Set(id),
            is_active: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        };
        entities::Categories::update(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn replace_category_translations(
        &self,
        category_id: i64,
        translations: Vec<NewCategoryTranslation>,
    ) -> StorageResult<()> {
        use entities::category_translations::Column;
        let now = OffsetDateTime::now_utc();
        let txn = self.db().begin().await?;
        entities::CategoryTranslations::delete_many()
            .filter(Column::CategoryId.eq(category_id))
            .exec(&txn)
            .await?;
        for input in translations {
            let active = entities::category_translations::ActiveModel {
                id: ActiveValue::NotSet,
                category_id: ActiveValue::Set(category_id),
                language_id: ActiveValue::Set(input.language_id),
                slug: ActiveValue::Set(input.slug),
                name: ActiveValue::Set(input.name),
                description: ActiveValue::Set(input.description),
                created_at: ActiveValue::Set(now),
            };
            entities::CategoryTranslations::insert(active)
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(())
    }

    pub async fn category_translations(
        &self,
        category_id: i64,
    ) -> StorageResult<Vec<entities::category_translations::Model>> {
        use entities::category_translations::Column;
        let rows = entities::CategoryTranslations::find()
            .filter(Column::CategoryId.eq(category_id))
            .order_by_asc(Column::LanguageId)
            .all(self.db())
            .await?;
        Ok(rows)
    }

    pub async fn translations_for_categories(
        &self,
        category_ids: &[i64],
    ) -> StorageResult<Vec<entities::category_translations::Model>> {
        use entities::category_translations::Column;
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = entities::CategoryTranslations::find()
            .filter(Column::CategoryId.is_in(category_ids.to_vec()))
            .order_by_asc(Column::CategoryId)
            .order_by_asc(Column::LanguageId)
            .all(self.db())
            .await?;
        Ok(rows)
    }

    // --- tags ---

    pub async fn tag_slugs(&self) -> StorageResult<HashSet<String>> {
        use entities::tags::Column;
        let slugs: Vec<String> = entities::Tags::find()
            .select_only()
            .column(Column::Slug)
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(slugs.into_iter().collect())
    }

    pub async fn insert_tag(&self, input: NewTag) -> StorageResult<entities::tags::Model> {
        let now = OffsetDateTime::now_utc();
        let active = entities::tags::ActiveModel {
            id: ActiveValue::NotSet,
            slug: ActiveValue::Set(input.slug),
            is_active: ActiveValue::Set(input.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        };
        let result = entities::Tags::insert(active).exec(self.db()).await?;
        let tag = entities::Tags::find_by_id(result.last_insert_id)
            .one(self.db())
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("tag after insert".into()))?;
        Ok(tag)
    }

    pub async fn update_tag(&self, id: i64, is_active: Option<bool>) -> StorageResult<()> {
        let mut active = entities::tags::ActiveModel {
            id: ActiveValue::Set(id),
            updated_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        if let Some(is_active) = is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        entities::Tags::update(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn find_tag(&self, id: i64) -> StorageResult<Option<entities::tags::Model>> {
        use entities::tags::Column;
        let tag = entities::Tags::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(tag)
    }

    pub async fn find_tag_by_slug(
        &self,
        slug: &str,
    ) -> StorageResult<Option<entities::tags::Model>> {
        use entities::tags::Column;
        let tag = entities::Tags::find()
            .filter(Column::Slug.eq(slug))
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(tag)
    }

    pub async fn find_tags_by_ids(
        &self,
        ids: &[i64],
    ) -> StorageResult<Vec<entities::tags::Model>> {
        use entities::tags::Column;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let tags = entities::Tags::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .filter(Column::DeletedAt.is_null())
            .all(self.db())
            .await?;
        Ok(tags)
    }

    pub async fn list_tags(&self) -> StorageResult<Vec<entities::tags::Model>> {
        use entities::tags::Column;
        let tags = entities::Tags::find()
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::Slug)
            .all(self.db())
            .await?;
        Ok(tags)
    }

    pub async fn soft_delete_tag(&self, id: i64) -> StorageResult<()> {
        let active = entities::tags::ActiveModel {
            id: ActiveValue::Set(id),
            is_active: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        };
        entities::Tags::update(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn replace_tag_translations(
        &self,
        tag_id: i64,
        translations: Vec<NewTagTranslation>,
    ) -> StorageResult<()> {
        use entities::tag_translations::Column;
        let now = OffsetDateTime::now_utc();
        let txn = self.db().begin().await?;
        entities::TagTranslations::delete_many()
            .filter(Column::TagId.eq(tag_id))
            .exec(&txn)
            .await?;
        for input in translations {
            let active = entities::tag_translations::ActiveModel {
                id: ActiveValue::NotSet,
                tag_id: ActiveValue::Set(tag_id),
                language_id: ActiveValue::Set(input.language_id),
                slug: ActiveValue::Set(input.slug),
                name: ActiveValue::Set(input.name),
                created_at: ActiveValue::Set(now),
            };
            entities::TagTranslations::insert(active).exec(&txn).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    pub async fn tag_translations(
        &self,
        tag_id: i64,
    ) -> StorageResult<Vec<entities::tag_translations::Model>> {
        use entities::tag_translations::Column;
        let rows = entities::TagTranslations::find()
            .filter(Column::TagId.eq(tag_id))
            .order_by_asc(Column::LanguageId)
            .all(self.db())
            .await?;
        Ok(rows)
    }

    pub async fn translations_for_tags(
        &self,
        tag_ids: &[i64],
    ) -> StorageResult<Vec<entities::tag_translations::Model>> {
        use entities::tag_translations::Column;
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = entities::TagTranslations::find()
            .filter(Column::TagId.is_in(tag_ids.to_vec()))
            .order_by_asc(Column::TagId)
            .order_by_asc(Column::LanguageId)
            .all(self.db())
            .await?;
        Ok(rows)
    }
}
