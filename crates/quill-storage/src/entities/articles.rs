use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

/// Language-agnostic article root. Localized content lives in
/// `article_translations`, one row per language.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub blog_id: i64,
    pub author_id: i64,
    pub editor_id: Option<i64>,
    #[sea_orm(unique_key = "article_slug")]
    pub slug: String,
    /// draft | published | archived
    pub status: String,
    pub featured_image: Option<String>,
    pub published_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
    #[sea_orm(belongs_to, from = "blog_id", to = "id", on_delete = "Cascade")]
    pub blog: HasOne<super::blogs::Entity>,
    #[sea_orm(belongs_to, from = "author_id", to = "id")]
    pub author: HasOne<super::users::Entity>,
    #[sea_orm(has_many)]
    pub translations: HasMany<super::article_translations::Entity>,
    #[sea_orm(has_many)]
    pub categories: HasMany<super::article_categories::Entity>,
    #[sea_orm(has_many)]
    pub tags: HasMany<super::article_tags::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
