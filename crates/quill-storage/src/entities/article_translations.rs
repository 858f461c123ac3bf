use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "article_translations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique_key = "article_language")]
    pub article_id: i64,
    #[sea_orm(unique_key = "article_language")]
    pub language_id: i64,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_json_ld: Option<Json>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    #[sea_orm(belongs_to, from = "article_id", to = "id", on_delete = "Cascade")]
    pub article: HasOne<super::articles::Entity>,
    #[sea_orm(belongs_to, from = "language_id", to = "id", on_delete = "Cascade")]
    pub language: HasOne<super::languages::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
