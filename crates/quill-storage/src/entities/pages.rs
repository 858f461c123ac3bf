use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

/// Self-referential page tree. `parent_id` is a nullable self-FK; the
/// circular-reference check lives in the pages service, not here.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique_key = "page_slug")]
    pub slug: String,
    pub title: String,
    pub content: String,
    /// draft | published | archived
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
    pub view_count: i64,
    pub is_active: bool,
    pub published_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
    #[sea_orm(belongs_to, from = "author_id", to = "id")]
    pub author: HasOne<super::users::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
