use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub filename: String,
    pub original_name: String,
    #[sea_orm(unique_key = "file_path")]
    pub path: String,
    pub url: String,
    pub size: i64,
    pub mime_type: String,
    /// audio | video | image | document
    pub file_type: String,
    pub file_format: String,
    pub blog_id: Option<i64>,
    pub user_id: Option<i64>,
    /// JSON array of { kind, path, size } derivative records.
    pub processed_versions: Json,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
    #[sea_orm(belongs_to, from = "blog_id", to = "id", on_delete = "Cascade")]
    pub blog: HasOne<super::blogs::Entity>,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::users::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
