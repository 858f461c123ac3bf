use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tag_translations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique_key = "tag_language")]
    pub tag_id: i64,
    #[sea_orm(unique_key = "tag_language")]
    pub language_id: i64,
    pub slug: String,
    pub name: String,
    pub created_at: OffsetDateTime,
    #[sea_orm(belongs_to, from = "tag_id", to = "id", on_delete = "Cascade")]
    pub tag: HasOne<super::tags::Entity>,
    #[sea_orm(belongs_to, from = "language_id", to = "id", on_delete = "Cascade")]
    pub language: HasOne<super::languages::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
