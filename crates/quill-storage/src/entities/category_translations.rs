use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "category_translations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique_key = "category_language")]
    pub category_id: i64,
    #[sea_orm(unique_key = "category_language")]
    pub language_id: i64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
    #[sea_orm(belongs_to, from = "category_id", to = "id", on_delete = "Cascade")]
    pub category: HasOne<super::categories::Entity>,
    #[sea_orm(belongs_to, from = "language_id", to = "id", on_delete = "Cascade")]
    pub language: HasOne<super::languages::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
