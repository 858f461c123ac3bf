use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique_key = "role_name")]
    pub name: String,
    pub description: Option<String>,
    /// JSON array of permission strings.
    pub permissions: Json,
    pub created_at: OffsetDateTime,
    #[sea_orm(has_many)]
    pub users: HasMany<super::user_roles::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
