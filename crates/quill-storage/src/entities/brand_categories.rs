use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "brand_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique_key = "brand_category")]
    pub brand_id: i64,
    #[sea_orm(unique_key = "brand_category")]
    pub product_category_id: i64,
    #[sea_orm(belongs_to, from = "brand_id", to = "id", on_delete = "Cascade")]
    pub brand: HasOne<super::brands::Entity>,
    #[sea_orm(belongs_to, from = "product_category_id", to = "id", on_delete = "Cascade")]
    pub product_category: HasOne<super::product_categories::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
