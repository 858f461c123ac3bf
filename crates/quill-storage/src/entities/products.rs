use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_category_id: i64,
    pub brand_id: Option<i64>,
    pub name: String,
    #[sea_orm(unique_key = "product_slug")]
    pub slug: String,
    pub sku: String,
    /// Cost price; never serialized on public endpoints.
    pub purchase_price: f64,
    pub sale_price: f64,
    pub offer_price: Option<f64>,
    pub stock: i64,
    /// Units held back; sellable while stock > limit.
    pub stock_reservation_limit: i64,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
    #[sea_orm(belongs_to, from = "product_category_id", to = "id")]
    pub product_category: HasOne<super::product_categories::Entity>,
    #[sea_orm(belongs_to, from = "brand_id", to = "id")]
    pub brand: HasOne<super::brands::Entity>,
    #[sea_orm(has_many)]
    pub media: HasMany<super::product_media::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
