use std::collections::HashSet;

use sea_orm::{
    ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use time::OffsetDateTime;

use crate::entities;
use crate::storage::{CmsStorage, StorageResult};

#[derive(Debug, Clone)]
pub struct NewBrand {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone)]
pub struct NewProductCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_category_id: i64,
    pub brand_id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub offer_price: Option<f64>,
    pub stock: i64,
    pub stock_reservation_limit: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewProductMedia {
    pub product_id: i64,
    pub path: String,
    pub alt: Option<String>,
    pub sort_order: i32,
}

/// `None` leaves a column alone; `Some(None)` clears a nullable one.
#[derive(Debug, Clone, Default)]
pub struct BrandPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub logo: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub product_category_id: Option<i64>,
    pub brand_id: Option<Option<i64>>,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub purchase_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub offer_price: Option<Option<f64>>,
    pub stock: Option<i64>,
    pub stock_reservation_limit: Option<i64>,
    pub is_active: Option<bool>,
}

impl CmsStorage {
    // --- brands ---

    pub async fn brand_slugs(&self) -> StorageResult<HashSet<String>> {
        use entities::brands::Column;
        let slugs: Vec<String> = entities::Brands::find()
            .select_only()
            .column(Column::Slug)
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(slugs.into_iter().collect())
    }

    /// Brand and its category links land in one transaction; a bad category
    /// id has already been rejected by the service.
    pub async fn insert_brand(
        &self,
        input: NewBrand,
        category_ids: &[i64],
    ) -> StorageResult<entities::brands::Model> {
        let now = OffsetDateTime::now_utc();
        let txn = self.db().begin().await?;
        let active = entities::brands::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(input.name),
            slug: ActiveValue::Set(input.slug),
            description: ActiveValue::Set(input.description),
            logo: ActiveValue::Set(input.logo),
            website: ActiveValue::Set(input.website),
            is_active: ActiveValue::Set(input.is_active),
            sort_order: ActiveValue::Set(input.sort_order),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        };
        let result = entities::Brands::insert(active).exec(&txn).await?;
        let brand_id = result.last_insert_id;
        for category_id in category_ids {
            let link = entities::brand_categories::ActiveModel {
                id: ActiveValue::NotSet,
                brand_id: ActiveValue::Set(brand_id),
                product_category_id: ActiveValue::Set(*category_id),
            };
            entities::BrandCategories::insert(link).exec(&txn).await?;
        }
        let brand = entities::Brands::find_by_id(brand_id)
            .one(&txn)
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("brand after insert".into()))?;
        txn.commit().await?;
        Ok(brand)
    }

    pub async fn update_brand(&self, id: i64, patch: BrandPatch) -> StorageResult<()> {
        let mut active = entities::brands::ActiveModel {
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
        if let Some(logo) = patch.logo {
            active.logo = ActiveValue::Set(logo);
        }
        if let Some(website) = patch.website {
            active.website = ActiveValue::Set(website);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        if let Some(sort_order) = patch.sort_order {
            active.sort_order = ActiveValue::Set(sort_order);
        }
        entities::Brands::update(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn set_brand_categories(
        &self,
        brand_id: i64,
        category_ids: &[i64],
    ) -> StorageResult<()> {
        use entities::brand_categories::Column;
        let txn = self.db().begin().await?;
        entities::BrandCategories::delete_many()
            .filter(Column::BrandId.eq(brand_id))
            .exec(&txn)
            .await?;
        for category_id in category_ids {
            let link = entities::brand_categories::ActiveModel {
                id: ActiveValue::NotSet,
                brand_id: ActiveValue::Set(brand_id),
                product_category_id: ActiveValue::Set(*category_id),
            };
            entities::BrandCategories::insert(link).exec(&txn).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    pub async fn brand_category_ids(&self, brand_id: i64) -> StorageResult<Vec<i64>> {
        use entities::brand_categories::Column;
        let ids = entities::BrandCategories::find()
            .filter(Column::BrandId.eq(brand_id))
            .select_only()
            .column(Column::ProductCategoryId)
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(ids)
    }

    pub async fn find_brand(&self, id: i64) -> StorageResult<Option<entities::brands::Model>> {
        use entities::brands::Column;
        let brand = entities::Brands::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(brand)
    }

    pub async fn find_brand_by_slug(
        &self,
        slug: &str,
    ) -> StorageResult<Option<entities::brands::Model>> {
        use entities::brands::Column;
        let brand = entities::Brands::find()
            .filter(Column::Slug.eq(slug))
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(brand)
    }

    pub async fn list_brands(&self, active_only: bool) -> StorageResult<Vec<entities::brands::Model>> {
        use entities::brands::Column;
        let mut query = entities::Brands::find().filter(Column::DeletedAt.is_null());
        if active_only {
            query = query.filter(Column::IsActive.eq(true));
        }
        let brands = query
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Name)
            .all(self.db())
            .await?;
        Ok(brands)
    }

    pub async fn soft_delete_brand(&self, id: i64) -> StorageResult<()> {
        let active = entities::brands::ActiveModel {
            id: ActiveValue::Set(id),
            is_active: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        };
        entities::Brands::update(active).exec(self.db()).await?;
        Ok(())
    }

    // --- product categories ---

    pub async fn product_category_slugs(&self) -> StorageResult<HashSet<String>> {
        use entities::product_categories::Column;
        let slugs: Vec<String> = entities::ProductCategories::find()
            .select_only()
            .column(Column::Slug)
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(slugs.into_iter().collect())
    }

    pub async fn insert_product_category(
        &self,
        input: NewProductCategory,
    ) -> StorageResult<entities::product_categories::Model> {
        let now = OffsetDateTime::now_utc();
        let active = entities::product_categories::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(input.name),
            slug: ActiveValue::Set(input.slug),
            description: ActiveValue::Set(input.description),
            is_active: ActiveValue::Set(input.is_active),
            sort_order: ActiveValue::Set(input.sort_order),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        };
        let result = entities::ProductCategories::insert(active)
            .exec(self.db())
            .await?;
        let category = entities::ProductCategories::find_by_id(result.last_insert_id)
            .one(self.db())
            .await?
            .ok_or_else(|| {
                sea_orm::DbErr::RecordNotFound("product category after insert".into())
            })?;
        Ok(category)
    }

    pub async fn update_product_category(
        &self,
        id: i64,
        name: Option<String>,
        description: Option<Option<String>>,
        is_active: Option<bool>,
        sort_order: Option<i32>,
    ) -> StorageResult<()> {
        let mut active = entities::product_categories::ActiveModel {
            id: ActiveValue::Set(id),
            updated_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        if let Some(name) = name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(is_active) = is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        if let Some(sort_order) = sort_order {
            active.sort_order = ActiveValue::Set(sort_order);
        }
        entities::ProductCategories::update(active)
            .exec(self.db())
            .await?;
        Ok(())
    }

    pub async fn find_product_category(
        &self,
        id: i64,
    ) -> StorageResult<Option<entities::product_categories::Model>> {
        use entities::product_categories::Column;
        let category = entities::ProductCategories::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(category)
    }

    pub async fn find_product_categories_by_ids(
        &self,
        ids: &[i64],
    ) -> StorageResult<Vec<entities::product_categories::Model>> {
        use entities::product_categories::Column;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let categories = entities::ProductCategories::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .filter(Column::DeletedAt.is_null())
            .all(self.db())
            .await?;
        Ok(categories)
    }

    pub async fn list_product_categories(
        &self,
    ) -> StorageResult<Vec<entities::product_categories::Model>> {
        use entities::product_categories::Column;
        let categories = entities::ProductCategories::find()
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Name)
            .all(self.db())
            .await?;
        Ok(categories)
    }

    pub async fn soft_delete_product_category(&self, id: i64) -> StorageResult<()> {
        let active = entities::product_categories::ActiveModel {
            id: ActiveValue::Set(id),
            is_active: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        };
        entities::ProductCategories::update(active)
            .exec(self.db())
            .await?;
        Ok(())
    }

    // --- products ---

    pub async fn product_slugs(&self) -> StorageResult<HashSet<String>> {
        use entities::products::Column;
        let slugs: Vec<String> = entities::Products::find()
            .select_only()
            .column(Column::Slug)
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(slugs.into_iter().collect())
    }

    pub async fn insert_product(
        &self,
        input: NewProduct,
    ) -> StorageResult<entities::products::Model> {
        let now = OffsetDateTime::now_utc();
        let active = entities::products::ActiveModel {
            id: ActiveValue::NotSet,
            product_category_id: ActiveValue::Set(input.product_category_id),
            brand_id: ActiveValue::Set(input.brand_id),
            name: ActiveValue::Set(input.name),
            slug: ActiveValue::Set(input.slug),
            sku: ActiveValue::Set(input.sku),
            purchase_price: ActiveValue::Set(input.purchase_price),
            sale_price: ActiveValue::Set(input.sale_price),
            offer_price: ActiveValue::Set(input.offer_price),
            stock: ActiveValue::Set(input.stock),
            stock_reservation_limit: ActiveValue::Set(input.stock_reservation_limit),
            is_active: ActiveValue::Set(input.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        };
        let result = entities::Products::insert(active).exec(self.db()).await?;
        let product = entities::Products::find_by_id(result.last_insert_id)
            .one(self.db())
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("product after insert".into()))?;
        Ok(product)
    }

    pub async fn update_product(&self, id: i64, patch: ProductPatch) -> StorageResult<()> {
        let mut active = entities::products::ActiveModel {
            id: ActiveValue::Set(id),
            updated_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        if let Some(product_category_id) = patch.product_category_id {
            active.product_category_id = ActiveValue::Set(product_category_id);
        }
        if let Some(brand_id) = patch.brand_id {
            active.brand_id = ActiveValue::Set(brand_id);
        }
        if let Some(name) = patch.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(sku) = patch.sku {
            active.sku = ActiveValue::Set(sku);
        }
        if let Some(purchase_price) = patch.purchase_price {
            active.purchase_price = ActiveValue::Set(purchase_price);
        }
        if let Some(sale_price) = patch.sale_price {
            active.sale_price = ActiveValue::Set(sale_price);
        }
        if let Some(offer_price) = patch.offer_price {
            active.offer_price = ActiveValue::Set(offer_price);
        }
        if let Some(stock) = patch.stock {
            active.stock = ActiveValue::Set(stock);
        }
        if let Some(limit) = patch.stock_reservation_limit {
            active.stock_reservation_limit = ActiveValue::Set(limit);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        entities::Products::update(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn find_product(&self, id: i64) -> StorageResult<Option<entities::products::Model>> {
        use entities::products::Column;
        let product = entities::Products::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(product)
    }

    pub async fn find_product_by_slug(
        &self,
        slug: &str,
    ) -> StorageResult<Option<entities::products::Model>> {
        use entities::products::Column;
        let product = entities::Products::find()
            .filter(Column::Slug.eq(slug))
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(product)
    }

    pub async fn list_products(
        &self,
        product_category_id: Option<i64>,
        brand_id: Option<i64>,
        active_only: bool,
    ) -> StorageResult<Vec<entities::products::Model>> {
        use entities::products::Column;
        let mut query = entities::Products::find().filter(Column::DeletedAt.is_null());
        if let Some(product_category_id) = product_category_id {
            query = query.filter(Column::ProductCategoryId.eq(product_category_id));
        }
        if let Some(brand_id) = brand_id {
            query = query.filter(Column::BrandId.eq(brand_id));
        }
        if active_only {
            query = query.filter(Column::IsActive.eq(true));
        }
        let products = query.order_by_asc(Column::Name).all(self.db()).await?;
        Ok(products)
    }

    pub async fn soft_delete_product(&self, id: i64) -> StorageResult<()> {
        let active = entities::products::ActiveModel {
            id: ActiveValue::Set(id),
            is_active: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        };
        entities::Products::update(active).exec(self.db()).await?;
        Ok(())
    }

    // --- product media ---

    pub async fn insert_product_media(&self, input: NewProductMedia) -> StorageResult<()> {
        let active = entities::product_media::ActiveModel {
            id: ActiveValue::NotSet,
            product_id: ActiveValue::Set(input.product_id),
            path: ActiveValue::Set(input.path),
            alt: ActiveValue::Set(input.alt),
            sort_order: ActiveValue::Set(input.sort_order),
            created_at: ActiveValue::Set(OffsetDateTime::now_utc()),
        };
        entities::ProductMedia::insert(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn product_media(
        &self,
        product_id: i64,
    ) -> StorageResult<Vec<entities::product_media::Model>> {
        use entities::product_media::Column;
        let media = entities::ProductMedia::find()
            .filter(Column::ProductId.eq(product_id))
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .all(self.db())
            .await?;
        Ok(media)
    }

    pub async fn delete_product_media(&self, id: i64) -> StorageResult<()> {
        entities::ProductMedia::delete_by_id(id)
            .exec(self.db())
            .await?;
        Ok(())
    }
}
