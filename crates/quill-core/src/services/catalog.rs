use quill_common::{ApiError, ApiResult, slug};
use quill_storage::entities::{brands, product_categories, product_media, products};
use quill_storage::{
    BrandPatch, CmsStorage, NewBrand, NewProduct, NewProductCategory, NewProductMedia,
    ProductPatch,
};

/// The offer price applies only while it actually undercuts the sale price.
pub fn effective_price(product: &products::Model) -> f64 {
    product
        .offer_price
        .filter(|offer| *offer < product.sale_price)
        .unwrap_or(product.sale_price)
}

/// Sellable only while stock exceeds the held-back reservation limit.
pub fn in_stock(product: &products::Model) -> bool {
    product.stock > product.stock_reservation_limit
}

#[derive(Debug, Clone)]
pub struct BrandView {
    pub brand: brands::Model,
    pub category_ids: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct NewBrandInput {
    pub name: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub sort_order: i32,
    pub category_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct BrandUpdateInput {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub logo: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
    pub category_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone)]
pub struct NewProductInput {
    pub product_category_id: i64,
    pub brand_id: Option<i64>,
    pub name: String,
    pub sku: String,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub offer_price: Option<f64>,
    pub stock: i64,
    pub stock_reservation_limit: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    storage: CmsStorage,
}

impl CatalogService {
    pub fn new(storage: CmsStorage) -> Self {
        Self { storage }
    }

    /// Rejects before any write; a brand is never persisted with a dangling
    /// category link.
    async fn check_product_category_ids(&self, ids: &[i64]) -> ApiResult<()> {
        let found = self.storage.find_product_categories_by_ids(ids).await?;
        let distinct: std::collections::HashSet<&i64> = ids.iter().collect();
        if found.len() != distinct.len() {
            return Err(ApiError::not_found("One or more categories"));
        }
        Ok(())
    }

    // --- brands ---

    pub async fn create_brand(&self, input: NewBrandInput) -> ApiResult<BrandView> {
        self.check_product_category_ids(&input.category_ids).await?;
        let existing = self.storage.brand_slugs().await?;
        let brand_slug = slug::generate_unique(&input.name, &existing);
        let brand = self
            .storage
            .insert_brand(
                NewBrand {
                    name: input.name,
                    slug: brand_slug,
                    description: input.description,
                    logo: input.logo,
                    website: input.website,
                    is_active: true,
                    sort_order: input.sort_order,
                },
                &input.category_ids,
            )
            .await?;
        Ok(BrandView {
            category_ids: self.storage.brand_category_ids(brand.id).await?,
            brand,
        })
    }

    pub async fn update_brand(&self, id: i64, input: BrandUpdateInput) -> ApiResult<BrandView> {
        self.get_brand(id).await?;
        if let Some(category_ids) = &input.category_ids {
            self.check_product_category_ids(category_ids).await?;
        }
        self.storage
            .update_brand(
                id,
                BrandPatch {
                    name: input.name,
                    description: input.description,
                    logo: input.logo,
                    website: input.website,
                    is_active: input.is_active,
                    sort_order: input.sort_order,
                },
            )
            .await?;
        if let Some(category_ids) = input.category_ids {
            self.storage.set_brand_categories(id, &category_ids).await?;
        }
        self.get_brand(id).await
    }

    pub async fn get_brand(&self, id: i64) -> ApiResult<BrandView> {
        let brand = self
            .storage
            .find_brand(id)
            .await?
            .ok_or_else(|| ApiError::not_found("brand"))?;
        Ok(BrandView {
            category_ids: self.storage.brand_category_ids(brand.id).await?,
            brand,
        })
    }

    pub async fn get_brand_by_slug(&self, brand_slug: &str) -> ApiResult<BrandView> {
        let brand = self
            .storage
            .find_brand_by_slug(brand_slug)
            .await?
            .ok_or_else(|| ApiError::not_found("brand"))?;
        Ok(BrandView {
            category_ids: self.storage.brand_category_ids(brand.id).await?,
            brand,
        })
    }

    pub async fn list_brands(&self, active_only: bool) -> ApiResult<Vec<BrandView>> {
        let brands = self.storage.list_brands(active_only).await?;
        let mut views = Vec::with_capacity(brands.len());
        for brand in brands {
            views.push(BrandView {
                category_ids: self.storage.brand_category_ids(brand.id).await?,
                brand,
            });
        }
        Ok(views)
    }

    pub async fn delete_brand(&self, id: i64) -> ApiResult<()> {
        self.get_brand(id).await?;
        self.storage.soft_delete_brand(id).await?;
        Ok(())
    }

    // --- product categories ---

    pub async fn create_product_category(
        &self,
        name: &str,
        description: Option<String>,
        sort_order: i32,
    ) -> ApiResult<product_categories::Model> {
        let existing = self.storage.product_category_slugs().await?;
        let category_slug = slug::generate_unique(name, &existing);
        let category = self
            .storage
            .insert_product_category(NewProductCategory {
                name: name.to_string(),
                slug: category_slug,
                description,
                is_active: true,
                sort_order,
            })
            .await?;
        Ok(category)
    }

    pub async fn update_product_category(
        &self,
        id: i64,
        name: Option<String>,
        description: Option<Option<String>>,
        is_active: Option<bool>,
        sort_order: Option<i32>,
    ) -> ApiResult<product_categories::Model> {
        self.get_product_category(id).await?;
        self.storage
            .update_product_category(id, name, description, is_active, sort_order)
            .await?;
        self.get_product_category(id).await
    }

    pub async fn get_product_category(&self, id: i64) -> ApiResult<product_categories::Model> {
        self.storage
            .find_product_category(id)
            .await?
            .ok_or_else(|| ApiError::not_found("product category"))
    }

    pub async fn list_product_categories(&self) -> ApiResult<Vec<product_categories::Model>> {
        Ok(self.storage.list_product_categories().await?)
    }

    pub async fn delete_product_category(&self, id: i64) -> ApiResult<()> {
        self.get_product_category(id).await?;
        self.storage.soft_delete_product_category(id).await?;
        Ok(())
    }

    // --- products ---

    pub async fn create_product(&self, input: NewProductInput) -> ApiResult<products::Model> {
        self.get_product_category(input.product_category_id).await?;
        if let Some(brand_id) = input.brand_id {
            self.get_brand(brand_id).await?;
        }
        let existing = self.storage.product_slugs().await?;
        let product_slug = slug::generate_unique(&input.name, &existing);
        let product = self
            .storage
            .insert_product(NewProduct {
                product_category_id: input.product_category_id,
                brand_id: input.brand_id,
                name: input.name,
                slug: product_slug,
                sku: input.sku,
                purchase_price: input.purchase_price,
                sale_price: input.sale_price,
                offer_price: input.offer_price,
                stock: input.stock,
                stock_reservation_limit: input.stock_reservation_limit,
                is_active: true,
            })
            .await?;
        Ok(product)
    }

    pub async fn update_product(&self, id: i64, patch: ProductPatch) -> ApiResult<products::Model> {
        self.get_product(id).await?;
        if let Some(product_category_id) = patch.product_category_id {
            self.get_product_category(product_category_id).await?;
        }
        if let Some(Some(brand_id)) = patch.brand_id {
            self.get_brand(brand_id).await?;
        }
        self.storage.update_product(id, patch).await?;
        self.get_product(id).await
    }

    pub async fn get_product(&self, id: i64) -> ApiResult<products::Model> {
        self.storage
            .find_product(id)
            .await?
            .ok_or_else(|| ApiError::not_found("product"))
    }

    pub async fn get_product_by_slug(&self, product_slug: &str) -> ApiResult<products::Model> {
        self.storage
            .find_product_by_slug(product_slug)
            .await?
            .ok_or_else(|| ApiError::not_found("product"))
    }

    pub async fn list_products(
        &self,
        product_category_id: Option<i64>,
        brand_id: Option<i64>,
        active_only: bool,
    ) -> ApiResult<Vec<products::Model>> {
        Ok(self
            .storage
            .list_products(product_category_id, brand_id, active_only)
            .await?)
    }

    pub async fn delete_product(&self, id: i64) -> ApiResult<()> {
        self.get_product(id).await?;
        self.storage.soft_delete_product(id).await?;
        Ok(())
    }

    // --- product media ---

    pub async fn add_product_media(
        &self,
        product_id: i64,
        path: String,
        alt: Option<String>,
        sort_order: i32,
    ) -> ApiResult<Vec<product_media::Model>> {
        self.get_product(product_id).await?;
        self.storage
            .insert_product_media(NewProductMedia {
                product_id,
                path,
                alt,
                sort_order,
            })
            .await?;
        Ok(self.storage.product_media(product_id).await?)
    }

    pub async fn list_product_media(
        &self,
        product_id: i64,
    ) -> ApiResult<Vec<product_media::Model>> {
        self.get_product(product_id).await?;
        Ok(self.storage.product_media(product_id).await?)
    }

    pub async fn remove_product_media(&self, product_id: i64, media_id: i64) -> ApiResult<()> {
        let media = self.storage.product_media(product_id).await?;
        if !media.iter().any(|item| item.id == media_id) {
            return Err(ApiError::not_found("product media"));
        }
        self.storage.delete_product_media(media_id).await?;
        Ok(())
    }
}
