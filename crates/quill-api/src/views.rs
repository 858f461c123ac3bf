//! JSON response assembly. Entities never serialize directly; these builders
//! pick the outward fields, which is what keeps password hashes and purchase
//! prices off the wire.

use serde_json::{Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use quill_core::services::{
    ArticleView, AuthedRequest, BrandView, CategoryView, MenuNode, TagView, UserView,
    effective_price, in_stock,
};
use quill_storage::entities::{
    api_keys, article_translations, blogs, carousels, category_translations, files, languages,
    pages, product_categories, product_media, products, roles, tag_translations, users,
};

pub fn fmt_time(at: OffsetDateTime) -> Value {
    match at.format(&Rfc3339) {
        Ok(formatted) => json!(formatted),
        Err(_) => Value::Null,
    }
}

fn fmt_opt_time(at: Option<OffsetDateTime>) -> Value {
    at.map(fmt_time).unwrap_or(Value::Null)
}

pub fn user_json(user: &users::Model) -> Value {
    json!({
        "id": user.id,
        "email": user.email,
        "first_name": user.first_name,
        "last_name": user.last_name,
        "is_active": user.is_active,
        "created_at": fmt_time(user.created_at),
        "updated_at": fmt_time(user.updated_at),
    })
}

pub fn user_view_json(view: &UserView) -> Value {
    let mut doc = user_json(&view.user);
    doc["roles"] = Value::Array(view.roles.iter().map(role_json).collect());
    doc
}

pub fn authed_json(authed: &AuthedRequest) -> Value {
    let mut doc = user_json(&authed.user);
    if let Some(key) = &authed.api_key {
        doc["api_key"] = json!({ "id": key.id, "name": key.name });
    }
    doc
}

pub fn role_json(role: &roles::Model) -> Value {
    json!({
        "id": role.id,
        "name": role.name,
        "description": role.description,
        "permissions": role.permissions,
    })
}

pub fn api_key_json(key: &api_keys::Model) -> Value {
    json!({
        "id": key.id,
        "user_id": key.user_id,
        "name": key.name,
        "scopes": key.scopes,
        "is_active": key.is_active,
        "expires_at": fmt_opt_time(key.expires_at),
        "last_used_at": fmt_opt_time(key.last_used_at),
        "last_used_ip": key.last_used_ip,
        "created_at": fmt_time(key.created_at),
    })
}

pub fn language_json(language: &languages::Model) -> Value {
    json!({
        "id": language.id,
        "code": language.code,
        "name": language.name,
        "is_default": language.is_default,
        "is_active": language.is_active,
    })
}

pub fn blog_json(blog: &blogs::Model) -> Value {
    json!({
        "id": blog.id,
        "name": blog.name,
        "slug": blog.slug,
        "description": blog.description,
        "owner_id": blog.owner_id,
        "seo_title": blog.seo_title,
        "seo_description": blog.seo_description,
        "seo_keywords": blog.seo_keywords,
        "is_active": blog.is_active,
        "created_at": fmt_time(blog.created_at),
        "updated_at": fmt_time(blog.updated_at),
    })
}

fn article_translation_json(translation: &article_translations::Model) -> Value {
    json!({
        "id": translation.id,
        "language_id": translation.language_id,
        "slug": translation.slug,
        "title": translation.title,
        "excerpt": translation.excerpt,
        "content": translation.content,
        "seo_title": translation.seo_title,
        "seo_description": translation.seo_description,
        "seo_json_ld": translation.seo_json_ld,
    })
}

pub fn article_json(view: &ArticleView) -> Value {
    json!({
        "id": view.article.id,
        "blog_id": view.article.blog_id,
        "author_id": view.article.author_id,
        "editor_id": view.article.editor_id,
        "slug": view.article.slug,
        "status": view.article.status,
        "featured_image": view.article.featured_image,
        "published_at": fmt_opt_time(view.article.published_at),
        "created_at": fmt_time(view.article.created_at),
        "updated_at": fmt_time(view.article.updated_at),
        "category_ids": view.category_ids,
        "tag_ids": view.tag_ids,
        "translations": view.translations.iter().map(article_translation_json).collect::<Vec<_>>(),
    })
}

fn category_translation_json(translation: &category_translations::Model) -> Value {
    json!({
        "id": translation.id,
        "language_id": translation.language_id,
        "slug": translation.slug,
        "name": translation.name,
        "description": translation.description,
    })
}

pub fn category_json(view: &CategoryView) -> Value {
    json!({
        "id": view.category.id,
        "slug": view.category.slug,
        "is_active": view.category.is_active,
        "sort_order": view.category.sort_order,
        "translations": view.translations.iter().map(category_translation_json).collect::<Vec<_>>(),
    })
}

fn tag_translation_json(translation: &tag_translations::Model) -> Value {
    json!({
        "id": translation.id,
        "language_id": translation.language_id,
        "slug": translation.slug,
        "name": translation.name,
    })
}

pub fn tag_json(view: &TagView) -> Value {
    json!({
        "id": view.tag.id,
        "slug": view.tag.slug,
        "is_active": view.tag.is_active,
        "translations": view.translations.iter().map(tag_translation_json).collect::<Vec<_>>(),
    })
}

pub fn page_json(page: &pages::Model) -> Value {
    json!({
        "id": page.id,
        "slug": page.slug,
        "title": page.title,
        "content": page.content,
        "status": page.status,
        "parent_id": page.parent_id,
        "author_id": page.author_id,
        "menu_order": page.menu_order,
        "show_in_home_menu": page.show_in_home_menu,
        "show_in_footer_menu": page.show_in_footer_menu,
        "seo_title": page.seo_title,
        "seo_description": page.seo_description,
        "seo_keywords": page.seo_keywords,
        "seo_json_ld": page.seo_json_ld,
        "view_count": page.view_count,
        "is_active": page.is_active,
        "published_at": fmt_opt_time(page.published_at),
        "created_at": fmt_time(page.created_at),
        "updated_at": fmt_time(page.updated_at),
    })
}

pub fn menu_json(nodes: &[MenuNode]) -> Value {
    Value::Array(
        nodes
            .iter()
            .map(|node| {
                json!({
                    "id": node.page.id,
                    "slug": node.page.slug,
                    "title": node.page.title,
                    "menu_order": node.page.menu_order,
                    "children": menu_json(&node.children),
                })
            })
            .collect(),
    )
}

pub fn brand_json(view: &BrandView) -> Value {
    json!({
        "id": view.brand.id,
        "name": view.brand.name,
        "slug": view.brand.slug,
        "description": view.brand.description,
        "logo": view.brand.logo,
        "website": view.brand.website,
        "is_active": view.brand.is_active,
        "sort_order": view.brand.sort_order,
        "category_ids": view.category_ids,
    })
}

pub fn product_category_json(category: &product_categories::Model) -> Value {
    json!({
        "id": category.id,
        "name": category.name,
        "slug": category.slug,
        "description": category.description,
        "is_active": category.is_active,
        "sort_order": category.sort_order,
    })
}

/// Admin view: includes the cost price.
pub fn product_admin_json(product: &products::Model) -> Value {
    let mut doc = product_public_json(product);
    doc["purchase_price"] = json!(product.purchase_price);
    doc["stock"] = json!(product.stock);
    doc["stock_reservation_limit"] = json!(product.stock_reservation_limit);
    doc
}

/// Public view: derived price and availability, never the cost price.
pub fn product_public_json(product: &products::Model) -> Value {
    json!({
        "id": product.id,
        "product_category_id": product.product_category_id,
        "brand_id": product.brand_id,
        "name": product.name,
        "slug": product.slug,
        "sku": product.sku,
        "price": effective_price(product),
        "sale_price": product.sale_price,
        "offer_price": product.offer_price,
        "in_stock": in_stock(product),
        "is_active": product.is_active,
    })
}

pub fn product_media_json(media: &product_media::Model) -> Value {
    json!({
        "id": media.id,
        "product_id": media.product_id,
        "path": media.path,
        "alt": media.alt,
        "sort_order": media.sort_order,
    })
}

pub fn carousel_json(carousel: &carousels::Model) -> Value {
    json!({
        "id": carousel.id,
        "name": carousel.name,
        "slug": carousel.slug,
        "description": carousel.description,
        "items": carousel.items,
        "is_active": carousel.is_active,
        "sort_order": carousel.sort_order,
    })
}

pub fn file_json(file: &files::Model) -> Value {
    json!({
        "id": file.id,
        "filename": file.filename,
        "original_name": file.original_name,
        "path": file.path,
        "url": file.url,
        "size": file.size,
        "mime_type": file.mime_type,
        "file_type": file.file_type,
        "file_format": file.file_format,
        "blog_id": file.blog_id,
        "processed_versions": file.processed_versions,
        "created_at": fmt_time(file.created_at),
    })
}
