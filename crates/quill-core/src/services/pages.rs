use serde_json::Value;
use time::OffsetDateTime;

use quill_common::seo::{self, JsonLdInput, JsonLdKind};
use quill_common::{ApiError, ApiResult, slug};
use quill_storage::entities::pages;
use quill_storage::{CmsStorage, NewPage, PagePatch};

use super::content::STATUSES;

/// Pages flagged for a menu slot, assembled parent -> children and ordered by
/// menu_order at each level.
#[derive(Debug, Clone)]
pub struct MenuNode {
    pub page: pages::Model,
    pub children: Vec<MenuNode>,
}

#[derive(Debug, Clone)]
pub struct NewPageInput {
    pub title: String,
    pub content: String,
    pub status: String,
    pub parent_id: Option<i64>,
    pub menu_order: i32,
    pub show_in_home_menu: bool,
    pub show_in_footer_menu: bool,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PageUpdateInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    /// `Some(None)` moves the page to the root.
    pub parent_id: Option<Option<i64>>,
    pub menu_order: Option<i32>,
    pub show_in_home_menu: Option<bool>,
    pub show_in_footer_menu: Option<bool>,
    pub seo_title: Option<Option<String>>,
    pub seo_description: Option<Option<String>>,
    pub seo_keywords: Option<Option<String>>,
    pub is_active: Option<bool>,
}

#[derive(Clone)]
pub struct PageService {
    storage: CmsStorage,
}

impl PageService {
    pub fn new(storage: CmsStorage) -> Self {
        Self { storage }
    }

    fn check_status(status: &str) -> ApiResult<()> {
        if STATUSES.contains(&status) {
            Ok(())
        } else {
            Err(ApiError::bad_request(format!("unknown status: {status}")))
        }
    }

    fn page_json_ld(title: &str, description: Option<&str>, content: &str) -> Value {
        let description = match description {
            Some(description) => description.to_string(),
            None => seo::generate_description(content, seo::DEFAULT_DESCRIPTION_LEN),
        };
        seo::generate_json_ld(&JsonLdInput {
            title: title.to_string(),
            description: Some(description),
            kind: JsonLdKind::WebPage,
            ..Default::default()
        })
    }

    async fn check_parent(&self, parent_id: i64) -> ApiResult<()> {
        self.storage
            .find_page(parent_id)
            .await?
            .ok_or_else(|| ApiError::not_found("parent page"))?;
        Ok(())
    }

    /// Walks the proposed parent's ancestor chain over an id -> parent index;
    /// bounded by the number of live pages, so a pre-existing anomaly cannot
    /// loop forever.
    async fn check_cycle(&self, page_id: i64, new_parent_id: i64) -> ApiResult<()> {
        if page_id == new_parent_id {
            return Err(ApiError::bad_request("page cannot be its own parent"));
        }
        let index = self.storage.page_parent_index().await?;
        let mut cursor = Some(new_parent_id);
        for _ in 0..index.len() {
            let Some(current) = cursor else {
                return Ok(());
            };
            if current == page_id {
                return Err(ApiError::bad_request(
                    "page cannot be moved under its own descendant",
                ));
            }
            cursor = index.get(&current).copied().flatten();
        }
        Ok(())
    }

    pub async fn create(&self, author_id: i64, input: NewPageInput) -> ApiResult<pages::Model> {
        Self::check_status(&input.status)?;
        if let Some(parent_id) = input.parent_id {
            self.check_parent(parent_id).await?;
        }

        // pages.slug is unique across soft-deleted rows too, so the check
        // spans them.
        let page_slug = slug::generate(&input.title);
        if self.storage.page_slugs().await?.contains(&page_slug) {
            return Err(ApiError::conflict("page slug already exists"));
        }

        let published_at = (input.status == "published").then(OffsetDateTime::now_utc);
        let json_ld = Self::page_json_ld(
            &input.title,
            input.seo_description.as_deref(),
            &input.content,
        );
        let page = self
            .storage
            .insert_page(NewPage {
                slug: page_slug,
                title: input.title,
                content: input.content,
                status: input.status,
                parent_id: input.parent_id,
                author_id,
                menu_order: input.menu_order,
                show_in_home_menu: input.show_in_home_menu,
                show_in_footer_menu: input.show_in_footer_menu,
                seo_title: input.seo_title,
                seo_description: input.seo_description,
                seo_keywords: input.seo_keywords,
                seo_json_ld: Some(json_ld),
                published_at,
            })
            .await?;
        Ok(page)
    }

    pub async fn update(&self, id: i64, input: PageUpdateInput) -> ApiResult<pages::Model> {
        let page = self.get(id).await?;

        if let Some(status) = input.status.as_deref() {
            Self::check_status(status)?;
        }
        if let Some(Some(parent_id)) = input.parent_id {
            self.check_parent(parent_id).await?;
            self.check_cycle(id, parent_id).await?;
        }

        // Retitling regenerates the slug; collisions with any other page,
        // soft-deleted ones included, 409.
        let mut new_slug = None;
        if let Some(title) = input.title.as_deref() {
            let candidate = slug::generate(title);
            if candidate != page.slug {
                if self.storage.page_slugs().await?.contains(&candidate) {
                    return Err(ApiError::conflict("page slug already exists"));
                }
                new_slug = Some(candidate);
            }
        }

        let mut published_at = None;
        if input.status.as_deref() == Some("published") && page.status != "published" {
            published_at = Some(Some(OffsetDateTime::now_utc()));
        }

        let json_ld = match (&input.title, &input.content, &input.seo_description) {
            (None, None, None) => None,
            _ => {
                let title = input.title.clone().unwrap_or_else(|| page.title.clone());
                let content = input.content.clone().unwrap_or_else(|| page.content.clone());
                let description = match &input.seo_description {
                    Some(description) => description.clone(),
                    None => page.seo_description.clone(),
                };
                Some(Some(Self::page_json_ld(
                    &title,
                    description.as_deref(),
                    &content,
                )))
            }
        };

        self.storage
            .update_page(
                id,
                PagePatch {
                    slug: new_slug,
                    title: input.title,
                    content: input.content,
                    status: input.status,
                    parent_id: input.parent_id,
                    menu_order: input.menu_order,
                    show_in_home_menu: input.show_in_home_menu,
                    show_in_footer_menu: input.show_in_footer_menu,
                    seo_title: input.seo_title,
                    seo_description: input.seo_description,
                    seo_keywords: input.seo_keywords,
                    seo_json_ld: json_ld,
                    published_at,
                    is_active: input.is_active,
                },
            )
            .await?;
        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<pages::Model> {
        self.storage
            .find_page(id)
            .await?
            .ok_or_else(|| ApiError::not_found("page"))
    }

    pub async fn get_by_slug(&self, slug: &str) -> ApiResult<pages::Model> {
        self.storage
            .find_page_by_slug(slug)
            .await?
            .ok_or_else(|| ApiError::not_found("page"))
    }

    pub async fn record_view(&self, id: i64) -> ApiResult<()> {
        self.storage.increment_page_views(id).await?;
        Ok(())
    }

    pub async fn list(&self, status: Option<&str>) -> ApiResult<Vec<pages::Model>> {
        Ok(self.storage.list_pages(status).await?)
    }

    pub async fn children(&self, parent_id: i64) -> ApiResult<Vec<pages::Model>> {
        self.get(parent_id).await?;
        Ok(self.storage.page_children(parent_id).await?)
    }

    pub async fn roots(&self) -> ApiResult<Vec<pages::Model>> {
        let pages = self.storage.list_pages(None).await?;
        Ok(pages
            .into_iter()
            .filter(|page| page.parent_id.is_none())
            .collect())
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.get(id).await?;
        if self.storage.page_child_count(id).await? > 0 {
            return Err(ApiError::bad_request(
                "page has children and cannot be deleted",
            ));
        }
        self.storage.soft_delete_page(id).await?;
        Ok(())
    }

    pub async fn menu_structure(&self, footer: bool) -> ApiResult<Vec<MenuNode>> {
        let pages = self.storage.menu_pages(footer).await?;
        Ok(build_menu(pages))
    }
}

fn build_menu(pages: Vec<pages::Model>) -> Vec<MenuNode> {
    // Children whose parent is not in the slot surface at the top level.
    let ids: std::collections::HashSet<i64> = pages.iter().map(|page| page.id).collect();
    let mut by_parent: std::collections::HashMap<Option<i64>, Vec<pages::Model>> =
        std::collections::HashMap::new();
    for page in pages {
        let key = match page.parent_id {
            Some(parent_id) if ids.contains(&parent_id) => Some(parent_id),
            _ => None,
        };
        by_parent.entry(key).or_default().push(page);
    }
    let roots = by_parent.remove(&None).unwrap_or_default();
    roots
        .into_iter()
        .map(|page| attach_children(page, &mut by_parent))
        .collect()
}

fn attach_children(
    page: pages::Model,
    by_parent: &mut std::collections::HashMap<Option<i64>, Vec<pages::Model>>,
) -> MenuNode {
    let children = by_parent.remove(&Some(page.id)).unwrap_or_default();
    MenuNode {
        children: children
            .into_iter()
            .map(|child| attach_children(child, by_parent))
            .collect(),
        page,
    }
}
