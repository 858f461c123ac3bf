use quill_common::{ApiError, ApiResult, slug};
use quill_storage::entities::blogs;
use quill_storage::{BlogPatch, CmsStorage, NewBlog};

#[derive(Clone)]
pub struct BlogService {
    storage: CmsStorage,
}

impl BlogService {
    pub fn new(storage: CmsStorage) -> Self {
        Self { storage }
    }

    pub async fn create(
        &self,
        owner_id: i64,
        name: &str,
        description: Option<String>,
        seo_title: Option<String>,
        seo_description: Option<String>,
        seo_keywords: Option<String>,
    ) -> ApiResult<blogs::Model> {
        self.storage
            .find_user(owner_id)
            .await?
            .ok_or_else(|| ApiError::not_found("owner"))?;
        let existing = self.storage.blog_slugs().await?;
        let blog_slug = slug::generate_unique(name, &existing);
        let blog = self
            .storage
            .insert_blog(NewBlog {
                name: name.to_string(),
                slug: blog_slug,
                description,
                owner_id,
                seo_title,
                seo_description,
                seo_keywords,
                seo_json_ld: None,
            })
            .await?;
        Ok(blog)
    }

    pub async fn update(&self, id: i64, patch: BlogPatch) -> ApiResult<blogs::Model> {
        self.get(id).await?;
        self.storage.update_blog(id, patch).await?;
        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<blogs::Model> {
        self.storage
            .find_blog(id)
            .await?
            .ok_or_else(|| ApiError::not_found("blog"))
    }

    pub async fn get_by_slug(&self, blog_slug: &str) -> ApiResult<blogs::Model> {
        self.storage
            .find_blog_by_slug(blog_slug)
            .await?
            .ok_or_else(|| ApiError::not_found("blog"))
    }

    pub async fn list(&self, owner_id: Option<i64>) -> ApiResult<Vec<blogs::Model>> {
        Ok(self.storage.list_blogs(owner_id).await?)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.get(id).await?;
        self.storage.soft_delete_blog(id).await?;
        Ok(())
    }
}
