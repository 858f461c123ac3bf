use std::collections::{HashMap, HashSet};

use time::OffsetDateTime;

use quill_common::seo::{self, JsonLdInput, JsonLdKind};
use quill_common::{ApiError, ApiResult, slug};
use quill_storage::entities::{
    article_translations, articles, categories, category_translations, tag_translations, tags,
};
use quill_storage::{
    ArticlePatch, CmsStorage, NewArticle, NewArticleTranslation, NewCategory,
    NewCategoryTranslation, NewTag, NewTagTranslation,
};

pub const STATUSES: [&str; 3] = ["draft", "published", "archived"];

/// One localized payload in a fan-out request. Articles use
/// `title`/`content`/`excerpt`; categories use `title` as the display name
/// plus `description`; tags use only `title`.
#[derive(Debug, Clone)]
pub struct TranslationInput {
    pub language_id: i64,
    pub title: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub description: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ArticleView {
    pub article: articles::Model,
    pub translations: Vec<article_translations::Model>,
    pub category_ids: Vec<i64>,
    pub tag_ids: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct CategoryView {
    pub category: categories::Model,
    pub translations: Vec<category_translations::Model>,
}

#[derive(Debug, Clone)]
pub struct TagView {
    pub tag: tags::Model,
    pub translations: Vec<tag_translations::Model>,
}

#[derive(Clone)]
pub struct ContentService {
    storage: CmsStorage,
}

impl ContentService {
    pub fn new(storage: CmsStorage) -> Self {
        Self { storage }
    }

    /// Drops inputs whose language id resolves to nothing; the survivors come
    /// back paired with their language. Errors only when nothing survives.
    async fn resolve_languages(
        &self,
        translations: &[TranslationInput],
    ) -> ApiResult<Vec<TranslationInput>> {
        if translations.is_empty() {
            return Err(ApiError::bad_request("at least one translation required"));
        }
        let ids: Vec<i64> = translations
            .iter()
            .map(|translation| translation.language_id)
            .collect();
        let known: HashSet<i64> = self
            .storage
            .find_languages_by_ids(&ids)
            .await?
            .into_iter()
            .map(|language| language.id)
            .collect();

        let mut resolved = Vec::new();
        for translation in translations {
            if known.contains(&translation.language_id) {
                resolved.push(translation.clone());
            } else {
                tracing::debug!(
                    language_id = translation.language_id,
                    "skipping translation for unknown language"
                );
            }
        }
        if resolved.is_empty() {
            return Err(ApiError::bad_request(
                "no translation references a known language",
            ));
        }
        Ok(resolved)
    }

    async fn language_id_for_code(&self, code: Option<&str>) -> ApiResult<Option<Option<i64>>> {
        match code {
            None => Ok(None),
            Some(code) => {
                let language = self.storage.find_language_by_code(code).await?;
                Ok(Some(language.map(|language| language.id)))
            }
        }
    }

    fn check_status(status: &str) -> ApiResult<()> {
        if STATUSES.contains(&status) {
            Ok(())
        } else {
            Err(ApiError::bad_request(format!("unknown status: {status}")))
        }
    }

    async fn check_category_ids(&self, ids: &[i64]) -> ApiResult<()> {
        let found = self.storage.find_categories_by_ids(ids).await?;
        if found.len() != ids.iter().collect::<HashSet<_>>().len() {
            return Err(ApiError::not_found("one or more categories"));
        }
        Ok(())
    }

    async fn check_tag_ids(&self, ids: &[i64]) -> ApiResult<()> {
        let found = self.storage.find_tags_by_ids(ids).await?;
        if found.len() != ids.iter().collect::<HashSet<_>>().len() {
            return Err(ApiError::not_found("one or more tags"));
        }
        Ok(())
    }

    fn article_translation_rows(
        article: &articles::Model,
        author_name: Option<&str>,
        translations: &[TranslationInput],
    ) -> Vec<NewArticleTranslation> {
        translations
            .iter()
            .map(|input| {
                let content = input.content.clone().unwrap_or_default();
                let description = input.seo_description.clone().unwrap_or_else(|| {
                    seo::generate_description(&content, seo::DEFAULT_DESCRIPTION_LEN)
                });
                let translation_slug = slug::generate(&input.title);
                let json_ld = seo::generate_json_ld(&JsonLdInput {
                    title: input.seo_title.clone().unwrap_or_else(|| input.title.clone()),
                    description: Some(description.clone()),
                    url: Some(format!("/{translation_slug}")),
                    image: article.featured_image.clone(),
                    author: author_name.map(str::to_string),
                    date_published: article.published_at,
                    date_modified: Some(article.updated_at),
                    kind: JsonLdKind::Article,
                });
                NewArticleTranslation {
                    article_id: article.id,
                    language_id: input.language_id,
                    slug: translation_slug,
                    title: input.title.clone(),
                    excerpt: input.excerpt.clone(),
                    content,
                    seo_title: input.seo_title.clone(),
                    seo_description: Some(description),
                    seo_json_ld: Some(json_ld),
                }
            })
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_article(
        &self,
        blog_id: i64,
        author_id: i64,
        status: &str,
        featured_image: Option<String>,
        translations: Vec<TranslationInput>,
        category_ids: Vec<i64>,
        tag_ids: Vec<i64>,
    ) -> ApiResult<ArticleView> {
        Self::check_status(status)?;
        self.storage
            .find_blog(blog_id)
            .await?
            .ok_or_else(|| ApiError::not_found("blog"))?;
        let author = self
            .storage
            .find_user(author_id)
            .await?
            .ok_or_else(|| ApiError::not_found("author"))?;
        self.check_category_ids(&category_ids).await?;
        self.check_tag_ids(&tag_ids).await?;
        let resolved = self.resolve_languages(&translations).await?;

        // Root slug always comes from the first submitted translation, even
        // when language resolution drops it.
        let existing = self.storage.article_slugs().await?;
        let root_slug = slug::generate_unique(&translations[0].title, &existing);
        let published_at = (status == "published").then(OffsetDateTime::now_utc);

        let article = self
            .storage
            .insert_article(NewArticle {
                blog_id,
                author_id,
                editor_id: None,
                slug: root_slug,
                status: status.to_string(),
                featured_image,
                published_at,
            })
            .await?;

        let author_name = format!("{} {}", author.first_name, author.last_name);
        let rows = Self::article_translation_rows(&article, Some(&author_name), &resolved);
        self.storage
            .replace_article_translations(article.id, rows)
            .await?;
        self.storage
            .set_article_categories(article.id, &category_ids)
            .await?;
        self.storage.set_article_tags(article.id, &tag_ids).await?;

        self.article_view(article.id, None).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_article(
        &self,
        id: i64,
        editor_id: Option<i64>,
        status: Option<String>,
        featured_image: Option<Option<String>>,
        translations: Option<Vec<TranslationInput>>,
        category_ids: Option<Vec<i64>>,
        tag_ids: Option<Vec<i64>>,
    ) -> ApiResult<ArticleView> {
        let article = self
            .storage
            .find_article(id)
            .await?
            .ok_or_else(|| ApiError::not_found("article"))?;

        // published_at stamps only on the draft/archived -> published edge.
        let mut published_at = None;
        if let Some(status) = status.as_deref() {
            Self::check_status(status)?;
            if status == "published" && article.status != "published" {
                published_at = Some(Some(OffsetDateTime::now_utc()));
            }
        }

        if let Some(category_ids) = &category_ids {
            self.check_category_ids(category_ids).await?;
        }
        if let Some(tag_ids) = &tag_ids {
            self.check_tag_ids(tag_ids).await?;
        }

        self.storage
            .update_article(
                id,
                ArticlePatch {
                    editor_id: editor_id.map(Some),
                    status,
                    featured_image,
                    published_at,
                },
            )
            .await?;
        let article = self
            .storage
            .find_article(id)
            .await?
            .ok_or_else(|| ApiError::not_found("article"))?;

        if let Some(translations) = translations {
            let translations = self.resolve_languages(&translations).await?;
            let author_name = match self.storage.find_user(article.author_id).await? {
                Some(author) => Some(format!("{} {}", author.first_name, author.last_name)),
                None => None,
            };
            let rows = Self::article_translation_rows(&article, author_name.as_deref(), &translations);
            self.storage
                .replace_article_translations(article.id, rows)
                .await?;
        }
        if let Some(category_ids) = category_ids {
            self.storage
                .set_article_categories(article.id, &category_ids)
                .await?;
        }
        if let Some(tag_ids) = tag_ids {
            self.storage.set_article_tags(article.id, &tag_ids).await?;
        }

        self.article_view(article.id, None).await
    }

    async fn article_view(&self, id: i64, language: Option<&str>) -> ApiResult<ArticleView> {
        let article = self
            .storage
            .find_article(id)
            .await?
            .ok_or_else(|| ApiError::not_found("article"))?;
        let mut translations = self.storage.article_translations(id).await?;
        if let Some(filter) = self.language_id_for_code(language).await? {
            translations.retain(|translation| Some(translation.language_id) == filter);
        }
        Ok(ArticleView {
            category_ids: self.storage.article_category_ids(id).await?,
            tag_ids: self.storage.article_tag_ids(id).await?,
            article,
            translations,
        })
    }

    pub async fn get_article(&self, id: i64, language: Option<&str>) -> ApiResult<ArticleView> {
        self.article_view(id, language).await
    }

    pub async fn get_article_by_slug(
        &self,
        slug: &str,
        language: Option<&str>,
    ) -> ApiResult<ArticleView> {
        let article = self
            .storage
            .find_article_by_slug(slug)
            .await?
            .ok_or_else(|| ApiError::not_found("article"))?;
        self.article_view(article.id, language).await
    }

    /// With a language filter, roots with no matching translation drop out.
    pub async fn list_articles(
        &self,
        blog_id: Option<i64>,
        status: Option<&str>,
        language: Option<&str>,
    ) -> ApiResult<Vec<ArticleView>> {
        let articles = self.storage.list_articles(blog_id, status).await?;
        let ids: Vec<i64> = articles.iter().map(|article| article.id).collect();
        let mut by_article: HashMap<i64, Vec<article_translations::Model>> = HashMap::new();
        for translation in self.storage.translations_for_articles(&ids).await? {
            by_article
                .entry(translation.article_id)
                .or_default()
                .push(translation);
        }
        let filter = self.language_id_for_code(language).await?;

        let mut views = Vec::new();
        for article in articles {
            let mut translations = by_article.remove(&article.id).unwrap_or_default();
            if let Some(filter) = filter {
                translations.retain(|translation| Some(translation.language_id) == filter);
                if translations.is_empty() {
                    continue;
                }
            }
            views.push(ArticleView {
                category_ids: self.storage.article_category_ids(article.id).await?,
                tag_ids: self.storage.article_tag_ids(article.id).await?,
                article,
                translations,
            });
        }
        Ok(views)
    }

    pub async fn delete_article(&self, id: i64) -> ApiResult<()> {
        self.storage
            .find_article(id)
            .await?
            .ok_or_else(|| ApiError::not_found("article"))?;
        self.storage.soft_delete_article(id).await?;
        Ok(())
    }

    // --- categories ---

    pub async fn create_category(
        &self,
        sort_order: i32,
        translations: Vec<TranslationInput>,
    ) -> ApiResult<CategoryView> {
        let resolved = self.resolve_languages(&translations).await?;
        let existing = self.storage.category_slugs().await?;
        let root_slug = slug::generate_unique(&translations[0].title, &existing);
        let category = self
            .storage
            .insert_category(NewCategory {
                slug: root_slug,
                is_active: true,
                sort_order,
            })
            .await?;
        self.storage
            .replace_category_translations(category.id, Self::category_rows(category.id, &resolved))
            .await?;
        self.category_view(category.id, None).await
    }

    fn category_rows(
        category_id: i64,
        translations: &[TranslationInput],
    ) -> Vec<NewCategoryTranslation> {
        translations
            .iter()
            .map(|input| NewCategoryTranslation {
                category_id,
                language_id: input.language_id,
                slug: slug::generate(&input.title),
                name: input.title.clone(),
                description: input.description.clone(),
            })
            .collect()
    }

    pub async fn update_category(
        &self,
        id: i64,
        is_active: Option<bool>,
        sort_order: Option<i32>,
        translations: Option<Vec<TranslationInput>>,
    ) -> ApiResult<CategoryView> {
        self.storage
            .find_category(id)
            .await?
            .ok_or_else(|| ApiError::not_found("category"))?;
        self.storage.update_category(id, is_active, sort_order).await?;
        if let Some(translations) = translations {
            let translations = self.resolve_languages(&translations).await?;
            self.storage
                .replace_category_translations(id, Self::category_rows(id, &translations))
                .await?;
        }
        self.category_view(id, None).await
    }

    async fn category_view(&self, id: i64, language: Option<&str>) -> ApiResult<CategoryView> {
        let category = self
            .storage
            .find_category(id)
            .await?
            .ok_or_else(|| ApiError::not_found("category"))?;
        let mut translations = self.storage.category_translations(id).await?;
        if let Some(filter) = self.language_id_for_code(language).await? {
            translations.retain(|translation| Some(translation.language_id) == filter);
        }
        Ok(CategoryView {
            category,
            translations,
        })
    }

    pub async fn get_category(&self, id: i64, language: Option<&str>) -> ApiResult<CategoryView> {
        self.category_view(id, language).await
    }

    pub async fn get_category_by_slug(
        &self,
        slug: &str,
        language: Option<&str>,
    ) -> ApiResult<CategoryView> {
        let category = self
            .storage
            .find_category_by_slug(slug)
            .await?
            .ok_or_else(|| ApiError::not_found("category"))?;
        self.category_view(category.id, language).await
    }

    pub async fn list_categories(&self, language: Option<&str>) -> ApiResult<Vec<CategoryView>> {
        let categories = self.storage.list_categories().await?;
        let ids: Vec<i64> = categories.iter().map(|category| category.id).collect();
        let mut by_category: HashMap<i64, Vec<category_translations::Model>> = HashMap::new();
        for translation in self.storage.translations_for_categories(&ids).await? {
            by_category
                .entry(translation.category_id)
                .or_default()
                .push(translation);
        }
        let filter = self.language_id_for_code(language).await?;

        let mut views = Vec::new();
        for category in categories {
            let mut translations = by_category.remove(&category.id).unwrap_or_default();
            if let Some(filter) = filter {
                translations.retain(|translation| Some(translation.language_id) == filter);
                if translations.is_empty() {
                    continue;
                }
            }
            views.push(CategoryView {
                category,
                translations,
            });
        }
        Ok(views)
    }

    pub async fn delete_category(&self, id: i64) -> ApiResult<()> {
        self.storage
            .find_category(id)
            .await?
            .ok_or_else(|| ApiError::not_found("category"))?;
        self.storage.soft_delete_category(id).await?;
        Ok(())
    }

    // --- tags ---

    pub async fn create_tag(&self, translations: Vec<TranslationInput>) -> ApiResult<TagView> {
        let resolved = self.resolve_languages(&translations).await?;
        let existing = self.storage.tag_slugs().await?;
        let root_slug = slug::generate_unique(&translations[0].title, &existing);
        let tag = self
            .storage
            .insert_tag(NewTag {
                slug: root_slug,
                is_active: true,
            })
            .await?;
        self.storage
            .replace_tag_translations(tag.id, Self::tag_rows(tag.id, &resolved))
            .await?;
        self.tag_view(tag.id, None).await
    }

    fn tag_rows(tag_id: i64, translations: &[TranslationInput]) -> Vec<NewTagTranslation> {
        translations
            .iter()
            .map(|input| NewTagTranslation {
                tag_id,
                language_id: input.language_id,
                slug: slug::generate(&input.title),
                name: input.title.clone(),
            })
            .collect()
    }

    pub async fn update_tag(
        &self,
        id: i64,
        is_active: Option<bool>,
        translations: Option<Vec<TranslationInput>>,
    ) -> ApiResult<TagView> {
        self.storage
            .find_tag(id)
            .await?
            .ok_or_else(|| ApiError::not_found("tag"))?;
        self.storage.update_tag(id, is_active).await?;
        if let Some(translations) = translations {
            let translations = self.resolve_languages(&translations).await?;
            self.storage
                .replace_tag_translations(id, Self::tag_rows(id, &translations))
                .await?;
        }
        self.tag_view(id, None).await
    }

    async fn tag_view(&self, id: i64, language: Option<&str>) -> ApiResult<TagView> {
        let tag = self
            .storage
            .find_tag(id)
            .await?
            .ok_or_else(|| ApiError::not_found("tag"))?;
        let mut translations = self.storage.tag_translations(id).await?;
        if let Some(filter) = self.language_id_for_code(language).await? {
            translations.retain(|translation| Some(translation.language_id) == filter);
        }
        Ok(TagView { tag, translations })
    }

    pub async fn get_tag(&self, id: i64, language: Option<&str>) -> ApiResult<TagView> {
        self.tag_view(id, language).await
    }

    pub async fn get_tag_by_slug(&self, slug: &str, language: Option<&str>) -> ApiResult<TagView> {
        let tag = self
            .storage
            .find_tag_by_slug(slug)
            .await?
            .ok_or_else(|| ApiError::not_found("tag"))?;
        self.tag_view(tag.id, language).await
    }

    pub async fn list_tags(&self, language: Option<&str>) -> ApiResult<Vec<TagView>> {
        let tags = self.storage.list_tags().await?;
        let ids: Vec<i64> = tags.iter().map(|tag| tag.id).collect();
        let mut by_tag: HashMap<i64, Vec<tag_translations::Model>> = HashMap::new();
        for translation in self.storage.translations_for_tags(&ids).await? {
            by_tag
                .entry(translation.tag_id)
                .or_default()
                .push(translation);
        }
        let filter = self.language_id_for_code(language).await?;

        let mut views = Vec::new();
        for tag in tags {
            let mut translations = by_tag.remove(&tag.id).unwrap_or_default();
            if let Some(filter) = filter {
                translations.retain(|translation| Some(translation.language_id) == filter);
                if translations.is_empty() {
                    continue;
                }
            }
            views.push(TagView { tag, translations });
        }
        Ok(views)
    }

    pub async fn delete_tag(&self, id: i64) -> ApiResult<()> {
        self.storage
            .find_tag(id)
            .await?
            .ok_or_else(|| ApiError::not_found("tag"))?;
        self.storage.soft_delete_tag(id).await?;
        Ok(())
    }
}
