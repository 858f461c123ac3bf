use time::{Duration, OffsetDateTime};

use quill_common::ApiError;
use quill_core::auth::AuthTokens;
use quill_core::services::{
    ApiKeyService, AuthService, BlogService, CatalogService, ContentService, LanguageService,
    NewBrandInput, NewPageInput, NewProductInput, PageService, PageUpdateInput, TranslationInput,
    UserService,
};
use quill_storage::{CmsStorage, ProductPatch};

async fn storage() -> CmsStorage {
    let storage = CmsStorage::connect("sqlite::memory:").await.unwrap();
    storage.sync().await.unwrap();
    storage
}

fn tokens() -> AuthTokens {
    AuthTokens::new("test-secret")
}

async fn seed_user(storage: &CmsStorage) -> i64 {
    let auth = AuthService::new(storage.clone(), tokens());
    auth.register("ada@example.com", "Ada", "Lovelace", "correct horse")
        .await
        .unwrap()
        .id
}

fn translation(language_id: i64, title: &str) -> TranslationInput {
    TranslationInput {
        language_id,
        title: title.to_string(),
        content: Some(format!("{title} body text")),
        excerpt: None,
        description: None,
        seo_title: None,
        seo_description: None,
    }
}

#[tokio::test]
async fn login_round_trip_and_generic_failures() {
    let storage = storage().await;
    let auth = AuthService::new(storage.clone(), tokens());
    auth.register("ada@example.com", "Ada", "Lovelace", "correct horse")
        .await
        .unwrap();

    let outcome = auth.login("ada@example.com", "correct horse").await.unwrap();
    assert!(!outcome.token.is_empty());

    // Unknown email and wrong password produce the same message.
    let unknown = auth.login("none@example.com", "x").await.unwrap_err();
    let wrong = auth.login("ada@example.com", "nope").await.unwrap_err();
    match (unknown, wrong) {
        (ApiError::Unauthorized(a), ApiError::Unauthorized(b)) => assert_eq!(a, b),
        other => panic!("expected unauthorized pair, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let storage = storage().await;
    let auth = AuthService::new(storage.clone(), tokens());
    auth.register("ada@example.com", "Ada", "Lovelace", "pw")
        .await
        .unwrap();
    let err = auth
        .register("ada@example.com", "Other", "Person", "pw")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn session_token_authenticates_without_key() {
    let storage = storage().await;
    let auth = AuthService::new(storage.clone(), tokens());
    let keys = ApiKeyService::new(storage.clone(), tokens());
    auth.register("ada@example.com", "Ada", "Lovelace", "pw")
        .await
        .unwrap();
    let outcome = auth.login("ada@example.com", "pw").await.unwrap();

    let authed = keys.authenticate(&outcome.token, None).await.unwrap();
    assert_eq!(authed.user.email, "ada@example.com");
    assert!(authed.api_key.is_none());
}

#[tokio::test]
async fn api_key_round_trip() {
    let storage = storage().await;
    let keys = ApiKeyService::new(storage.clone(), tokens());
    let user_id = seed_user(&storage).await;

    let created = keys
        .create(user_id, "integration", Some(vec!["read".to_string()]), None)
        .await
        .unwrap();
    // Default expiry is a year out.
    let expires_at = created.key.expires_at.unwrap();
    assert!(expires_at > OffsetDateTime::now_utc() + Duration::days(300));

    let authed = keys.authenticate(&created.token, None).await.unwrap();
    assert_eq!(authed.user.id, user_id);
    assert_eq!(authed.api_key.unwrap().id, created.key.id);

    // Duplicate name for the same user conflicts.
    let err = keys.create(user_id, "integration", None, None).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn expired_and_deactivated_keys_are_rejected() {
    let storage = storage().await;
    let keys = ApiKeyService::new(storage.clone(), tokens());
    let user_id = seed_user(&storage).await;

    let expired = keys
        .create(
            user_id,
            "expired",
            None,
            Some(OffsetDateTime::now_utc() - Duration::hours(1)),
        )
        .await
        .unwrap();
    let err = keys.authenticate(&expired.token, None).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));

    let disabled = keys.create(user_id, "disabled", None, None).await.unwrap();
    keys.deactivate(disabled.key.id).await.unwrap();
    let err = keys.authenticate(&disabled.token, None).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
}

#[tokio::test]
async fn default_language_cannot_be_deleted() {
    let storage = storage().await;
    let languages = LanguageService::new(storage.clone());
    let en = languages.create("en", "English", true, true).await.unwrap();
    let tr = languages.create("tr", "Turkish", false, true).await.unwrap();

    let err = languages.delete(en.id).await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
    languages.delete(tr.id).await.unwrap();
}

#[tokio::test]
async fn article_fan_out_skips_unknown_languages() {
    let storage = storage().await;
    let languages = LanguageService::new(storage.clone());
    let blogs = BlogService::new(storage.clone());
    let content = ContentService::new(storage.clone());
    let user_id = seed_user(&storage).await;

    let en = languages.create("en", "English", true, true).await.unwrap();
    let blog = blogs
        .create(user_id, "Journal", None, None, None, None)
        .await
        .unwrap();

    let view = content
        .create_article(
            blog.id,
            user_id,
            "published",
            None,
            vec![translation(en.id, "Hello World"), translation(9999, "Ghost")],
            vec![],
            vec![],
        )
        .await
        .unwrap();

    // The unknown language was dropped, not fatal.
    assert_eq!(view.translations.len(), 1);
    assert_eq!(view.article.slug, "hello-world");
    assert!(view.article.published_at.is_some());
    assert!(view.translations[0].seo_json_ld.is_some());

    // All-unknown languages is an error.
    let err = content
        .create_article(
            blog.id,
            user_id,
            "draft",
            None,
            vec![translation(9999, "Ghost")],
            vec![],
            vec![],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn article_json_ld_carries_url_image_and_type() {
    let storage = storage().await;
    let languages = LanguageService::new(storage.clone());
    let blogs = BlogService::new(storage.clone());
    let content = ContentService::new(storage.clone());
    let user_id = seed_user(&storage).await;

    let en = languages.create("en", "English", true, true).await.unwrap();
    let blog = blogs
        .create(user_id, "Journal", None, None, None, None)
        .await
        .unwrap();

    let view = content
        .create_article(
            blog.id,
            user_id,
            "published",
            Some("cover.jpg".to_string()),
            vec![translation(en.id, "Hello World")],
            vec![],
            vec![],
        )
        .await
        .unwrap();

    let doc = view.translations[0].seo_json_ld.clone().unwrap();
    assert_eq!(doc["@type"], "Article");
    assert_eq!(doc["url"], "/hello-world");
    assert_eq!(doc["image"], "cover.jpg");
    assert_eq!(doc["author"]["name"], "Ada Lovelace");
}

#[tokio::test]
async fn root_slug_comes_from_first_submitted_translation() {
    let storage = storage().await;
    let languages = LanguageService::new(storage.clone());
    let blogs = BlogService::new(storage.clone());
    let content = ContentService::new(storage.clone());
    let user_id = seed_user(&storage).await;

    let en = languages.create("en", "English", true, true).await.unwrap();
    let blog = blogs
        .create(user_id, "Journal", None, None, None, None)
        .await
        .unwrap();

    // The first translation names the article even when its language is
    // unknown and the row itself is dropped.
    let view = content
        .create_article(
            blog.id,
            user_id,
            "draft",
            None,
            vec![translation(9999, "Ghost Title"), translation(en.id, "Hello")],
            vec![],
            vec![],
        )
        .await
        .unwrap();
    assert_eq!(view.article.slug, "ghost-title");
    assert_eq!(view.translations.len(), 1);
    assert_eq!(view.translations[0].title, "Hello");
}

#[tokio::test]
async fn article_list_filters_by_language() {
    let storage = storage().await;
    let languages = LanguageService::new(storage.clone());
    let blogs = BlogService::new(storage.clone());
    let content = ContentService::new(storage.clone());
    let user_id = seed_user(&storage).await;

    let en = languages.create("en", "English", true, true).await.unwrap();
    let tr = languages.create("tr", "Turkish", false, true).await.unwrap();
    let blog = blogs
        .create(user_id, "Journal", None, None, None, None)
        .await
        .unwrap();

    content
        .create_article(
            blog.id,
            user_id,
            "published",
            None,
            vec![translation(en.id, "Only English")],
            vec![],
            vec![],
        )
        .await
        .unwrap();
    content
        .create_article(
            blog.id,
            user_id,
            "published",
            None,
            vec![translation(en.id, "Both"), translation(tr.id, "Ikisi")],
            vec![],
            vec![],
        )
        .await
        .unwrap();

    let turkish = content
        .list_articles(Some(blog.id), Some("published"), Some("tr"))
        .await
        .unwrap();
    assert_eq!(turkish.len(), 1);
    assert_eq!(turkish[0].translations[0].title, "Ikisi");

    // Unknown code filters everything out rather than erroring.
    let none = content
        .list_articles(Some(blog.id), Some("published"), Some("xx"))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn publish_edge_stamps_published_at_once() {
    let storage = storage().await;
    let languages = LanguageService::new(storage.clone());
    let blogs = BlogService::new(storage.clone());
    let content = ContentService::new(storage.clone());
    let user_id = seed_user(&storage).await;
    let en = languages.create("en", "English", true, true).await.unwrap();
    let blog = blogs
        .create(user_id, "Journal", None, None, None, None)
        .await
        .unwrap();

    let draft = content
        .create_article(
            blog.id,
            user_id,
            "draft",
            None,
            vec![translation(en.id, "Draft Post")],
            vec![],
            vec![],
        )
        .await
        .unwrap();
    assert!(draft.article.published_at.is_none());

    let published = content
        .update_article(
            draft.article.id,
            None,
            Some("published".to_string()),
            None,
            None,
            None,
            None,
        )
        .await
        .unwrap();
    let first_stamp = published.article.published_at.unwrap();

    // Re-publishing keeps the original stamp.
    let again = content
        .update_article(
            draft.article.id,
            None,
            Some("published".to_string()),
            None,
            None,
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(again.article.published_at.unwrap(), first_stamp);
}

#[tokio::test]
async fn page_cycle_and_delete_rules() {
    let storage = storage().await;
    let pages = PageService::new(storage.clone());
    let user_id = seed_user(&storage).await;

    fn input(title: &str, parent_id: Option<i64>) -> NewPageInput {
        NewPageInput {
            title: title.to_string(),
            content: "body".to_string(),
            status: "published".to_string(),
            parent_id,
            menu_order: 0,
            show_in_home_menu: false,
            show_in_footer_menu: false,
            seo_title: None,
            seo_description: None,
            seo_keywords: None,
        }
    }

    let root = pages.create(user_id, input("Root", None)).await.unwrap();
    let child = pages
        .create(user_id, input("Child", Some(root.id)))
        .await
        .unwrap();

    // Self-parent and descendant reparent both reject.
    let err = pages
        .update(
            root.id,
            PageUpdateInput {
                parent_id: Some(Some(root.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
    let err = pages
        .update(
            root.id,
            PageUpdateInput {
                parent_id: Some(Some(child.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    // A parent with live children cannot be deleted.
    let err = pages.delete(root.id).await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
    pages.delete(child.id).await.unwrap();
    pages.delete(root.id).await.unwrap();
}

#[tokio::test]
async fn duplicate_page_title_conflicts() {
    let storage = storage().await;
    let pages = PageService::new(storage.clone());
    let user_id = seed_user(&storage).await;

    let input = NewPageInput {
        title: "About Us".to_string(),
        content: "body".to_string(),
        status: "draft".to_string(),
        parent_id: None,
        menu_order: 0,
        show_in_home_menu: false,
        show_in_footer_menu: false,
        seo_title: None,
        seo_description: None,
        seo_keywords: None,
    };
    pages.create(user_id, input.clone()).await.unwrap();
    let err = pages.create(user_id, input).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn page_slug_stays_taken_after_soft_delete() {
    let storage = storage().await;
    let pages = PageService::new(storage.clone());
    let user_id = seed_user(&storage).await;

    fn input(title: &str) -> NewPageInput {
        NewPageInput {
            title: title.to_string(),
            content: "body".to_string(),
            status: "draft".to_string(),
            parent_id: None,
            menu_order: 0,
            show_in_home_menu: false,
            show_in_footer_menu: false,
            seo_title: None,
            seo_description: None,
            seo_keywords: None,
        }
    }

    let about = pages.create(user_id, input("About Us")).await.unwrap();
    pages.delete(about.id).await.unwrap();

    // The slug column stays unique across deleted rows, so reuse is a 409,
    // not a database error.
    let err = pages.create(user_id, input("About Us")).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    // Retitling onto the deleted slug rejects the same way.
    let contact = pages.create(user_id, input("Contact")).await.unwrap();
    let err = pages
        .update(
            contact.id,
            PageUpdateInput {
                title: Some("About Us".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn brand_with_missing_category_is_never_persisted() {
    let storage = storage().await;
    let catalog = CatalogService::new(storage.clone());

    let err = catalog
        .create_brand(NewBrandInput {
            name: "Acme".to_string(),
            description: None,
            logo: None,
            website: None,
            sort_order: 0,
            category_ids: vec![42],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert!(catalog.list_brands(false).await.unwrap().is_empty());
}

#[tokio::test]
async fn product_pricing_and_stock_views() {
    let storage = storage().await;
    let catalog = CatalogService::new(storage.clone());

    let category = catalog
        .create_product_category("Widgets", None, 0)
        .await
        .unwrap();
    let product = catalog
        .create_product(NewProductInput {
            product_category_id: category.id,
            brand_id: None,
            name: "Widget".to_string(),
            sku: "W-1".to_string(),
            purchase_price: 4.0,
            sale_price: 10.0,
            offer_price: Some(8.0),
            stock: 5,
            stock_reservation_limit: 5,
        })
        .await
        .unwrap();

    assert_eq!(quill_core::services::effective_price(&product), 8.0);
    assert!(!quill_core::services::in_stock(&product));

    // Clearing the offer falls back to the sale price.
    let product = catalog
        .update_product(
            product.id,
            ProductPatch {
                offer_price: Some(None),
                stock: Some(6),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(quill_core::services::effective_price(&product), 10.0);
    assert!(quill_core::services::in_stock(&product));
}

#[tokio::test]
async fn role_assignment_round_trip() {
    let storage = storage().await;
    let users = UserService::new(storage.clone());
    let user_id = seed_user(&storage).await;
    users.seed_roles().await.unwrap();

    let roles = users.list_roles().await.unwrap();
    assert_eq!(roles.len(), 4);
    let admin = roles.iter().find(|role| role.name == "admin").unwrap();

    let view = users.assign_roles(user_id, vec![admin.id]).await.unwrap();
    assert_eq!(view.roles.len(), 1);
    assert_eq!(view.roles[0].name, "admin");

    let err = users.assign_roles(user_id, vec![999]).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
