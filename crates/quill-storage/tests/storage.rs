use time::{Duration, OffsetDateTime};

use quill_storage::{
    BlogPatch, CmsStorage, NewApiKey, NewBlog, NewLanguage, NewPage, NewUser, RoleSeed,
};

async fn storage() -> CmsStorage {
    let storage = CmsStorage::connect("sqlite::memory:").await.unwrap();
    storage.sync().await.unwrap();
    storage
}

async fn seed_user(storage: &CmsStorage, email: &str) -> i64 {
    storage
        .insert_user(NewUser {
            email: email.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password_hash: "hash".to_string(),
            is_active: true,
        })
        .await
        .unwrap()
        .id
}

fn page(slug: &str, parent_id: Option<i64>, author_id: i64) -> NewPage {
    NewPage {
        slug: slug.to_string(),
        title: slug.to_string(),
        content: "body".to_string(),
        status: "published".to_string(),
        parent_id,
        author_id,
        menu_order: 0,
        show_in_home_menu: true,
        show_in_footer_menu: false,
        seo_title: None,
        seo_description: None,
        seo_keywords: None,
        seo_json_ld: None,
        published_at: Some(OffsetDateTime::now_utc()),
    }
}

#[tokio::test]
async fn inserting_default_language_demotes_previous_default() {
    let storage = storage().await;
    let first = storage
        .insert_language(NewLanguage {
            code: "en".to_string(),
            name: "English".to_string(),
            is_default: true,
            is_active: true,
        })
        .await
        .unwrap();
    assert!(first.is_default);

    let second = storage
        .insert_language(NewLanguage {
            code: "tr".to_string(),
            name: "Turkish".to_string(),
            is_default: true,
            is_active: true,
        })
        .await
        .unwrap();
    assert!(second.is_default);

    let first = storage.find_language(first.id).await.unwrap().unwrap();
    assert!(!first.is_default);
    let default = storage.find_default_language().await.unwrap().unwrap();
    assert_eq!(default.id, second.id);
}

#[tokio::test]
async fn update_language_unsets_other_defaults() {
    let storage = storage().await;
    let en = storage
        .insert_language(NewLanguage {
            code: "en".to_string(),
            name: "English".to_string(),
            is_default: true,
            is_active: true,
        })
        .await
        .unwrap();
    let de = storage
        .insert_language(NewLanguage {
            code: "de".to_string(),
            name: "German".to_string(),
            is_default: false,
            is_active: true,
        })
        .await
        .unwrap();

    storage
        .update_language(de.id, None, Some(true), None)
        .await
        .unwrap();

    let defaults: Vec<_> = storage
        .list_languages()
        .await
        .unwrap()
        .into_iter()
        .filter(|language| language.is_default)
        .collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].id, de.id);
    assert!(!storage.find_language(en.id).await.unwrap().unwrap().is_default);
}

#[tokio::test]
async fn expired_api_keys_are_cleaned_up() {
    let storage = storage().await;
    let user_id = seed_user(&storage, "keys@example.com").await;

    storage
        .insert_api_key(NewApiKey {
            user_id,
            token_hash: "old".to_string(),
            name: "old key".to_string(),
            scopes: None,
            expires_at: Some(OffsetDateTime::now_utc() - Duration::days(1)),
        })
        .await
        .unwrap();
    let live = storage
        .insert_api_key(NewApiKey {
            user_id,
            token_hash: "live".to_string(),
            name: "live key".to_string(),
            scopes: None,
            expires_at: Some(OffsetDateTime::now_utc() + Duration::days(30)),
        })
        .await
        .unwrap();

    let removed = storage.cleanup_expired_api_keys().await.unwrap();
    assert_eq!(removed, 1);

    assert!(storage
        .find_active_api_key_by_hash("old")
        .await
        .unwrap()
        .is_none());
    let found = storage
        .find_active_api_key_by_hash("live")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, live.id);
}

#[tokio::test]
async fn touch_api_key_records_usage() {
    let storage = storage().await;
    let user_id = seed_user(&storage, "touch@example.com").await;
    let key = storage
        .insert_api_key(NewApiKey {
            user_id,
            token_hash: "hash".to_string(),
            name: "key".to_string(),
            scopes: None,
            expires_at: None,
        })
        .await
        .unwrap();
    assert!(key.last_used_at.is_none());

    storage
        .touch_api_key(key.id, Some("10.0.0.1".to_string()))
        .await
        .unwrap();
    let key = storage.find_api_key(key.id).await.unwrap().unwrap();
    assert!(key.last_used_at.is_some());
    assert_eq!(key.last_used_ip.as_deref(), Some("10.0.0.1"));
}

#[tokio::test]
async fn blog_slug_pool_includes_soft_deleted_rows() {
    let storage = storage().await;
    let owner_id = seed_user(&storage, "owner@example.com").await;
    let blog = storage
        .insert_blog(NewBlog {
            name: "Journal".to_string(),
            slug: "journal".to_string(),
            description: None,
            owner_id,
            seo_title: None,
            seo_description: None,
            seo_keywords: None,
            seo_json_ld: None,
        })
        .await
        .unwrap();
    storage.soft_delete_blog(blog.id).await.unwrap();

    assert!(storage.find_blog(blog.id).await.unwrap().is_none());
    // The unique index spans deleted rows, so the pool must keep them.
    let slugs = storage.blog_slugs().await.unwrap();
    assert!(slugs.contains(&"journal".to_string()));
}

#[tokio::test]
async fn blog_patch_clears_nullable_columns() {
    let storage = storage().await;
    let owner_id = seed_user(&storage, "patch@example.com").await;
    let blog = storage
        .insert_blog(NewBlog {
            name: "Notes".to_string(),
            slug: "notes".to_string(),
            description: Some("about things".to_string()),
            owner_id,
            seo_title: Some("Notes".to_string()),
            seo_description: None,
            seo_keywords: None,
            seo_json_ld: None,
        })
        .await
        .unwrap();

    storage
        .update_blog(
            blog.id,
            BlogPatch {
                description: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let blog = storage.find_blog(blog.id).await.unwrap().unwrap();
    assert!(blog.description.is_none());
    // Untouched fields survive the patch.
    assert_eq!(blog.seo_title.as_deref(), Some("Notes"));
}

#[tokio::test]
async fn page_hierarchy_queries() {
    let storage = storage().await;
    let author_id = seed_user(&storage, "pages@example.com").await;

    let root = storage.insert_page(page("root", None, author_id)).await.unwrap();
    let child = storage
        .insert_page(page("child", Some(root.id), author_id))
        .await
        .unwrap();
    let _grandchild = storage
        .insert_page(page("grandchild", Some(child.id), author_id))
        .await
        .unwrap();

    assert_eq!(storage.page_child_count(root.id).await.unwrap(), 1);
    let children = storage.page_children(root.id).await.unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, child.id);

    let index = storage.page_parent_index().await.unwrap();
    assert_eq!(index.get(&child.id), Some(&Some(root.id)));
    assert_eq!(index.get(&root.id), Some(&None));
}

#[tokio::test]
async fn page_view_counter_increments() {
    let storage = storage().await;
    let author_id = seed_user(&storage, "views@example.com").await;
    let created = storage.insert_page(page("hit", None, author_id)).await.unwrap();
    assert_eq!(created.view_count, 0);

    storage.increment_page_views(created.id).await.unwrap();
    storage.increment_page_views(created.id).await.unwrap();
    let found = storage.find_page(created.id).await.unwrap().unwrap();
    assert_eq!(found.view_count, 2);
}

#[tokio::test]
async fn role_seeding_is_idempotent() {
    let storage = storage().await;
    let seeds = [
        RoleSeed {
            name: "admin",
            description: "Full access",
            permissions: serde_json::json!(["*"]),
        },
        RoleSeed {
            name: "author",
            description: "Writes content",
            permissions: serde_json::json!(["content:create"]),
        },
    ];
    storage.ensure_roles(&seeds).await.unwrap();
    storage.ensure_roles(&seeds).await.unwrap();

    let roles = storage.list_roles().await.unwrap();
    assert_eq!(roles.len(), 2);
}

#[tokio::test]
async fn settings_row_upserts() {
    let storage = storage().await;
    assert!(storage.load_settings().await.unwrap().is_none());

    storage
        .save_settings(serde_json::json!({ "port": 3000 }))
        .await
        .unwrap();
    storage
        .save_settings(serde_json::json!({ "port": 8080 }))
        .await
        .unwrap();

    let stored = storage.load_settings().await.unwrap().unwrap();
    assert_eq!(stored["port"], 8080);
}
