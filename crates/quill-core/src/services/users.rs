use quill_common::{ApiError, ApiResult};
use quill_storage::entities::{roles, users};
use quill_storage::{CmsStorage, RoleSeed};

use crate::auth;

/// Built-in roles seeded at bootstrap. Permissions are coarse JSON arrays the
/// API layer can grow into; the role names are the stable contract.
pub fn default_roles() -> Vec<RoleSeed> {
    vec![
        RoleSeed {
            name: "admin",
            description: "Full access to every resource",
            permissions: serde_json::json!(["*"]),
        },
        RoleSeed {
            name: "author",
            description: "Creates and edits own content",
            permissions: serde_json::json!(["content:create", "content:edit-own"]),
        },
        RoleSeed {
            name: "editor",
            description: "Edits and publishes any content",
            permissions: serde_json::json!(["content:edit", "content:publish"]),
        },
        RoleSeed {
            name: "translator",
            description: "Manages translations",
            permissions: serde_json::json!(["content:translate"]),
        },
    ]
}

#[derive(Debug, Clone)]
pub struct UserView {
    pub user: users::Model,
    pub roles: Vec<roles::Model>,
}

#[derive(Clone)]
pub struct UserService {
    storage: CmsStorage,
}

impl UserService {
    pub fn new(storage: CmsStorage) -> Self {
        Self { storage }
    }

    pub async fn seed_roles(&self) -> ApiResult<()> {
        self.storage.ensure_roles(&default_roles()).await?;
        Ok(())
    }

    pub async fn list(&self) -> ApiResult<Vec<UserView>> {
        let users = self.storage.list_users().await?;
        let mut views = Vec::with_capacity(users.len());
        for user in users {
            views.push(UserView {
                roles: self.storage.user_roles(user.id).await?,
                user,
            });
        }
        Ok(views)
    }

    pub async fn get(&self, id: i64) -> ApiResult<UserView> {
        let user = self
            .storage
            .find_user(id)
            .await?
            .ok_or_else(|| ApiError::not_found("user"))?;
        Ok(UserView {
            roles: self.storage.user_roles(user.id).await?,
            user,
        })
    }

    pub async fn update_profile(
        &self,
        id: i64,
        first_name: Option<String>,
        last_name: Option<String>,
        is_active: Option<bool>,
    ) -> ApiResult<UserView> {
        self.get(id).await?;
        self.storage
            .update_user_profile(id, first_name, last_name, is_active)
            .await?;
        self.get(id).await
    }

    pub async fn change_password(&self, id: i64, password: &str) -> ApiResult<()> {
        self.get(id).await?;
        let password_hash = auth::hash_password(password)?;
        self.storage.update_user_password(id, password_hash).await?;
        Ok(())
    }

    pub async fn assign_roles(&self, id: i64, role_ids: Vec<i64>) -> ApiResult<UserView> {
        self.get(id).await?;
        let found = self.storage.find_roles_by_ids(&role_ids).await?;
        let distinct: std::collections::HashSet<&i64> = role_ids.iter().collect();
        if found.len() != distinct.len() {
            return Err(ApiError::not_found("one or more roles"));
        }
        self.storage.set_user_roles(id, &role_ids).await?;
        self.get(id).await
    }

    pub async fn list_roles(&self) -> ApiResult<Vec<roles::Model>> {
        Ok(self.storage.list_roles().await?)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.get(id).await?;
        self.storage.soft_delete_user(id).await?;
        Ok(())
    }
}
