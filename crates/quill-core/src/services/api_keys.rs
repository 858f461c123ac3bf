use time::OffsetDateTime;

use quill_common::{ApiError, ApiResult};
use quill_storage::entities::{api_keys, users};
use quill_storage::{CmsStorage, NewApiKey};

use crate::auth::{self, AuthTokens, TokenKind};

/// Who a guarded request is acting as. `api_key` is set only on the
/// key path; the session path carries just the user.
#[derive(Debug, Clone)]
pub struct AuthedRequest {
    pub user: users::Model,
    pub api_key: Option<api_keys::Model>,
}

/// The plaintext token exists only in this response; afterwards only its
/// sha-256 hash survives.
#[derive(Debug, Clone)]
pub struct CreatedApiKey {
    pub key: api_keys::Model,
    pub token: String,
}

#[derive(Clone)]
pub struct ApiKeyService {
    storage: CmsStorage,
    tokens: AuthTokens,
}

impl ApiKeyService {
    pub fn new(storage: CmsStorage, tokens: AuthTokens) -> Self {
        Self { storage, tokens }
    }

    pub async fn create(
        &self,
        user_id: i64,
        name: &str,
        scopes: Option<Vec<String>>,
        expires_at: Option<OffsetDateTime>,
    ) -> ApiResult<CreatedApiKey> {
        let user = self
            .storage
            .find_user(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("user"))?;
        if self.storage.api_key_name_taken(user.id, name).await? {
            return Err(ApiError::conflict("api key name already in use"));
        }

        let key_id = auth::new_key_id();
        let (token, effective_expiry) =
            self.tokens
                .issue_api_key(user.id, &key_id, scopes.clone(), expires_at)?;
        let key = self
            .storage
            .insert_api_key(NewApiKey {
                user_id: user.id,
                token_hash: auth::hash_token(&token),
                name: name.to_string(),
                scopes: scopes.map(|scopes| serde_json::json!(scopes)),
                expires_at: Some(effective_expiry),
            })
            .await?;
        tracing::info!(key_id = key.id, user_id = user.id, "api key created");
        Ok(CreatedApiKey { key, token })
    }

    pub async fn list(&self, user_id: Option<i64>) -> ApiResult<Vec<api_keys::Model>> {
        match user_id {
            Some(user_id) => Ok(self.storage.list_api_keys_for_user(user_id).await?),
            None => {
                let mut all = Vec::new();
                for user in self.storage.list_users().await? {
                    all.extend(self.storage.list_api_keys_for_user(user.id).await?);
                }
                Ok(all)
            }
        }
    }

    pub async fn get(&self, id: i64) -> ApiResult<api_keys::Model> {
        self.storage
            .find_api_key(id)
            .await?
            .ok_or_else(|| ApiError::not_found("api key"))
    }

    pub async fn deactivate(&self, id: i64) -> ApiResult<()> {
        self.get(id).await?;
        self.storage.set_api_key_active(id, false).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.get(id).await?;
        self.storage.soft_delete_api_key(id).await?;
        Ok(())
    }

    pub async fn cleanup_expired(&self) -> ApiResult<u64> {
        let removed = self.storage.cleanup_expired_api_keys().await?;
        if removed > 0 {
            tracing::info!(removed, "expired api keys cleaned up");
        }
        Ok(removed)
    }

    /// Dual-path guard: session JWT first, API key on any session failure.
    pub async fn authenticate(&self, bearer: &str, ip: Option<String>) -> ApiResult<AuthedRequest> {
        if let Ok(claims) = self.tokens.verify(bearer)
            && claims.kind == TokenKind::UserSession
            && let Some(user) = self.storage.find_user(claims.sub).await?
            && user.is_active
        {
            return Ok(AuthedRequest {
                user,
                api_key: None,
            });
        }

        let hash = auth::hash_token(bearer);
        let key = self
            .storage
            .find_active_api_key_by_hash(&hash)
            .await?
            .ok_or_else(|| ApiError::unauthorized("invalid token"))?;
        if let Some(expires_at) = key.expires_at
            && expires_at < OffsetDateTime::now_utc()
        {
            return Err(ApiError::unauthorized("api key expired"));
        }
        let user = self
            .storage
            .find_user(key.user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| ApiError::unauthorized("invalid token"))?;

        // Usage stamp is fire-and-forget; a failed write never fails auth.
        let storage = self.storage.clone();
        let key_id = key.id;
        tokio::spawn(async move {
            if let Err(err) = storage.touch_api_key(key_id, ip).await {
                tracing::debug!(key_id, error = %err, "failed to stamp api key usage");
            }
        });

        Ok(AuthedRequest {
            user,
            api_key: Some(key),
        })
    }
}
