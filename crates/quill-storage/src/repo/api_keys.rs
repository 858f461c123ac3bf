use sea_orm::entity::prelude::Json;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use time::OffsetDateTime;

use crate::entities;
use crate::storage::{CmsStorage, StorageResult};

#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub user_id: i64,
    pub token_hash: String,
    pub name: String,
    pub scopes: Option<Json>,
    pub expires_at: Option<OffsetDateTime>,
}

impl CmsStorage {
    pub async fn insert_api_key(
        &self,
        input: NewApiKey,
    ) -> StorageResult<entities::api_keys::Model> {
        let now = OffsetDateTime::now_utc();
        let active = entities::api_keys::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(input.user_id),
            token_hash: ActiveValue::Set(input.token_hash),
            name: ActiveValue::Set(input.name),
            scopes: ActiveValue::Set(input.scopes),
            expires_at: ActiveValue::Set(input.expires_at),
            is_active: ActiveValue::Set(true),
            last_used_at: ActiveValue::Set(None),
            last_used_ip: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        };
        let result = entities::ApiKeys::insert(active).exec(self.db()).await?;
        let key = entities::ApiKeys::find_by_id(result.last_insert_id)
            .one(self.db())
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("api key after insert".into()))?;
        Ok(key)
    }

    pub async fn find_api_key(&self, id: i64) -> StorageResult<Option<entities::api_keys::Model>> {
        use entities::api_keys::Column;
        let key = entities::ApiKeys::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(key)
    }

    /// Lookup for the auth guard: active, not soft-deleted, matching hash.
    /// Expiry is checked by the caller so it can distinguish the error.
    pub async fn find_active_api_key_by_hash(
        &self,
        token_hash: &str,
    ) -> StorageResult<Option<entities::api_keys::Model>> {
        use entities::api_keys::Column;
        let key = entities::ApiKeys::find()
            .filter(Column::TokenHash.eq(token_hash))
            .filter(Column::IsActive.eq(true))
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(key)
    }

    pub async fn api_key_name_taken(&self, user_id: i64, name: &str) -> StorageResult<bool> {
        use entities::api_keys::Column;
        let existing = entities::ApiKeys::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Name.eq(name))
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(existing.is_some())
    }

    pub async fn list_api_keys_for_user(
        &self,
        user_id: i64,
    ) -> StorageResult<Vec<entities::api_keys::Model>> {
        use entities::api_keys::Column;
        let keys = entities::ApiKeys::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::DeletedAt.is_null())
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(self.db())
            .await?;
        Ok(keys)
    }

    pub async fn set_api_key_active(&self, id: i64, is_active: bool) -> StorageResult<()> {
        let active = entities::api_keys::ActiveModel {
            id: ActiveValue::Set(id),
            is_active: ActiveValue::Set(is_active),
            ..Default::default()
        };
        entities::ApiKeys::update(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn soft_delete_api_key(&self, id: i64) -> StorageResult<()> {
        let active = entities::api_keys::ActiveModel {
            id: ActiveValue::Set(id),
            is_active: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        };
        entities::ApiKeys::update(active).exec(self.db()).await?;
        Ok(())
    }

    /// Best-effort usage stamp written after a successful key auth.
    pub async fn touch_api_key(&self, id: i64, ip: Option<String>) -> StorageResult<()> {
        let active = entities::api_keys::ActiveModel {
            id: ActiveValue::Set(id),
            last_used_at: ActiveValue::Set(Some(OffsetDateTime::now_utc())),
            last_used_ip: ActiveValue::Set(ip),
            ..Default::default()
        };
        entities::ApiKeys::update(active).exec(self.db()).await?;
        Ok(())
    }

    /// Soft-deletes every key whose expiry has passed. Returns the count.
    pub async fn cleanup_expired_api_keys(&self) -> StorageResult<u64> {
        use entities::api_keys::Column;
        let now = OffsetDateTime::now_utc();
        let result = entities::ApiKeys::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .col_expr(Column::DeletedAt, Expr::value(Some(now)))
            .filter(Column::ExpiresAt.is_not_null())
            .filter(Column::ExpiresAt.lt(now))
            .filter(Column::DeletedAt.is_null())
            .exec(self.db())
            .await?;
        Ok(result.rows_affected)
    }
}
