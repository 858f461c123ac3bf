use sea_orm::entity::prelude::Json;
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use time::OffsetDateTime;

use crate::entities;
use crate::storage::{CmsStorage, StorageResult};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct RoleSeed {
    pub name: &'static str,
    pub description: &'static str,
    pub permissions: Json,
}

impl CmsStorage {
    pub async fn find_user_by_email(
        &self,
        email: &str,
    ) -> StorageResult<Option<entities::users::Model>> {
        use entities::users::Column;
        let user = entities::Users::find()
            .filter(Column::Email.eq(email))
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(user)
    }

    pub async fn find_user(&self, id: i64) -> StorageResult<Option<entities::users::Model>> {
        use entities::users::Column;
        let user = entities::Users::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(user)
    }

    pub async fn list_users(&self) -> StorageResult<Vec<entities::users::Model>> {
        use entities::users::Column;
        let users = entities::Users::find()
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::Email)
            .all(self.db())
            .await?;
        Ok(users)
    }

    pub async fn insert_user(&self, input: NewUser) -> StorageResult<entities::users::Model> {
        let now = OffsetDateTime::now_utc();
        let active = entities::users::ActiveModel {
            id: ActiveValue::NotSet,
            email: ActiveValue::Set(input.email),
            first_name: ActiveValue::Set(input.first_name),
            last_name: ActiveValue::Set(input.last_name),
            password_hash: ActiveValue::Set(input.password_hash),
            is_active: ActiveValue::Set(input.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        };
        let result = entities::Users::insert(active).exec(self.db()).await?;
        let user = entities::Users::find_by_id(result.last_insert_id)
            .one(self.db())
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("user after insert".into()))?;
        Ok(user)
    }

    pub async fn update_user_profile(
        &self,
        id: i64,
        first_name: Option<String>,
        last_name: Option<String>,
        is_active: Option<bool>,
    ) -> StorageResult<()> {
        let mut active = entities::users::ActiveModel {
            id: ActiveValue::Set(id),
            updated_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        if let Some(first_name) = first_name {
            active.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = last_name {
            active.last_name = ActiveValue::Set(last_name);
        }
        if let Some(is_active) = is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        entities::Users::update(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn update_user_password(&self, id: i64, password_hash: String) -> StorageResult<()> {
        let active = entities::users::ActiveModel {
            id: ActiveValue::Set(id),
            password_hash: ActiveValue::Set(password_hash),
            updated_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        entities::Users::update(active).exec(self.db()).await?;
        Ok(())
    }

    pub async fn soft_delete_user(&self, id: i64) -> StorageResult<()> {
        let active = entities::users::ActiveModel {
            id: ActiveValue::Set(id),
            deleted_at: ActiveValue::Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        };
        entities::Users::update(active).exec(self.db()).await?;
        Ok(())
    }

    /// Seeds the built-in roles at bootstrap; existing rows are left alone.
    pub async fn ensure_roles(&self, defaults: &[RoleSeed]) -> StorageResult<()> {
        let existing = self.list_roles().await?;
        let mut existing_names = std::collections::HashSet::new();
        for role in existing {
            existing_names.insert(role.name);
        }

        let now = OffsetDateTime::now_utc();
        for default in defaults {
            if existing_names.contains(default.name) {
                continue;
            }
            let active = entities::roles::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(default.name.to_string()),
                description: ActiveValue::Set(Some(default.description.to_string())),
                permissions: ActiveValue::Set(default.permissions.clone()),
                created_at: ActiveValue::Set(now),
            };
            entities::Roles::insert(active).exec(self.db()).await?;
        }
        Ok(())
    }

    pub async fn list_roles(&self) -> StorageResult<Vec<entities::roles::Model>> {
        use entities::roles::Column;
        let roles = entities::Roles::find()
            .order_by_asc(Column::Name)
            .all(self.db())
            .await?;
        Ok(roles)
    }

    pub async fn find_role_by_name(
        &self,
        name: &str,
    ) -> StorageResult<Option<entities::roles::Model>> {
        use entities::roles::Column;
        let role = entities::Roles::find()
            .filter(Column::Name.eq(name))
            .one(self.db())
            .await?;
        Ok(role)
    }

    pub async fn find_roles_by_ids(
        &self,
        ids: &[i64],
    ) -> StorageResult<Vec<entities::roles::Model>> {
        use entities::roles::Column;
        let roles = entities::Roles::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .all(self.db())
            .await?;
        Ok(roles)
    }

    /// Replaces the user's role set in one transaction.
    pub async fn set_user_roles(&self, user_id: i64, role_ids: &[i64]) -> StorageResult<()> {
        use entities::user_roles::Column;
        let txn = self.db().begin().await?;
        entities::UserRoles::delete_many()
            .filter(Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;
        for role_id in role_ids {
            let active = entities::user_roles::ActiveModel {
                id: ActiveValue::NotSet,
                user_id: ActiveValue::Set(user_id),
                role_id: ActiveValue::Set(*role_id),
            };
            entities::UserRoles::insert(active).exec(&txn).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    pub async fn user_roles(&self, user_id: i64) -> StorageResult<Vec<entities::roles::Model>> {
        use entities::user_roles::Column;
        let links = entities::UserRoles::find()
            .filter(Column::UserId.eq(user_id))
            .all(self.db())
            .await?;
        let ids: Vec<i64> = links.iter().map(|link| link.role_id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_roles_by_ids(&ids).await
    }
}
