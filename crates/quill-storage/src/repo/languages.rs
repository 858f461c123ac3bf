use sea_orm::sea_query::Expr;
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use time::OffsetDateTime;

use crate::entities;
use crate::storage::{CmsStorage, StorageResult};

#[derive(Debug, Clone)]
pub struct NewLanguage {
    pub code: String,
    pub name: String,
    pub is_default: bool,
    pub is_active: bool,
}

impl CmsStorage {
    /// Inserting a new default demotes the previous one in the same
    /// transaction, keeping the single-default invariant.
    pub async fn insert_language(
        &self,
        input: NewLanguage,
    ) -> StorageResult<entities::languages::Model> {
        use entities::languages::Column;
        let txn = self.db().begin().await?;
        if input.is_default {
            entities::Languages::update_many()
                .col_expr(Column::IsDefault, Expr::value(false))
                .filter(Column::IsDefault.eq(true))
                .exec(&txn)
                .await?;
        }
        let active = entities::languages::ActiveModel {
            id: ActiveValue::NotSet,
            code: ActiveValue::Set(input.code),
            name: ActiveValue::Set(input.name),
            is_default: ActiveValue::Set(input.is_default),
            is_active: ActiveValue::Set(input.is_active),
            created_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            deleted_at: ActiveValue::Set(None),
        };
        let result = entities::Languages::insert(active).exec(&txn).await?;
        let language = entities::Languages::find_by_id(result.last_insert_id)
            .one(&txn)
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("language after insert".into()))?;
        txn.commit().await?;
        Ok(language)
    }

    pub async fn update_language(
        &self,
        id: i64,
        name: Option<String>,
        is_default: Option<bool>,
        is_active: Option<bool>,
    ) -> StorageResult<()> {
        use entities::languages::Column;
        let txn = self.db().begin().await?;
        if is_default == Some(true) {
            entities::Languages::update_many()
                .col_expr(Column::IsDefault, Expr::value(false))
                .filter(Column::IsDefault.eq(true))
                .filter(Column::Id.ne(id))
                .exec(&txn)
                .await?;
        }
        let mut active = entities::languages::ActiveModel {
            id: ActiveValue::Set(id),
            ..Default::default()
        };
        if let Some(name) = name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(is_default) = is_default {
            active.is_default = ActiveValue::Set(is_default);
        }
        if let Some(is_active) = is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        entities::Languages::update(active).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn list_languages(&self) -> StorageResult<Vec<entities::languages::Model>> {
        use entities::languages::Column;
        let languages = entities::Languages::find()
            .filter(Column::DeletedAt.is_null())
            .order_by_desc(Column::IsDefault)
            .order_by_asc(Column::Code)
            .all(self.db())
            .await?;
        Ok(languages)
    }

    pub async fn list_active_languages(&self) -> StorageResult<Vec<entities::languages::Model>> {
        use entities::languages::Column;
        let languages = entities::Languages::find()
            .filter(Column::IsActive.eq(true))
            .filter(Column::DeletedAt.is_null())
            .order_by_desc(Column::IsDefault)
            .order_by_asc(Column::Code)
            .all(self.db())
            .await?;
        Ok(languages)
    }

    pub async fn find_language(
        &self,
        id: i64,
    ) -> StorageResult<Option<entities::languages::Model>> {
        use entities::languages::Column;
        let language = entities::Languages::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(language)
    }

    pub async fn find_language_by_code(
        &self,
        code: &str,
    ) -> StorageResult<Option<entities::languages::Model>> {
        use entities::languages::Column;
        let language = entities::Languages::find()
            .filter(Column::Code.eq(code))
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(language)
    }

    pub async fn find_default_language(
        &self,
    ) -> StorageResult<Option<entities::languages::Model>> {
        use entities::languages::Column;
        let language = entities::Languages::find()
            .filter(Column::IsDefault.eq(true))
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(language)
    }

    pub async fn find_languages_by_ids(
        &self,
        ids: &[i64],
    ) -> StorageResult<Vec<entities::languages::Model>> {
        use entities::languages::Column;
        let languages = entities::Languages::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .filter(Column::DeletedAt.is_null())
            .all(self.db())
            .await?;
        Ok(languages)
    }

    pub async fn soft_delete_language(&self, id: i64) -> StorageResult<()> {
        let active = entities::languages::ActiveModel {
            id: ActiveValue::Set(id),
            is_active: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        };
        entities::Languages::update(active).exec(self.db()).await?;
        Ok(())
    }
}
