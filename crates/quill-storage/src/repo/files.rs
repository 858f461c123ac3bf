use sea_orm::entity::prelude::Json;
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use time::OffsetDateTime;

use crate::entities;
use crate::storage::{CmsStorage, StorageResult};

#[derive(Debug, Clone)]
pub struct NewFile {
    pub filename: String,
    pub original_name: String,
    pub path: String,
    pub url: String,
    pub size: i64,
    pub mime_type: String,
    pub file_type: String,
    pub file_format: String,
    pub blog_id: Option<i64>,
    pub user_id: Option<i64>,
    pub processed_versions: Json,
}

impl CmsStorage {
    pub async fn insert_file(&self, input: NewFile) -> StorageResult<entities::files::Model> {
        let active = entities::files::ActiveModel {
            id: ActiveValue::NotSet,
            filename: ActiveValue::Set(input.filename),
            original_name: ActiveValue::Set(input.original_name),
            path: ActiveValue::Set(input.path),
            url: ActiveValue::Set(input.url),
            size: ActiveValue::Set(input.size),
            mime_type: ActiveValue::Set(input.mime_type),
            file_type: ActiveValue::Set(input.file_type),
            file_format: ActiveValue::Set(input.file_format),
            blog_id: ActiveValue::Set(input.blog_id),
            user_id: ActiveValue::Set(input.user_id),
            processed_versions: ActiveValue::Set(input.processed_versions),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            deleted_at: ActiveValue::Set(None),
        };
        let result = entities::Files::insert(active).exec(self.db()).await?;
        let file = entities::Files::find_by_id(result.last_insert_id)
            .one(self.db())
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("file after insert".into()))?;
        Ok(file)
    }

    pub async fn find_file(&self, id: i64) -> StorageResult<Option<entities::files::Model>> {
        use entities::files::Column;
        let file = entities::Files::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(file)
    }

    pub async fn find_file_by_path(
        &self,
        path: &str,
    ) -> StorageResult<Option<entities::files::Model>> {
        use entities::files::Column;
        let file = entities::Files::find()
            .filter(Column::Path.eq(path))
            .filter(Column::DeletedAt.is_null())
            .one(self.db())
            .await?;
        Ok(file)
    }

    pub async fn list_files(
        &self,
        blog_id: Option<i64>,
        file_type: Option<&str>,
    ) -> StorageResult<Vec<entities::files::Model>> {
        use entities::files::Column;
        let mut query = entities::Files::find().filter(Column::DeletedAt.is_null());
        if let Some(blog_id) = blog_id {
            query = query.filter(Column::BlogId.eq(blog_id));
        }
        if let Some(file_type) = file_type {
            query = query.filter(Column::FileType.eq(file_type));
        }
        let files = query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(self.db())
            .await?;
        Ok(files)
    }

    pub async fn soft_delete_file(&self, id: i64) -> StorageResult<()> {
        let active = entities::files::ActiveModel {
            id: ActiveValue::Set(id),
            is_active: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        };
        entities::Files::update(active).exec(self.db()).await?;
        Ok(())
    }
}
