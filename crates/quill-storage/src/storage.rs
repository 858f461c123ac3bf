use sea_orm::{DatabaseConnection, Schema};

use crate::db;
use crate::entities;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("db error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("serde json error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<StorageError> for quill_common::ApiError {
    fn from(err: StorageError) -> Self {
        quill_common::ApiError::internal(err.to_string())
    }
}

/// Storage is used for:
/// - bootstrap (schema sync + role seeding)
/// - service-layer reads and writes
///
/// Every default read filters soft-deleted rows (`deleted_at IS NULL`);
/// admin paths that need deleted rows use the explicit variants.
#[derive(Clone)]
pub struct CmsStorage {
    db: DatabaseConnection,
}

impl CmsStorage {
    pub async fn connect(dsn: &str) -> StorageResult<Self> {
        let db = db::connect(dsn).await?;
        Ok(Self { db })
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub(crate) fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Entity-first schema sync (SeaORM 2.0). Runs at bootstrap.
    pub async fn sync(&self) -> StorageResult<()> {
        Schema::new(self.db.get_database_backend())
            .builder()
            .register(entities::Users)
            .register(entities::Roles)
            .register(entities::UserRoles)
            .register(entities::ApiKeys)
            .register(entities::Languages)
            .register(entities::Blogs)
            .register(entities::Articles)
            .register(entities::ArticleTranslations)
            .register(entities::Categories)
            .register(entities::CategoryTranslations)
            .register(entities::Tags)
            .register(entities::TagTranslations)
            .register(entities::ArticleCategories)
            .register(entities::ArticleTags)
            .register(entities::Pages)
            .register(entities::Brands)
            .register(entities::BrandCategories)
            .register(entities::ProductCategories)
            .register(entities::Products)
            .register(entities::ProductMedia)
            .register(entities::Files)
            .register(entities::Carousels)
            .register(entities::Settings)
            .sync(&self.db)
            .await?;
        Ok(())
    }

    pub async fn health(&self) -> StorageResult<()> {
        self.db.ping().await?;
        Ok(())
    }
}
