use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr};

pub async fn connect(dsn: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(dsn).await?;
    // Ensure sqlite enforces foreign keys (required for cascade + integrity).
    if db.get_database_backend() == DatabaseBackend::Sqlite {
        db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
    }
    Ok(db)
}
