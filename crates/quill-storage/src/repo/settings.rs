use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::Json;
use sea_orm::{EntityTrait, sea_query::OnConflict};
use time::OffsetDateTime;

use crate::entities;
use crate::storage::{CmsStorage, StorageResult};

const SETTINGS_ROW_ID: i64 = 1;

impl CmsStorage {
    pub async fn load_settings(&self) -> StorageResult<Option<Json>> {
        let row = entities::Settings::find_by_id(SETTINGS_ROW_ID)
            .one(self.db())
            .await?;
        Ok(row.map(|row| row.config))
    }

    pub async fn save_settings(&self, config: Json) -> StorageResult<()> {
        let row = entities::settings::ActiveModel {
            id: Set(SETTINGS_ROW_ID),
            config: Set(config),
            updated_at: Set(OffsetDateTime::now_utc()),
        };
        entities::Settings::insert(row)
            .on_conflict(
                OnConflict::column(entities::settings::Column::Id)
                    .update_columns([
                        entities::settings::Column::Config,
                        entities::settings::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(self.db())
            .await?;
        Ok(())
    }
}
