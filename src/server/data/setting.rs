use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};

/// Repository for key/value administrative settings.
pub struct SettingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SettingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the raw stored value for a key
    ///
    /// # Returns
    /// - `Ok(Some(String))`: The stored value
    /// - `Ok(None)`: Key not set
    /// - `Err(DbErr)`: Database error
    pub async fn get(&self, key: &str) -> Result<Option<String>, DbErr> {
        Ok(entity::prelude::Setting::find_by_id(key.to_string())
            .one(self.db)
            .await?
            .map(|setting| setting.value))
    }

    /// Inserts or replaces the value for a key
    ///
    /// # Returns
    /// - `Ok(())`: Value stored
    /// - `Err(DbErr)`: Database error
    pub async fn upsert(&self, key: &str, value: String) -> Result<(), DbErr> {
        entity::prelude::Setting::insert(entity::setting::ActiveModel {
            key: ActiveValue::Set(key.to_string()),
            value: ActiveValue::Set(value),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::setting::Column::Key)
                .update_columns([
                    entity::setting::Column::Value,
                    entity::setting::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(self.db)
        .await?;

        Ok(())
    }
}
