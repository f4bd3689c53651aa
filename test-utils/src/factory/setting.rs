//! Setting factory for creating key/value administrative settings.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a setting row with the given key and raw value.
///
/// # Arguments
/// - `db` - Database connection
/// - `key` - Setting key (e.g. `"rcon_config"`)
/// - `value` - Raw stored value, typically JSON
///
/// # Returns
/// - `Ok(entity::setting::Model)` - Created setting
/// - `Err(DbErr)` - Database error during insert
pub async fn create_setting(
    db: &DatabaseConnection,
    key: impl Into<String>,
    value: impl Into<String>,
) -> Result<entity::setting::Model, DbErr> {
    entity::setting::ActiveModel {
        key: ActiveValue::Set(key.into()),
        value: ActiveValue::Set(value.into()),
        updated_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

/// Inserts an `rcon_config` setting pointing at the given host and port.
///
/// # Returns
/// - `Ok(entity::setting::Model)` - Created setting
/// - `Err(DbErr)` - Database error during insert
pub async fn create_rcon_setting(
    db: &DatabaseConnection,
    host: &str,
    port: u16,
    password: &str,
) -> Result<entity::setting::Model, DbErr> {
    let value = serde_json::json!({
        "host": host,
        "port": port,
        "password": password,
    });

    create_setting(db, "rcon_config", value.to_string()).await
}
