//! Remote console settings managed from the admin panel.
//!
//! Persisted settings only take effect when the environment does not already provide a
//! complete profile; the status reported here is whatever the dispatcher would use on its
//! next cycle.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::setting::SettingRepository,
    error::AppError,
    model::rcon::{RconProfile, RconStatus, RCON_CONFIG_KEY},
    service::profile::ProfileSource,
};

pub struct RconSettingsService<'a> {
    db: &'a DatabaseConnection,
    profiles: &'a dyn ProfileSource,
}

impl<'a> RconSettingsService<'a> {
    pub fn new(db: &'a DatabaseConnection, profiles: &'a dyn ProfileSource) -> Self {
        Self { db, profiles }
    }

    /// Reports the profile the dispatcher currently resolves, without the password.
    pub async fn status(&self) -> RconStatus {
        match self.profiles.resolve().await {
            Some((profile, origin)) => RconStatus::from_profile(&profile, origin),
            None => RconStatus::unconfigured(),
        }
    }

    /// Stores the `rcon_config` setting.
    ///
    /// # Returns
    /// - `Ok(RconStatus)` - Settings stored; the status as now resolved
    /// - `Err(AppError::BadRequest)` - Missing host, port or password, or a zero timeout
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn update(&self, profile: RconProfile) -> Result<RconStatus, AppError> {
        if !profile.is_complete() {
            return Err(AppError::BadRequest(
                "Host, port and password are required".to_string(),
            ));
        }
        if profile.timeout == 0 {
            return Err(AppError::BadRequest(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        let value = serde_json::to_string(&profile)?;
        SettingRepository::new(self.db)
            .upsert(RCON_CONFIG_KEY, value)
            .await?;

        tracing::info!("Remote console settings updated ({})", profile.address());

        Ok(self.status().await)
    }
}
