//! Executor profile resolution.
//!
//! The dispatcher asks its [`ProfileSource`] for a profile at the start of every cycle
//! and never reads configuration itself. The production source prefers the profile read
//! from the environment at startup and otherwise falls back to the persisted
//! `rcon_config` setting, so enabling the console from the admin panel takes effect on the
//! next cycle without a restart.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::setting::SettingRepository,
    model::rcon::{ProfileOrigin, RconProfile, RCON_CONFIG_KEY},
};

#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Resolves the profile to use right now.
    ///
    /// # Returns
    /// - `Some((profile, origin))` - A complete profile and where it came from
    /// - `None` - The executor is not configured
    async fn resolve(&self) -> Option<(RconProfile, ProfileOrigin)>;
}

/// Environment profile first, persisted settings second.
pub struct ConfiguredProfileSource {
    db: DatabaseConnection,
    env_profile: Option<RconProfile>,
}

impl ConfiguredProfileSource {
    pub fn new(db: DatabaseConnection, env_profile: Option<RconProfile>) -> Self {
        Self { db, env_profile }
    }
}

#[async_trait]
impl ProfileSource for ConfiguredProfileSource {
    async fn resolve(&self) -> Option<(RconProfile, ProfileOrigin)> {
        if let Some(profile) = &self.env_profile {
            return Some((profile.clone(), ProfileOrigin::Environment));
        }

        let value = match SettingRepository::new(&self.db).get(RCON_CONFIG_KEY).await {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!("Failed to load {} setting: {}", RCON_CONFIG_KEY, e);
                return None;
            }
        };

        match RconProfile::from_settings_json(&value) {
            Ok(Some(profile)) => Some((profile, ProfileOrigin::Settings)),
            Ok(None) => {
                tracing::warn!("{} setting is incomplete, ignoring", RCON_CONFIG_KEY);
                None
            }
            Err(e) => {
                tracing::warn!("{} setting is not valid JSON: {}", RCON_CONFIG_KEY, e);
                None
            }
        }
    }
}

/// Fixed profile, used when the profile is known up front.
pub struct StaticProfileSource(pub Option<RconProfile>);

#[async_trait]
impl ProfileSource for StaticProfileSource {
    async fn resolve(&self) -> Option<(RconProfile, ProfileOrigin)> {
        self.0
            .clone()
            .map(|profile| (profile, ProfileOrigin::Environment))
    }
}
