//! Remote console connection profile.
//!
//! A profile is everything an executor needs to reach the game server's administrative
//! console. Profiles are resolved either from process environment variables at startup or
//! from the persisted `rcon_config` setting, whichever is complete first.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::model::rcon::{RconStatusDto, UpdateRconSettingsDto};

/// Timeout applied when neither source specifies one, in milliseconds.
pub const DEFAULT_RCON_TIMEOUT_MS: u64 = 5000;

/// Settings key holding the JSON-encoded persisted profile.
pub const RCON_CONFIG_KEY: &str = "rcon_config";

/// Where a resolved profile came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileOrigin {
    Environment,
    Settings,
}

impl ProfileOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Settings => "settings",
        }
    }
}

/// Connection profile for the remote console executor.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RconProfile {
    pub host: String,
    pub port: u16,
    pub password: String,
    /// Per-step network timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_RCON_TIMEOUT_MS
}

impl RconProfile {
    /// `host:port` address for the TCP connection.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    /// A profile is usable only with a host and a password.
    pub fn is_complete(&self) -> bool {
        !self.host.trim().is_empty() && !self.password.is_empty() && self.port != 0
    }

    /// Parses the persisted `rcon_config` setting value.
    ///
    /// # Returns
    /// - `Ok(Some(profile))` - Value parsed into a complete profile
    /// - `Ok(None)` - Value parsed but the profile is missing a host, port or password
    /// - `Err(serde_json::Error)` - Value is not a valid profile JSON object
    pub fn from_settings_json(value: &str) -> Result<Option<Self>, serde_json::Error> {
        let profile: Self = serde_json::from_str(value)?;

        Ok(profile.is_complete().then_some(profile))
    }
}

impl RconProfile {
    /// Builds a profile from settings submitted through the admin API.
    pub fn from_dto(dto: UpdateRconSettingsDto) -> Self {
        Self {
            host: dto.host.trim().to_string(),
            port: dto.port,
            password: dto.password,
            timeout: dto.timeout.unwrap_or(DEFAULT_RCON_TIMEOUT_MS),
        }
    }
}

/// Remote console configuration as reported to administrators.
#[derive(Debug, Clone, PartialEq)]
pub struct RconStatus {
    pub origin: Option<ProfileOrigin>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout: Option<u64>,
}

impl RconStatus {
    pub fn unconfigured() -> Self {
        Self {
            origin: None,
            host: None,
            port: None,
            timeout: None,
        }
    }

    pub fn from_profile(profile: &RconProfile, origin: ProfileOrigin) -> Self {
        Self {
            origin: Some(origin),
            host: Some(profile.host.clone()),
            port: Some(profile.port),
            timeout: Some(profile.timeout),
        }
    }

    pub fn into_dto(self) -> RconStatusDto {
        RconStatusDto {
            configured: self.origin.is_some(),
            source: self.origin.map(|origin| origin.as_str().to_string()),
            host: self.host,
            port: self.port,
            timeout: self.timeout,
        }
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for RconProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RconProfile")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
