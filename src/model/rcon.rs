use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Remote console settings submitted from the admin panel.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct UpdateRconSettingsDto {
    pub host: String,
    pub port: u16,
    pub password: String,
    /// Milliseconds, defaults to 5000.
    pub timeout: Option<u64>,
}

/// Current remote console configuration. The password is never returned.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct RconStatusDto {
    pub configured: bool,
    /// "environment" or "settings" when configured.
    pub source: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout: Option<u64>,
}
