use crate::server::{
    error::{config::ConfigError, AppError},
    model::rcon::{RconProfile, DEFAULT_RCON_TIMEOUT_MS},
};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Every 30 seconds, at second 0 and 30.
const DEFAULT_POLL_SCHEDULE: &str = "*/30 * * * * *";

pub struct Config {
    pub database_url: String,
    pub bind_address: String,

    /// Bearer token required on every admin API request.
    pub admin_token: String,

    /// Cron expression (with seconds) for the dispatcher cycle.
    pub poll_schedule: String,

    /// Executor profile from `RCON_*` variables, when all of them are present.
    pub rcon: Option<RconProfile>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |name: &str| {
            var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            admin_token: required("ADMIN_API_TOKEN")?,
            bind_address: var("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            poll_schedule: var("COMMAND_POLL_SCHEDULE")
                .unwrap_or_else(|| DEFAULT_POLL_SCHEDULE.to_string()),
            rcon: rcon_from_vars(&var)?,
        })
    }
}

/// Reads `RCON_HOST`, `RCON_PORT`, `RCON_PASSWORD` and `RCON_TIMEOUT`.
///
/// Missing host, port or password yields `None` so resolution can fall back to the
/// persisted settings. Values that are present but malformed are rejected, as is a zero
/// timeout.
fn rcon_from_vars(
    var: &impl Fn(&str) -> Option<String>,
) -> Result<Option<RconProfile>, ConfigError> {
    let (Some(host), Some(port), Some(password)) =
        (var("RCON_HOST"), var("RCON_PORT"), var("RCON_PASSWORD"))
    else {
        return Ok(None);
    };

    let port = parse_var("RCON_PORT", port)?;
    let timeout = match var("RCON_TIMEOUT") {
        Some(value) => parse_var("RCON_TIMEOUT", value)?,
        None => DEFAULT_RCON_TIMEOUT_MS,
    };
    if timeout == 0 {
        return Err(ConfigError::InvalidEnvVar {
            name: "RCON_TIMEOUT".to_string(),
            value: timeout.to_string(),
            reason: "timeout must be greater than zero".to_string(),
        });
    }

    let profile = RconProfile {
        host,
        port,
        password,
        timeout,
    };

    Ok(profile.is_complete().then_some(profile))
}

fn parse_var<T>(name: &str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
        value,
    })
}
