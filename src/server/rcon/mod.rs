//! Remote console (RCON) execution.
//!
//! The dispatcher only depends on the [`CommandExecutor`] capability. [`RconExecutor`] is
//! the production implementation: it opens an authenticated connection per command using
//! the profile resolved for the current cycle.

pub mod client;
pub mod packet;


use async_trait::async_trait;

use crate::server::{error::rcon::RconError, model::rcon::RconProfile, rcon::client::RconClient};

/// Runs a console command on the game server.
///
/// Implementations must enforce their own timeout; the dispatcher waits for whatever
/// the executor returns.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// # Returns
    /// - `Ok(String)` - Console output of the command
    /// - `Err(RconError)` - The command could not be executed
    async fn execute(&self, profile: &RconProfile, command: &str) -> Result<String, RconError>;
}

/// Executes commands over the RCON protocol.
#[derive(Debug, Default, Clone, Copy)]
pub struct RconExecutor;

#[async_trait]
impl CommandExecutor for RconExecutor {
    async fn execute(&self, profile: &RconProfile, command: &str) -> Result<String, RconError> {
        let mut client = RconClient::connect(profile).await?;
        client.execute(command).await
    }
}
