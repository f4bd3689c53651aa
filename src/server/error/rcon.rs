use std::time::Duration;
use thiserror::Error;

use crate::server::rcon::packet::MAX_COMMAND_LENGTH;

/// Failures talking to the game server's remote console.
///
/// All variants are treated as execution failures by the dispatcher: the message is
/// stored on the queue record and the attempt counts against `max_attempts`.
#[derive(Error, Debug)]
pub enum RconError {
    /// Socket-level failure (connection refused, reset, etc.).
    #[error("RCON connection error: {0}")]
    Io(#[from] std::io::Error),

    /// A network step did not finish within the profile timeout.
    #[error("RCON {step} timed out after {}ms", timeout.as_millis())]
    Timeout {
        /// Which step timed out (connect, authenticate, execute)
        step: &'static str,
        /// The configured timeout
        timeout: Duration,
    },

    /// The server rejected the configured password.
    #[error("RCON authentication failed")]
    AuthenticationFailed,

    /// Outbound command body exceeds what the protocol allows.
    #[error("RCON command too long: {0} bytes (max: {max})", max = MAX_COMMAND_LENGTH)]
    CommandTooLong(usize),

    /// The server sent something that is not a valid RCON packet.
    #[error("RCON protocol error: {0}")]
    Protocol(String),
}
