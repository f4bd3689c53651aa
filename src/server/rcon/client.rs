//! TCP client for the game server's remote console.
//!
//! One client holds one authenticated connection. Every network step is bounded by the
//! profile timeout so a hung server can only stall a dispatch cycle for that long.

use bytes::BytesMut;
use std::future::Future;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::server::{
    error::rcon::RconError,
    model::rcon::RconProfile,
    rcon::packet::{
        self, Packet, AUTH_FAILED_ID, SERVERDATA_AUTH, SERVERDATA_AUTH_RESPONSE,
        SERVERDATA_EXECCOMMAND, SERVERDATA_RESPONSE_VALUE,
    },
};

pub struct RconClient {
    stream: TcpStream,
    buffer: BytesMut,
    next_id: i32,
    timeout: Duration,
}

impl RconClient {
    /// Connects to the console described by `profile` and authenticates.
    ///
    /// # Returns
    /// - `Ok(RconClient)` - Authenticated client ready to execute commands
    /// - `Err(RconError::Timeout)` - Connect or login exceeded the profile timeout
    /// - `Err(RconError::AuthenticationFailed)` - Password rejected
    /// - `Err(RconError::Io)` - Connection refused or dropped
    pub async fn connect(profile: &RconProfile) -> Result<Self, RconError> {
        let timeout = profile.timeout();

        let stream = with_timeout("connect", timeout, TcpStream::connect(profile.address()))
            .await??;

        let mut client = Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            next_id: 1,
            timeout,
        };

        with_timeout("authenticate", timeout, client.authenticate(&profile.password)).await??;

        Ok(client)
    }

    /// Executes a console command and returns its output.
    ///
    /// # Returns
    /// - `Ok(String)` - Console response body (may be empty)
    /// - `Err(RconError)` - Command too long, timeout, or connection failure
    pub async fn execute(&mut self, command: &str) -> Result<String, RconError> {
        let timeout = self.timeout;
        with_timeout("execute", timeout, self.exchange(command)).await?
    }

    async fn authenticate(&mut self, password: &str) -> Result<(), RconError> {
        let id = self.allocate_id();
        self.send(&Packet::new(id, SERVERDATA_AUTH, password)).await?;

        loop {
            let reply = self.read_packet().await?;

            // Some servers send an empty response value ahead of the auth response.
            if reply.kind != SERVERDATA_AUTH_RESPONSE {
                continue;
            }

            if reply.request_id == AUTH_FAILED_ID {
                return Err(RconError::AuthenticationFailed);
            }

            if reply.request_id == id {
                return Ok(());
            }
        }
    }

    async fn exchange(&mut self, command: &str) -> Result<String, RconError> {
        let id = self.allocate_id();
        self.send(&Packet::new(id, SERVERDATA_EXECCOMMAND, command))
            .await?;

        loop {
            let reply = self.read_packet().await?;

            if reply.request_id == id && reply.kind == SERVERDATA_RESPONSE_VALUE {
                return Ok(reply.body);
            }
        }
    }

    async fn send(&mut self, packet: &Packet) -> Result<(), RconError> {
        let frame = packet::encode(packet)?;
        self.stream.write_all(&frame).await?;
        self.stream.flush().await?;
        Ok(())
    }

    async fn read_packet(&mut self) -> Result<Packet, RconError> {
        loop {
            if let Some(packet) = packet::decode(&mut self.buffer)? {
                return Ok(packet);
            }

            let read = self.stream.read_buf(&mut self.buffer).await?;
            if read == 0 {
                return Err(RconError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "connection closed by server",
                )));
            }
        }
    }

    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        // Skip -1, which the server reserves for auth failures.
        self.next_id = self.next_id.checked_add(1).unwrap_or(1);
        id
    }
}

async fn with_timeout<F: Future>(
    step: &'static str,
    timeout: Duration,
    future: F,
) -> Result<F::Output, RconError> {
    tokio::time::timeout(timeout, future)
        .await
        .map_err(|_| RconError::Timeout { step, timeout })
}
