//! Remote console packet codec.
//!
//! Every packet is framed as:
//! ```text
//! [ i32 LE: length ][ i32 LE: request id ][ i32 LE: type ][ body bytes ][ 0x00 ][ 0x00 ]
//! ```
//!
//! `length` counts everything after itself, so the smallest valid packet (empty body)
//! has a length of 10.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::server::error::rcon::RconError;

/// Client login request.
pub const SERVERDATA_AUTH: i32 = 3;
/// Server reply to a login request. Shares its value with `SERVERDATA_EXECCOMMAND`.
pub const SERVERDATA_AUTH_RESPONSE: i32 = 2;
/// Client command request.
pub const SERVERDATA_EXECCOMMAND: i32 = 2;
/// Server reply carrying command output.
pub const SERVERDATA_RESPONSE_VALUE: i32 = 0;

/// Request id the server echoes in an auth response when the password is wrong.
pub const AUTH_FAILED_ID: i32 = -1;

/// Longest command body the game server accepts.
pub const MAX_COMMAND_LENGTH: usize = 1446;

/// Request id + type + two terminating NULs.
const MIN_PACKET_LENGTH: i32 = 10;

/// Largest inbound packet: a 4096 byte body plus header and terminators.
const MAX_PACKET_LENGTH: i32 = 4096 + MIN_PACKET_LENGTH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub request_id: i32,
    pub kind: i32,
    pub body: String,
}

impl Packet {
    pub fn new(request_id: i32, kind: i32, body: impl Into<String>) -> Self {
        Self {
            request_id,
            kind,
            body: body.into(),
        }
    }
}

/// Encodes a packet into a length-prefixed frame.
///
/// # Returns
/// - `Ok(Bytes)` - The framed packet
/// - `Err(RconError::CommandTooLong)` - Body exceeds `MAX_COMMAND_LENGTH`
pub fn encode(packet: &Packet) -> Result<Bytes, RconError> {
    let body = packet.body.as_bytes();

    if body.len() > MAX_COMMAND_LENGTH {
        return Err(RconError::CommandTooLong(body.len()));
    }

    let length = MIN_PACKET_LENGTH + body.len() as i32;
    let mut buf = BytesMut::with_capacity(4 + length as usize);

    buf.put_i32_le(length);
    buf.put_i32_le(packet.request_id);
    buf.put_i32_le(packet.kind);
    buf.put_slice(body);
    buf.put_u8(0);
    buf.put_u8(0);

    Ok(buf.freeze())
}

/// Tries to decode one packet from the front of `buf`.
///
/// # Returns
/// - `Ok(Some(packet))` - A complete packet was consumed from the buffer
/// - `Ok(None)` - More data is needed; the buffer is left untouched
/// - `Err(RconError::Protocol)` - The length prefix is out of range
pub fn decode(buf: &mut BytesMut) -> Result<Option<Packet>, RconError> {
    if buf.len() < 4 {
        return Ok(None);
    }

    let length = i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);

    if !(MIN_PACKET_LENGTH..=MAX_PACKET_LENGTH).contains(&length) {
        return Err(RconError::Protocol(format!(
            "invalid packet length {}",
            length
        )));
    }

    let total = 4 + length as usize;
    if buf.len() < total {
        return Ok(None);
    }

    buf.advance(4);
    let mut frame = buf.split_to(length as usize);

    let request_id = frame.get_i32_le();
    let kind = frame.get_i32_le();

    // Body runs up to the first terminator; anything after it is padding.
    let body_bytes = &frame[..frame.len() - 2];
    let end = body_bytes
        .iter()
        .position(|b| *b == 0)
        .unwrap_or(body_bytes.len());
    let body = String::from_utf8_lossy(&body_bytes[..end]).into_owned();

    Ok(Some(Packet {
        request_id,
        kind,
        body,
    }))
}
