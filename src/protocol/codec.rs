//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Len (1)  │ Op (1)   │      Payload (Len bytes)    │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```

use std::io::{ErrorKind, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{PipeError, Result};
use super::Packet;

/// Header size: 1 byte length + 1 byte opcode
pub const HEADER_SIZE: usize = 2;

/// Maximum payload size (length is a single byte)
pub const MAX_PAYLOAD_SIZE: usize = u8::MAX as usize;

// =============================================================================
// Packet Encoding/Decoding
// =============================================================================

/// Encode a packet to bytes
///
/// Format: length (1) + opcode (1) + payload
pub fn encode_packet(packet: &Packet) -> Bytes {
    let mut buf = BytesMut::with_capacity(packet.wire_len());
    buf.put_u8(packet.length());
    buf.put_u8(packet.opcode());
    buf.put_slice(packet.payload());
    buf.freeze()
}

/// Decode a single packet from bytes
///
/// The buffer must hold exactly one frame.
pub fn decode_packet(bytes: &[u8]) -> Result<Packet> {
    if bytes.len() < HEADER_SIZE {
        return Err(PipeError::MalformedResponse(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let payload_len = bytes[0] as usize;
    let total_len = HEADER_SIZE + payload_len;

    if bytes.len() != total_len {
        return Err(PipeError::MalformedResponse(format!(
            "Frame length mismatch: header says {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }

    Packet::new(bytes[1], bytes[HEADER_SIZE..].to_vec())
}

// =============================================================================
// Numeric helpers
// =============================================================================

/// Convert a u32 to 4 little-endian message bytes
pub fn value_to_message(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Combine little-endian message bytes into an unsigned value
///
/// Uses exactly the bytes supplied (at most 4); no sign extension.
pub fn message_to_value(message: &[u8]) -> u32 {
    message
        .iter()
        .take(4)
        .enumerate()
        .fold(0u32, |acc, (i, &byte)| acc | (u32::from(byte) << (8 * i)))
}

/// Reduce any integer to its low 8 bits, wrapping rather than saturating
pub fn low_byte(value: impl Into<i64>) -> u8 {
    (value.into() & 0xFF) as u8
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a packet to a stream as one contiguous write
pub fn write_packet<W: Write + ?Sized>(writer: &mut W, packet: &Packet) -> Result<()> {
    let bytes = encode_packet(packet);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read up to `len` bytes from a stream
///
/// Stops early when the stream times out or reaches end of input and
/// returns whatever arrived, which may be nothing. Other I/O errors are
/// propagated.
pub fn read_frame<R: Read + ?Sized>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    let mut filled = 0;

    while filled < len {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == ErrorKind::TimedOut || e.kind() == ErrorKind::WouldBlock => {
                break
            }
            Err(e) => return Err(PipeError::Io(e)),
        }
    }

    buf.truncate(filled);
    Ok(buf)
}
