//! Packet definition
//!
//! The length-prefixed, opcode-tagged frame used in both directions.

use crate::error::{PipeError, Result};
use super::codec::MAX_PAYLOAD_SIZE;

/// A single protocol frame: `[length, opcode, payload...]`
///
/// `length` is always derived from the payload, so it cannot disagree with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    opcode: u8,
    payload: Vec<u8>,
}

impl Packet {
    /// Create a packet, rejecting payloads that do not fit the 1-byte length field
    pub fn new(opcode: u8, payload: Vec<u8>) -> Result<Self> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(PipeError::PayloadTooLarge(payload.len()));
        }
        Ok(Self { opcode, payload })
    }

    /// Create a packet whose payload is known to be short
    pub(crate) fn from_parts(opcode: u8, payload: Vec<u8>) -> Self {
        debug_assert!(payload.len() <= MAX_PAYLOAD_SIZE);
        Self { opcode, payload }
    }

    /// Value of the length byte
    pub fn length(&self) -> u8 {
        self.payload.len() as u8
    }

    /// Opcode byte
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    /// Payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Total size on the wire, header included
    pub fn wire_len(&self) -> usize {
        super::codec::HEADER_SIZE + self.payload.len()
    }
}
