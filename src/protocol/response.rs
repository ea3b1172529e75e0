//! Response definitions
//!
//! Raw reply bytes read back from the Master.

use super::codec::HEADER_SIZE;

/// Bytes received after a command
///
/// A response may be shorter than expected when the read timed out part
/// way through; callers decide whether that matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    bytes: Vec<u8>,
    expected_len: usize,
}

impl Response {
    /// Wrap received bytes; `expected_len` includes the header
    pub fn new(bytes: Vec<u8>, expected_len: usize) -> Self {
        Self {
            bytes,
            expected_len,
        }
    }

    /// All bytes received, header included
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes received
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of bytes that were asked for
    pub fn expected_len(&self) -> usize {
        self.expected_len
    }

    /// True when exactly the expected number of bytes arrived
    pub fn is_complete(&self) -> bool {
        self.bytes.len() == self.expected_len
    }

    /// Echoed opcode, if the header arrived
    pub fn opcode(&self) -> Option<u8> {
        self.bytes.get(1).copied()
    }

    /// Bytes after the header
    pub fn body(&self) -> &[u8] {
        self.bytes.get(HEADER_SIZE..).unwrap_or(&[])
    }
}
