//! Error types for the Nixie Pipe driver
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using PipeError
pub type Result<T> = std::result::Result<T, PipeError>;

/// Unified error type for Nixie Pipe operations
#[derive(Debug, Error)]
pub enum PipeError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Failed to open transport {port}: {reason}")]
    TransportOpenFailed { port: String, reason: String },

    #[error("No Nixie Pipe Master module detected (descriptor {0:?})")]
    NoDeviceFound(String),

    #[error("Port selection cancelled")]
    PortSelectionCancelled,

    #[error("Client is not connected")]
    NotConnected,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Handshake failed: {0}")]
    HandshakeFailed(String),

    #[error("Device unresponsive: no reply to opcode 0x{opcode:02x}")]
    DeviceUnresponsive { opcode: u8 },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unknown opcode: 0x{0:02x}")]
    UnknownOpcode(u8),

    #[error("Payload too large: {0} bytes (max 255)")]
    PayloadTooLarge(usize),

    // -------------------------------------------------------------------------
    // Symbol Errors
    // -------------------------------------------------------------------------
    #[error("Unknown weather symbol: {0:?}")]
    UnknownWeatherSymbol(String),

    #[error("Unknown unit: {0:?}")]
    UnknownUnit(String),

    #[error("Unknown unit prefix: {0:?}")]
    UnknownPrefix(String),

    // -------------------------------------------------------------------------
    // Argument / Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serialport::Error> for PipeError {
    fn from(err: serialport::Error) -> Self {
        PipeError::Io(err.into())
    }
}
