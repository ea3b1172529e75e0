//! Transport Module
//!
//! Byte-stream transports the client runs over.
//!
//! ## Architecture
//! - `Transport` trait: blocking read/write plus input flush
//! - `SerialTransport`: a real serial port
//! - `ScriptedTransport`: an in-memory stand-in for the Master
//! - Discovery: locating the Master among enumerated ports

mod discovery;
mod scripted;
mod serial;

use std::io::{Read, Write};

use crate::error::Result;

pub use discovery::{
    available_candidates, filter_candidates, find_pipe_port, select_port, FirstPort,
    PortCandidate, PortChooser,
};
pub use scripted::{ScriptHandle, ScriptedTransport};
pub use serial::SerialTransport;

/// A blocking, byte-oriented link to the Master
///
/// Reads must honour a bounded timeout, reporting it as
/// `ErrorKind::TimedOut` (or `WouldBlock`). The link is closed by dropping it.
pub trait Transport: Read + Write {
    /// Discard any bytes already received but not yet read
    fn clear_input(&mut self) -> Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &str;
}
