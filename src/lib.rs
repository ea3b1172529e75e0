//! # nixiepipe
//!
//! Host-side driver for a Nixie Pipe display array:
//! - Binary command protocol with length-prefixed frames
//! - Connect handshake with firmware version check
//! - Typed display operations (numbers, colours, brightness, symbols)
//! - Serial port discovery by USB descriptor
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Caller / CLI                             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Pipe (client)                               │
//! │        one write + one read per operation                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Protocol   │          │  Transport  │
//!   │   (codec)   │          │  (serial)   │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │ Nixie Pipe  │
//!                           │   Master    │
//!                           └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use nixiepipe::{Config, Pipe};
//!
//! # fn main() -> nixiepipe::Result<()> {
//! let mut pipe = Pipe::open(&Config::default())?;
//! pipe.set_number(9)?;
//! pipe.set_colour(0, 255, 0)?;
//! pipe.show()?;
//! pipe.close();
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod client;
pub mod protocol;
pub mod shared;
pub mod transport;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use client::{FirmwareVersion, Pipe};
pub use config::{Config, PortSelection};
pub use error::{PipeError, Result};
pub use shared::SharedPipe;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the driver
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
