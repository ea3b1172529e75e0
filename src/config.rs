//! Configuration for the Nixie Pipe driver
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

use crate::error::{PipeError, Result};

/// Baud rate the Nixie Pipe Master firmware listens at
pub const PIPE_BAUD: u32 = 57_600;

/// USB descriptor string used to auto-detect the Master module
pub const DEFAULT_DESCRIPTOR: &str = "Nixie Pipe";

/// Which serial port to open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSelection {
    /// Discover the port by matching the device descriptor
    Auto,

    /// Use the named port (e.g. `/dev/ttyACM0`, `COM3`)
    Explicit(String),
}

impl PortSelection {
    /// Interpret a command-line style port argument; `"auto"` or empty means discovery
    pub fn from_arg(arg: &str) -> Self {
        let arg = arg.trim();
        if arg.is_empty() || arg.eq_ignore_ascii_case("auto") {
            PortSelection::Auto
        } else {
            PortSelection::Explicit(arg.to_string())
        }
    }
}

/// Main configuration for a Nixie Pipe connection
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Transport Configuration
    // -------------------------------------------------------------------------
    /// Port to open, or auto-discovery
    pub port: PortSelection,

    /// Serial baud rate
    pub baud_rate: u32,

    /// Read timeout applied to every response read (milliseconds)
    pub read_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Handshake Configuration
    // -------------------------------------------------------------------------
    /// Delay after opening the port while the Master boots (milliseconds)
    pub settle_delay_ms: u64,

    // -------------------------------------------------------------------------
    // Discovery Configuration
    // -------------------------------------------------------------------------
    /// Descriptor substring matched against enumerated ports
    pub descriptor: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: PortSelection::Auto,
            baud_rate: PIPE_BAUD,
            read_timeout_ms: 1000,
            settle_delay_ms: 100,
            descriptor: DEFAULT_DESCRIPTOR.to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Read timeout as a Duration
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Settle delay as a Duration
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Check the values the transport cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.baud_rate == 0 {
            return Err(PipeError::Config("baud rate must be non-zero".to_string()));
        }
        if self.read_timeout_ms == 0 {
            return Err(PipeError::Config(
                "read timeout must be non-zero".to_string(),
            ));
        }
        if let PortSelection::Explicit(name) = &self.port {
            if name.is_empty() {
                return Err(PipeError::Config("port name is empty".to_string()));
            }
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Select the port (or auto-discovery)
    pub fn port(mut self, port: PortSelection) -> Self {
        self.config.port = port;
        self
    }

    /// Use an explicit port name
    pub fn port_name(mut self, name: impl Into<String>) -> Self {
        self.config.port = PortSelection::Explicit(name.into());
        self
    }

    /// Set the baud rate
    pub fn baud_rate(mut self, baud: u32) -> Self {
        self.config.baud_rate = baud;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the post-open settle delay (in milliseconds)
    pub fn settle_delay_ms(mut self, ms: u64) -> Self {
        self.config.settle_delay_ms = ms;
        self
    }

    /// Set the discovery descriptor
    pub fn descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.config.descriptor = descriptor.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
