//! Nixie Pipe client
//!
//! Owns the link to a Nixie Pipe Master and turns display operations into
//! command/reply exchanges.
//!
//! ## Exchange Flow
//! ```text
//! encode packet ──► write ──► read (reply len + 2) ──► decode / ignore
//! ```
//!
//! Every operation completes a full write-then-read before returning, so
//! the host never gets ahead of the Master. There are no request IDs; a
//! client must not be driven from two threads without a lock around each
//! call (see [`crate::SharedPipe`]).

use std::fmt;
use std::thread;

use crate::config::{Config, PortSelection};
use crate::error::{PipeError, Result};
use crate::protocol::{
    low_byte, message_to_value, read_frame, write_packet, Command, Opcode, Response,
    Unit, UnitPrefix, WeatherSymbol, HEADER_SIZE,
};
use crate::transport::{find_pipe_port, PortChooser, SerialTransport, Transport};

/// Firmware version reported during the handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
}

impl FirmwareVersion {
    /// Decode a 4-byte handshake reply: `[2, CONNECT, minor, major]`
    ///
    /// The length byte is not checked; only the reply size and echoed
    /// opcode are.
    pub fn from_handshake(reply: &[u8]) -> Result<Self> {
        let expected = HEADER_SIZE + Opcode::Connect.response_len();
        if reply.len() != expected {
            return Err(PipeError::HandshakeFailed(format!(
                "expected {} reply bytes, got {}",
                expected,
                reply.len()
            )));
        }
        if reply[1] != Opcode::Connect.as_byte() {
            return Err(PipeError::HandshakeFailed(format!(
                "expected opcode 0x{:02x}, got 0x{:02x}",
                Opcode::Connect.as_byte(),
                reply[1]
            )));
        }

        let raw = message_to_value(&reply[HEADER_SIZE..]);
        Ok(Self {
            major: (raw >> 8) as u8,
            minor: raw as u8,
        })
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A connected Nixie Pipe Master
///
/// Created only by a successful handshake. The transport is released by
/// [`Pipe::close`] or when the client is dropped.
pub struct Pipe<T: Transport> {
    transport: Option<T>,
    version: FirmwareVersion,
    port_name: String,
}

impl Pipe<SerialTransport> {
    /// Open the configured serial port and handshake
    ///
    /// With `PortSelection::Auto`, exactly one matching port must exist.
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_inner(config, None)
    }

    /// Like [`Pipe::open`], asking `chooser` when several ports match
    pub fn open_with(config: &Config, chooser: &dyn PortChooser) -> Result<Self> {
        Self::open_inner(config, Some(chooser))
    }

    fn open_inner(config: &Config, chooser: Option<&dyn PortChooser>) -> Result<Self> {
        config.validate()?;

        let port = match &config.port {
            PortSelection::Explicit(name) => name.clone(),
            PortSelection::Auto => find_pipe_port(&config.descriptor, chooser)?,
        };

        let transport = SerialTransport::open(&port, config.baud_rate, config.read_timeout())?;
        Self::connect(transport, config)
    }
}

impl<T: Transport> Pipe<T> {
    /// Handshake over an already-open transport
    ///
    /// Waits for the Master to boot, drops any stale input, then sends
    /// CONNECT. On failure the transport is closed before returning.
    pub fn connect(mut transport: T, config: &Config) -> Result<Self> {
        let port_name = transport.name().to_string();

        if !config.settle_delay().is_zero() {
            thread::sleep(config.settle_delay());
        }

        let version = match transport
            .clear_input()
            .and_then(|_| handshake(&mut transport))
        {
            Ok(version) => version,
            Err(e) => {
                tracing::warn!("Handshake with {} failed: {}", port_name, e);
                drop(transport);
                return Err(e);
            }
        };

        tracing::info!("Connected to Nixie Pipe version {} on {}", version, port_name);

        Ok(Self {
            transport: Some(transport),
            version,
            port_name,
        })
    }

    /// Firmware version reported by the Master
    pub fn firmware_version(&self) -> FirmwareVersion {
        self.version
    }

    /// Name of the underlying port
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// True until [`Pipe::close`] is called
    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Release the transport; later calls are no-ops
    pub fn close(&mut self) {
        if self.transport.take().is_some() {
            tracing::debug!("Closed Nixie Pipe on {}", self.port_name);
        }
    }

    // -------------------------------------------------------------------------
    // Display commands
    // -------------------------------------------------------------------------

    /// Display `value` across the array
    pub fn set_number(&mut self, value: u32) -> Result<()> {
        self.send(Command::SetNumber { value })
    }

    /// Round `value` to the nearest integer and display it
    ///
    /// Negative values wrap to their 32-bit two's complement.
    pub fn set_number_rounded(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(PipeError::InvalidArgument(format!(
                "cannot display {}",
                value
            )));
        }
        self.set_number(value.round() as i64 as u32)
    }

    /// Display a single digit (< 10) on one pipe
    pub fn set_pipe_number(&mut self, pipe: u8, value: u8) -> Result<()> {
        self.send(Command::SetPipeNumber { pipe, value })
    }

    /// Colour the whole array; each channel keeps only its low 8 bits
    pub fn set_colour(
        &mut self,
        r: impl Into<i64>,
        g: impl Into<i64>,
        b: impl Into<i64>,
    ) -> Result<()> {
        self.send(Command::SetColour {
            r: low_byte(r),
            g: low_byte(g),
            b: low_byte(b),
        })
    }

    /// Colour one pipe; each channel keeps only its low 8 bits
    pub fn set_pipe_colour(
        &mut self,
        pipe: u8,
        r: impl Into<i64>,
        g: impl Into<i64>,
        b: impl Into<i64>,
    ) -> Result<()> {
        self.send(Command::SetPipeColour {
            pipe,
            r: low_byte(r),
            g: low_byte(g),
            b: low_byte(b),
        })
    }

    /// Blank the whole array
    pub fn clear(&mut self) -> Result<()> {
        self.send(Command::Clear)
    }

    /// Blank one pipe
    pub fn clear_pipe(&mut self, pipe: impl Into<i64>) -> Result<()> {
        self.send(Command::ClearPipe {
            pipe: low_byte(pipe),
        })
    }

    /// Set brightness, 0 (off) to 255 (bright)
    pub fn set_brightness(&mut self, value: impl Into<i64>) -> Result<()> {
        self.send(Command::Brightness {
            value: low_byte(value),
        })
    }

    /// Set how many unit modules lead the array
    ///
    /// Unit modules are skipped by [`Pipe::set_number`] so they can be set
    /// individually.
    pub fn set_number_units(&mut self, count: impl Into<i64>) -> Result<()> {
        self.send(Command::SetNumberUnits {
            count: low_byte(count),
        })
    }

    /// Read back the number being displayed
    ///
    /// Returns `None` whenever the reply is not exactly 6 bytes, including
    /// when the Master sends nothing back.
    pub fn get_number(&mut self) -> Result<Option<u32>> {
        let response = match self.exchange(&Command::GetNumber) {
            Ok(response) => response,
            Err(PipeError::DeviceUnresponsive { .. }) => {
                tracing::warn!("getNumber got no reply");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if !response.is_complete() {
            tracing::warn!(
                "getNumber reply was {} bytes, expected {}",
                response.len(),
                response.expected_len()
            );
            return Ok(None);
        }

        // Only the low 3 bytes of the reply carry the value
        let value = message_to_value(&response.bytes()[HEADER_SIZE..HEADER_SIZE + 3]);
        Ok(Some(value))
    }

    /// Show a weather symbol on a weather pipe
    ///
    /// `symbol` is a description ("Sunny", "Broken clouds") or an
    /// OpenWeatherMap icon code ("01d"). Unknown symbols fail before
    /// anything is written.
    pub fn set_weather(&mut self, pipe: u8, symbol: &str) -> Result<()> {
        let symbol = WeatherSymbol::lookup(symbol)?;
        tracing::debug!("Weather pipe {} -> {}", pipe, symbol);
        self.set_pipe_number(pipe, symbol.index())
    }

    /// Show a unit symbol on a unit pipe
    pub fn set_unit(&mut self, pipe: u8, unit: Unit) -> Result<()> {
        self.set_pipe_number(pipe, unit.code())
    }

    /// Show a prefix symbol on a unit pipe
    pub fn set_prefix(&mut self, pipe: u8, prefix: UnitPrefix) -> Result<()> {
        self.set_pipe_number(pipe, prefix.code())
    }

    /// Latch pending changes onto the LEDs
    ///
    /// The Master ignores serial input while it refreshes the LEDs, so the
    /// reply read here is what keeps the host from sending too early.
    pub fn show(&mut self) -> Result<()> {
        self.send(Command::Show)
    }

    // -------------------------------------------------------------------------
    // Exchange
    // -------------------------------------------------------------------------

    /// Fire-and-forget: the ack is read but not inspected
    fn send(&mut self, command: Command) -> Result<()> {
        self.exchange(&command).map(|_| ())
    }

    /// Write one command and read its reply
    pub fn exchange(&mut self, command: &Command) -> Result<Response> {
        let transport = self.transport.as_mut().ok_or(PipeError::NotConnected)?;
        exchange(transport, command)
    }
}

impl<T: Transport> Drop for Pipe<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T: Transport> fmt::Debug for Pipe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe")
            .field("port_name", &self.port_name)
            .field("version", &self.version)
            .field("open", &self.is_open())
            .finish()
    }
}

fn exchange<T: Transport + ?Sized>(transport: &mut T, command: &Command) -> Result<Response> {
    let opcode = command.opcode();
    let packet = command.to_packet();
    let expected = HEADER_SIZE + command.response_len();

    tracing::debug!("Sending {} with {} payload bytes", opcode, packet.length());

    write_packet(transport, &packet)?;
    let bytes = read_frame(transport, expected)?;

    tracing::trace!("{} reply: {:02x?}", opcode, bytes);

    if bytes.is_empty() {
        return Err(PipeError::DeviceUnresponsive {
            opcode: opcode.as_byte(),
        });
    }

    Ok(Response::new(bytes, expected))
}

fn handshake<T: Transport + ?Sized>(transport: &mut T) -> Result<FirmwareVersion> {
    let response = match exchange(transport, &Command::Connect) {
        Ok(response) => response,
        Err(PipeError::DeviceUnresponsive { .. }) => {
            return Err(PipeError::HandshakeFailed("no reply".to_string()))
        }
        Err(e) => return Err(e),
    };
    FirmwareVersion::from_handshake(response.bytes())
}
