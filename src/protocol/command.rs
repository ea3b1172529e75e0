//! Command definitions
//!
//! Represents commands sent to the Nixie Pipe Master.

use std::fmt;

use crate::error::{PipeError, Result};
use super::codec::{message_to_value, value_to_message};
use super::Packet;

/// Payload sent with CONNECT ("NP")
pub const HANDSHAKE_MAGIC: [u8; 2] = [0x4E, 0x50];

/// Filler byte for commands that carry no arguments
const NO_ARGS: u8 = 0x01;

/// Command opcodes understood by the Master firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    SetNumber = 0x40,
    SetPipeNumber = 0x41,
    SetColour = 0x42,
    SetPipeColour = 0x43,
    Brightness = 0x44,
    Clear = 0x45,
    ClearPipe = 0x46,
    GetNumber = 0x47,
    Connect = 0x48,
    SetNumberUnits = 0x49,
    Show = 0x50,
}

impl Opcode {
    /// Every opcode, in wire order
    pub const ALL: [Opcode; 11] = [
        Opcode::SetNumber,
        Opcode::SetPipeNumber,
        Opcode::SetColour,
        Opcode::SetPipeColour,
        Opcode::Brightness,
        Opcode::Clear,
        Opcode::ClearPipe,
        Opcode::GetNumber,
        Opcode::Connect,
        Opcode::SetNumberUnits,
        Opcode::Show,
    ];

    /// Wire byte for this opcode
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Length of the reply payload the Master sends for this opcode
    pub fn response_len(self) -> usize {
        match self {
            Opcode::Connect => 2,
            Opcode::GetNumber => 4,
            _ => 1,
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = PipeError;

    fn try_from(byte: u8) -> Result<Self> {
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.as_byte() == byte)
            .ok_or(PipeError::UnknownOpcode(byte))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}(0x{:02x})", self, self.as_byte())
    }
}

/// A typed command
///
/// Arguments are already reduced to their wire width; masking of wider
/// caller input happens in [`crate::Pipe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Handshake, expects `minor, major` back
    Connect,

    /// Display a number across the whole array
    SetNumber { value: u32 },

    /// Display a single digit on one pipe
    SetPipeNumber { pipe: u8, value: u8 },

    /// Colour the whole array
    SetColour { r: u8, g: u8, b: u8 },

    /// Colour one pipe
    SetPipeColour { pipe: u8, r: u8, g: u8, b: u8 },

    /// Array brightness, 0 (off) to 255
    Brightness { value: u8 },

    /// Blank the whole array
    Clear,

    /// Blank one pipe
    ClearPipe { pipe: u8 },

    /// Ask for the number currently displayed
    GetNumber,

    /// Number of unit modules at the start of the array
    SetNumberUnits { count: u8 },

    /// Latch pending changes onto the LEDs
    Show,
}

impl Command {
    /// Get the opcode
    pub fn opcode(&self) -> Opcode {
        match self {
            Command::Connect => Opcode::Connect,
            Command::SetNumber { .. } => Opcode::SetNumber,
            Command::SetPipeNumber { .. } => Opcode::SetPipeNumber,
            Command::SetColour { .. } => Opcode::SetColour,
            Command::SetPipeColour { .. } => Opcode::SetPipeColour,
            Command::Brightness { .. } => Opcode::Brightness,
            Command::Clear => Opcode::Clear,
            Command::ClearPipe { .. } => Opcode::ClearPipe,
            Command::GetNumber => Opcode::GetNumber,
            Command::SetNumberUnits { .. } => Opcode::SetNumberUnits,
            Command::Show => Opcode::Show,
        }
    }

    /// Build the payload bytes
    pub fn payload(&self) -> Vec<u8> {
        match *self {
            Command::Connect => HANDSHAKE_MAGIC.to_vec(),
            Command::SetNumber { value } => value_to_message(value).to_vec(),
            Command::SetPipeNumber { pipe, value } => vec![pipe, value],
            Command::SetColour { r, g, b } => vec![r, g, b],
            Command::SetPipeColour { pipe, r, g, b } => vec![pipe, r, g, b],
            Command::Brightness { value } => vec![value],
            Command::Clear | Command::GetNumber | Command::Show => vec![NO_ARGS],
            Command::ClearPipe { pipe } => vec![pipe],
            Command::SetNumberUnits { count } => vec![count],
        }
    }

    /// Length of the reply payload the Master sends back
    pub fn response_len(&self) -> usize {
        self.opcode().response_len()
    }

    /// Build the request packet
    pub fn to_packet(&self) -> Packet {
        // Payloads are at most 4 bytes, well under the frame limit
        Packet::from_parts(self.opcode().as_byte(), self.payload())
    }

    /// Parse a request packet back into a command
    pub fn from_packet(packet: &Packet) -> Result<Self> {
        let opcode = Opcode::try_from(packet.opcode())?;
        let payload = packet.payload();

        let expect = |len: usize| -> Result<()> {
            if payload.len() == len {
                Ok(())
            } else {
                Err(PipeError::MalformedResponse(format!(
                    "{}: expected {} payload bytes, got {}",
                    opcode,
                    len,
                    payload.len()
                )))
            }
        };

        let command = match opcode {
            Opcode::Connect => {
                expect(2)?;
                if payload != HANDSHAKE_MAGIC {
                    return Err(PipeError::MalformedResponse(format!(
                        "{}: bad magic {:02x?}",
                        opcode, payload
                    )));
                }
                Command::Connect
            }
            Opcode::SetNumber => {
                expect(4)?;
                Command::SetNumber {
                    value: message_to_value(payload),
                }
            }
            Opcode::SetPipeNumber => {
                expect(2)?;
                Command::SetPipeNumber {
                    pipe: payload[0],
                    value: payload[1],
                }
            }
            Opcode::SetColour => {
                expect(3)?;
                Command::SetColour {
                    r: payload[0],
                    g: payload[1],
                    b: payload[2],
                }
            }
            Opcode::SetPipeColour => {
                expect(4)?;
                Command::SetPipeColour {
                    pipe: payload[0],
                    r: payload[1],
                    g: payload[2],
                    b: payload[3],
                }
            }
            Opcode::Brightness => {
                expect(1)?;
                Command::Brightness { value: payload[0] }
            }
            Opcode::Clear => {
                expect(1)?;
                Command::Clear
            }
            Opcode::ClearPipe => {
                expect(1)?;
                Command::ClearPipe { pipe: payload[0] }
            }
            Opcode::GetNumber => {
                expect(1)?;
                Command::GetNumber
            }
            Opcode::SetNumberUnits => {
                expect(1)?;
                Command::SetNumberUnits { count: payload[0] }
            }
            Opcode::Show => {
                expect(1)?;
                Command::Show
            }
        };

        Ok(command)
    }
}
