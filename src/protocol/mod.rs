//! Protocol Module
//!
//! Defines the wire protocol spoken with the Nixie Pipe Master.
//!
//! ## Frame Format (both directions)
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Len (1)  │ Op (1)   │      Payload (Len bytes)    │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! `Len` counts payload bytes only; the 2-byte header is not included.
//! Multi-byte numbers are little-endian.
//!
//! ### Opcodes
//! - 0x40: SET_NUMBER       - Payload: value (4, LE)
//! - 0x41: SET_PIPE_NUMBER  - Payload: pipe, value
//! - 0x42: SET_COLOUR       - Payload: r, g, b
//! - 0x43: SET_PIPE_COLOUR  - Payload: pipe, r, g, b
//! - 0x44: BRIGHTNESS       - Payload: value
//! - 0x45: CLEAR            - Payload: 0x01
//! - 0x46: CLEAR_PIPE       - Payload: pipe
//! - 0x47: GET_NUMBER       - Payload: 0x01
//! - 0x48: CONNECT          - Payload: 'N', 'P'
//! - 0x49: SET_NUMBER_UNITS - Payload: count
//! - 0x50: SHOW             - Payload: 0x01
//!
//! ### Replies
//! The Master answers every frame with a frame echoing the opcode. Most
//! replies carry a single ack byte; CONNECT carries `minor, major` and
//! GET_NUMBER carries a 4-byte value of which the low 3 bytes are used.

mod codec;
mod command;
mod packet;
mod response;
mod symbols;

pub use codec::{
    decode_packet, encode_packet, low_byte, message_to_value, read_frame, value_to_message,
    write_packet, HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
pub use command::{Command, Opcode};
pub use packet::Packet;
pub use response::Response;
pub use symbols::{capitalize_first, Unit, UnitPrefix, WeatherSymbol};
