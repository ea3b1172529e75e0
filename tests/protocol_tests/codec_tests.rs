//! Codec Tests
//!
//! Tests for packet framing, command encoding/decoding and numeric helpers.

use std::io::{self, Cursor, Read};

use nixiepipe::protocol::{
    decode_packet, encode_packet, low_byte, message_to_value, read_frame, value_to_message,
    write_packet, Command, Opcode, Packet, HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
use nixiepipe::PipeError;

// =============================================================================
// Command Encoding/Decoding Tests
// =============================================================================

fn sample_commands() -> Vec<Command> {
    vec![
        Command::Connect,
        Command::SetNumber { value: 123_456 },
        Command::SetPipeNumber { pipe: 3, value: 7 },
        Command::SetColour { r: 255, g: 128, b: 0 },
        Command::SetPipeColour { pipe: 1, r: 10, g: 20, b: 30 },
        Command::Brightness { value: 200 },
        Command::Clear,
        Command::ClearPipe { pipe: 4 },
        Command::GetNumber,
        Command::SetNumberUnits { count: 2 },
        Command::Show,
    ]
}

#[test]
fn test_every_opcode_survives_encode_decode() {
    let commands = sample_commands();
    assert_eq!(commands.len(), Opcode::ALL.len());

    for cmd in commands {
        let encoded = encode_packet(&cmd.to_packet());
        let packet = decode_packet(&encoded).unwrap();
        assert_eq!(packet.opcode(), cmd.opcode().as_byte());
        assert_eq!(packet.payload(), cmd.payload().as_slice());
        assert_eq!(Command::from_packet(&packet).unwrap(), cmd);
    }
}

#[test]
fn test_set_number_wire_bytes() {
    let encoded = encode_packet(&Command::SetNumber { value: 42 }.to_packet());
    assert_eq!(encoded.to_vec(), vec![0x04u8, 0x40, 0x2A, 0x00, 0x00, 0x00]);
}

#[test]
fn test_connect_wire_bytes() {
    let encoded = encode_packet(&Command::Connect.to_packet());
    assert_eq!(encoded.to_vec(), vec![0x02u8, 0x48, 0x4E, 0x50]);
}

#[test]
fn test_no_arg_commands_send_filler_byte() {
    let cases: [(Command, u8); 3] = [
        (Command::Clear, 0x45),
        (Command::GetNumber, 0x47),
        (Command::Show, 0x50),
    ];
    for (cmd, opcode) in cases {
        let encoded = encode_packet(&cmd.to_packet());
        assert_eq!(encoded.to_vec(), vec![0x01, opcode, 0x01]);
    }
}

#[test]
fn test_response_lengths() {
    assert_eq!(Command::Connect.response_len(), 2);
    assert_eq!(Command::GetNumber.response_len(), 4);
    assert_eq!(Command::Show.response_len(), 1);
    assert_eq!(Command::SetNumber { value: 1 }.response_len(), 1);
}

#[test]
fn test_opcode_table() {
    let expected: [(Opcode, u8); 11] = [
        (Opcode::SetNumber, 0x40),
        (Opcode::SetPipeNumber, 0x41),
        (Opcode::SetColour, 0x42),
        (Opcode::SetPipeColour, 0x43),
        (Opcode::Brightness, 0x44),
        (Opcode::Clear, 0x45),
        (Opcode::ClearPipe, 0x46),
        (Opcode::GetNumber, 0x47),
        (Opcode::Connect, 0x48),
        (Opcode::SetNumberUnits, 0x49),
        (Opcode::Show, 0x50),
    ];
    for (opcode, byte) in expected {
        assert_eq!(opcode.as_byte(), byte);
        assert_eq!(Opcode::try_from(byte).unwrap(), opcode);
    }
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_incomplete_header() {
    let result = decode_packet(&[0x01]);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Incomplete header"));
}

#[test]
fn test_length_mismatch() {
    // Header claims 4 payload bytes, only 2 present
    let result = decode_packet(&[0x04, 0x40, 0x2A, 0x00]);
    assert!(matches!(result, Err(PipeError::MalformedResponse(_))));
}

#[test]
fn test_unknown_opcode() {
    let packet = decode_packet(&[0x01, 0x7F, 0x00]).unwrap();
    let result = Command::from_packet(&packet);
    assert!(matches!(result, Err(PipeError::UnknownOpcode(0x7F))));
}

#[test]
fn test_wrong_payload_size_for_opcode() {
    let packet = Packet::new(Opcode::SetColour.as_byte(), vec![1, 2]).unwrap();
    let result = Command::from_packet(&packet);
    assert!(matches!(result, Err(PipeError::MalformedResponse(_))));
}

#[test]
fn test_connect_with_bad_magic() {
    let packet = Packet::new(Opcode::Connect.as_byte(), vec![0x00, 0x00]).unwrap();
    assert!(Command::from_packet(&packet).is_err());
}

#[test]
fn test_payload_too_large() {
    let result = Packet::new(0x40, vec![0; MAX_PAYLOAD_SIZE + 1]);
    assert!(matches!(result, Err(PipeError::PayloadTooLarge(256))));

    let max = Packet::new(0x40, vec![0; MAX_PAYLOAD_SIZE]).unwrap();
    assert_eq!(max.length(), 255);
    assert_eq!(max.wire_len(), MAX_PAYLOAD_SIZE + HEADER_SIZE);
}

// =============================================================================
// Numeric helper Tests
// =============================================================================

#[test]
fn test_value_to_message_little_endian() {
    assert_eq!(value_to_message(0x1234_5678), [0x78, 0x56, 0x34, 0x12]);
    assert_eq!(value_to_message(0), [0, 0, 0, 0]);
}

#[test]
fn test_message_to_value_uses_supplied_width() {
    assert_eq!(message_to_value(&[0xE8, 0x03, 0x00]), 1000);
    assert_eq!(message_to_value(&[0xFF, 0xFF, 0xFF]), 0x00FF_FFFF);
    assert_eq!(message_to_value(&[0x01, 0x02]), 0x0201);
    assert_eq!(message_to_value(&[]), 0);
}

#[test]
fn test_low_byte_wraps() {
    assert_eq!(low_byte(300), 44);
    assert_eq!(low_byte(255), 255);
    assert_eq!(low_byte(256), 0);
    assert_eq!(low_byte(-1), 255);
    assert_eq!(low_byte(0x1_0000_0042_i64), 0x42);
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_write_packet_single_contiguous_write() {
    let mut buffer = Vec::new();
    let packet = Command::SetPipeNumber { pipe: 2, value: 9 }.to_packet();
    write_packet(&mut buffer, &packet).unwrap();
    assert_eq!(buffer, vec![0x02, 0x41, 0x02, 0x09]);
}

#[test]
fn test_read_frame_full() {
    let mut cursor = Cursor::new(vec![0x01, 0x50, 0x00, 0xAA]);
    let bytes = read_frame(&mut cursor, 3).unwrap();
    assert_eq!(bytes, vec![0x01, 0x50, 0x00]);
}

#[test]
fn test_read_frame_short_at_end_of_input() {
    let mut cursor = Cursor::new(vec![0x04, 0x47]);
    let bytes = read_frame(&mut cursor, 6).unwrap();
    assert_eq!(bytes, vec![0x04, 0x47]);
}

/// Hands out one byte per call, then times out
struct TrickleReader {
    data: Vec<u8>,
}

impl Read for TrickleReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "timeout"));
        }
        buf[0] = self.data.remove(0);
        Ok(1)
    }
}

#[test]
fn test_read_frame_reassembles_trickled_bytes() {
    let mut reader = TrickleReader { data: vec![0x01, 0x42, 0x00] };
    assert_eq!(read_frame(&mut reader, 3).unwrap(), vec![0x01, 0x42, 0x00]);
}

#[test]
fn test_read_frame_timeout_returns_partial() {
    let mut reader = TrickleReader { data: vec![0x01] };
    assert_eq!(read_frame(&mut reader, 3).unwrap(), vec![0x01]);

    let mut empty = TrickleReader { data: vec![] };
    assert!(read_frame(&mut empty, 3).unwrap().is_empty());
}

struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
    }
}

#[test]
fn test_read_frame_propagates_io_errors() {
    let result = read_frame(&mut BrokenReader, 3);
    assert!(matches!(result, Err(PipeError::Io(_))));
}
