//! Scripted in-memory transport
//!
//! Plays the part of the Master: every frame written releases the next
//! queued reply into the input buffer. Reading an empty input buffer
//! reports a timeout, the same way a silent serial port does.

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use super::Transport;

#[derive(Debug, Default)]
struct ScriptState {
    /// Bytes waiting to be read
    input: VecDeque<u8>,

    /// Replies released one per write
    replies: VecDeque<Vec<u8>>,

    /// Answer unscripted writes with `[1, opcode, 0]`
    auto_ack: bool,

    /// Every write, in order
    writes: Vec<Vec<u8>>,

    /// Reads that returned data
    reads: usize,

    /// Reads that hit an empty buffer
    timeouts: usize,

    /// Calls to `clear_input`
    flushes: usize,

    closed: bool,
}

/// In-memory transport driven by a reply script
pub struct ScriptedTransport {
    state: Arc<Mutex<ScriptState>>,
}

/// Observer for a [`ScriptedTransport`] after it has been handed off
#[derive(Clone)]
pub struct ScriptHandle {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedTransport {
    /// Create a transport with an empty script
    pub fn new() -> (Self, ScriptHandle) {
        let state = Arc::new(Mutex::new(ScriptState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            ScriptHandle { state },
        )
    }

    /// Queue a reply for the next unanswered write
    pub fn with_reply(self, reply: impl Into<Vec<u8>>) -> Self {
        self.state.lock().replies.push_back(reply.into());
        self
    }

    /// Queue a handshake reply for firmware `major.minor`
    pub fn with_handshake(self, major: u8, minor: u8) -> Self {
        self.with_reply(vec![0x02, 0x48, minor, major])
    }

    /// Put bytes in the input buffer before anything is written
    pub fn with_stale_input(self, bytes: &[u8]) -> Self {
        self.state.lock().input.extend(bytes.iter().copied());
        self
    }

    /// Acknowledge writes that have no scripted reply
    pub fn auto_ack(self) -> Self {
        self.state.lock().auto_ack = true;
        self
    }
}

impl Read for ScriptedTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.state.lock();
        if state.input.is_empty() {
            state.timeouts += 1;
            return Err(io::Error::new(io::ErrorKind::TimedOut, "read timed out"));
        }

        let n = buf.len().min(state.input.len());
        for (slot, byte) in buf.iter_mut().zip(state.input.drain(..n)) {
            *slot = byte;
        }
        state.reads += 1;
        Ok(n)
    }
}

impl Write for ScriptedTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock();
        state.writes.push(buf.to_vec());

        if let Some(reply) = state.replies.pop_front() {
            state.input.extend(reply);
        } else if state.auto_ack && buf.len() >= 2 {
            let opcode = buf[1];
            state.input.extend([0x01, opcode, 0x00]);
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for ScriptedTransport {
    fn clear_input(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.input.clear();
        state.flushes += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

impl Drop for ScriptedTransport {
    fn drop(&mut self) {
        self.state.lock().closed = true;
    }
}

impl ScriptHandle {
    /// Queue another reply
    pub fn push_reply(&self, reply: impl Into<Vec<u8>>) {
        self.state.lock().replies.push_back(reply.into());
    }

    /// Every write so far
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state.lock().writes.clone()
    }

    /// The most recent write
    pub fn last_write(&self) -> Option<Vec<u8>> {
        self.state.lock().writes.last().cloned()
    }

    pub fn write_count(&self) -> usize {
        self.state.lock().writes.len()
    }

    /// Reads that returned data
    pub fn read_count(&self) -> usize {
        self.state.lock().reads
    }

    /// Reads that found nothing to return
    pub fn timeout_count(&self) -> usize {
        self.state.lock().timeouts
    }

    pub fn flush_count(&self) -> usize {
        self.state.lock().flushes
    }

    /// Bytes still waiting to be read
    pub fn pending_input(&self) -> usize {
        self.state.lock().input.len()
    }

    /// True once the transport has been dropped
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}
