//! Shared client handle
//!
//! The protocol has no request IDs, so two threads interleaving writes on
//! one link would corrupt the framing. `SharedPipe` puts a mutex around
//! each exchange.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::client::{FirmwareVersion, Pipe};
use crate::transport::Transport;

/// Cloneable, lock-guarded handle to one [`Pipe`]
pub struct SharedPipe<T: Transport> {
    inner: Arc<Mutex<Pipe<T>>>,
}

impl<T: Transport> SharedPipe<T> {
    /// Wrap a connected client
    pub fn new(pipe: Pipe<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pipe)),
        }
    }

    /// Run `f` with exclusive access to the client
    ///
    /// Group related calls (e.g. set then show) in one closure so no other
    /// thread can slip a command in between.
    pub fn with<R>(&self, f: impl FnOnce(&mut Pipe<T>) -> R) -> R {
        let mut pipe = self.inner.lock();
        f(&mut *pipe)
    }

    pub fn firmware_version(&self) -> FirmwareVersion {
        self.inner.lock().firmware_version()
    }

    /// Close the link for every holder of this handle
    pub fn close(&self) {
        self.inner.lock().close();
    }
}

impl<T: Transport> Clone for SharedPipe<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
