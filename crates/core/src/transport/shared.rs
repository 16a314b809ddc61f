//! Thread-safe wrapper serializing access to a transport

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use tracing::instrument;

use super::{CardTransport, TransportError};
use crate::{Command, Response, Result};

/// Shares one transport between threads
///
/// Every command/response exchange holds an exclusive lock on the transport
/// for its whole duration, so exchanges from different threads never
/// interleave. The lock is released on every exit path, including panics in
/// the underlying transport.
#[derive(Debug)]
pub struct SharedTransport<T: CardTransport> {
    inner: Arc<Mutex<T>>,
}

impl<T: CardTransport> Clone for SharedTransport<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: CardTransport> SharedTransport<T> {
    /// Wrap a transport
    pub fn new(transport: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(transport)),
        }
    }

    /// Serialize a command, exchange it with the card and parse the response
    #[instrument(level = "trace", skip_all, fields(ins = command.instruction))]
    pub fn send(&self, command: &Command) -> Result<Response> {
        let mut transport = self.inner.lock();
        command.transmit(&mut *transport)
    }

    /// Exchange raw bytes with the card
    #[instrument(level = "trace", skip_all, fields(length = command.len()))]
    pub fn transmit_raw(&self, command: &[u8]) -> std::result::Result<Bytes, TransportError> {
        self.inner.lock().transmit_raw(command)
    }

    /// Run a closure with exclusive access to the transport
    pub fn with_transport<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Take the transport back if this is the last handle
    pub fn into_inner(self) -> Option<T> {
        Arc::into_inner(self.inner).map(Mutex::into_inner)
    }
}

impl<T: CardTransport> CardTransport for SharedTransport<T> {
    fn do_transmit_raw(&mut self, command: &[u8]) -> std::result::Result<Bytes, TransportError> {
        self.inner.lock().do_transmit_raw(command)
    }

    fn is_connected(&self) -> bool {
        self.inner.lock().is_connected()
    }

    fn reset(&mut self) -> std::result::Result<(), TransportError> {
        self.inner.lock().reset()
    }
}
