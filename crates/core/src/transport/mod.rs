//! Transport traits for APDU communication with cards
//!
//! A transport moves raw APDU bytes to a card and back. It has no knowledge
//! of command structure or status words.

pub mod error;
mod shared;

use std::fmt;

use bytes::Bytes;
pub use error::TransportError;
pub use shared::SharedTransport;
use tracing::{debug, trace};

/// Trait for basic card transports
pub trait CardTransport: Send + fmt::Debug {
    /// Send raw APDU bytes to card and return response bytes
    ///
    /// The response includes the trailing status word. Card reported status
    /// words must be returned as data, not as errors.
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        trace!(command = ?hex::encode(command), "Transmitting raw command");
        let result = self.do_transmit_raw(command);
        match &result {
            Ok(response) => {
                trace!(response = ?hex::encode(response), "Received raw response");
            }
            Err(e) => {
                debug!(error = ?e, "Transport error during transmission");
            }
        }
        result
    }

    /// Internal implementation of transmit_raw
    /// This is the method that concrete implementations should override
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError>;

    /// Check if the transport is connected to a physical card
    fn is_connected(&self) -> bool {
        true
    }

    /// Reset the transport connection
    fn reset(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

impl<T: CardTransport + ?Sized> CardTransport for Box<T> {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        (**self).do_transmit_raw(command)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        (**self).reset()
    }
}

#[cfg(test)]
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub struct MockTransport {
    /// Mock responses to return
    pub responses: Vec<Bytes>,
    /// Commands that were sent
    pub commands: Vec<Bytes>,
    /// Whether the transport is connected
    pub connected: bool,
}

#[cfg(test)]
impl MockTransport {
    /// Create a new mock transport with the given responses
    pub const fn new(responses: Vec<Bytes>) -> Self {
        Self {
            responses,
            commands: Vec::new(),
            connected: true,
        }
    }

    /// Create a new mock transport that always returns the given response
    pub fn with_response(response: Bytes) -> Self {
        Self::new(vec![response])
    }
}

#[cfg(test)]
impl CardTransport for MockTransport {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        if !self.connected {
            return Err(TransportError::Connection);
        }

        self.commands.push(Bytes::copy_from_slice(command));

        if self.responses.is_empty() {
            return Err(TransportError::Transmission);
        }

        // Either clone the single response or take the next one
        if self.responses.len() == 1 {
            Ok(self.responses[0].clone())
        } else {
            Ok(self.responses.remove(0))
        }
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        self.connected = true;
        self.commands.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_transport_replays_responses() {
        let mut transport = MockTransport::new(vec![
            Bytes::from_static(&[0x61, 0x02]),
            Bytes::from_static(&[0xAA, 0xBB, 0x90, 0x00]),
        ]);

        let first = transport.transmit_raw(&[0x00, 0xA4, 0x04, 0x00]).unwrap();
        assert_eq!(first.as_ref(), &[0x61, 0x02]);
        let second = transport.transmit_raw(&[0x00, 0xC0, 0x00, 0x00, 0x02]).unwrap();
        assert_eq!(second.as_ref(), &[0xAA, 0xBB, 0x90, 0x00]);
        assert_eq!(transport.commands.len(), 2);

        transport.reset().unwrap();
        assert!(transport.commands.is_empty());
    }

    #[test]
    fn test_boxed_transport() {
        let mut transport: Box<dyn CardTransport> =
            Box::new(MockTransport::with_response(Bytes::from_static(&[0x90, 0x00])));
        assert!(transport.is_connected());
        assert_eq!(
            transport.transmit_raw(&[0x00, 0x00, 0x00, 0x00]).unwrap().as_ref(),
            &[0x90, 0x00]
        );
    }
}
