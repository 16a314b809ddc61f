//! APDU command definitions
//!
//! This module provides the [`Command`] type and its wire serialization
//! according to ISO/IEC 7816-4 section 5.1, including the selection between
//! short and extended length fields.

pub mod error;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, info, trace, warn};

use crate::class::Class;
use crate::response::Response;
use crate::transport::CardTransport;
use crate::{Error, Result};
pub use error::CommandError;

/// Largest command data field that can be serialized
pub const MAX_DATA_LENGTH: usize = 65536;

/// Largest data or expected length that still fits a short length field
const SHORT_LENGTH_LIMIT: usize = 256;

/// Class byte emitted for a command without a class
///
/// This value is invalid on purpose, callers wanting to fail early must check
/// for a class before serializing.
pub const MISSING_CLASS_BYTE: u8 = 0xFF;

/// APDU command
///
/// `expected_response_length` of zero means "no particular length" unless
/// `expect_response_data` is set, in which case it means the maximum (65536).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Command {
    /// Class (CLA), serialized as `FF` when absent
    pub class: Option<Class>,
    /// Instruction (INS)
    pub instruction: u8,
    /// First parameter (P1)
    pub p1: u8,
    /// Second parameter (P2)
    pub p2: u8,
    /// Command data field, Lc is derived from its length
    pub data: Bytes,
    /// Response data is expected even when `expected_response_length` is 0
    pub expect_response_data: bool,
    /// Expected response length (Le)
    pub expected_response_length: u16,
}

impl Command {
    /// Create a new command with just the header
    pub fn new(class: impl Into<Class>, instruction: u8, p1: u8, p2: u8) -> Self {
        Self {
            class: Some(class.into()),
            instruction,
            p1,
            p2,
            ..Default::default()
        }
    }

    /// Set the data field
    pub fn with_data<T: Into<Bytes>>(mut self, data: T) -> Self {
        self.data = data.into();
        self
    }

    /// Set the expected response length
    pub const fn with_le(mut self, expected_response_length: u16) -> Self {
        self.expected_response_length = expected_response_length;
        self
    }

    /// Expect response data; with an expected length of 0 this asks for the maximum
    pub const fn expecting_response(mut self) -> Self {
        self.expect_response_data = true;
        self
    }

    /// The CLA byte that will be serialized
    pub const fn class_byte(&self) -> u8 {
        match &self.class {
            Some(class) => class.to_byte(),
            None => MISSING_CLASS_BYTE,
        }
    }

    /// Whether the command carries an Le field
    pub const fn expects_response(&self) -> bool {
        self.expect_response_data || self.expected_response_length > 0
    }

    /// Whether Lc and Le use the extended (multi-byte) form
    pub fn uses_extended_length(&self) -> bool {
        self.expected_response_length as usize > SHORT_LENGTH_LIMIT
            || (self.expect_response_data && self.expected_response_length == 0)
            || self.data.len() > SHORT_LENGTH_LIMIT
    }

    /// Length of the serialized command
    pub fn command_length(&self) -> usize {
        let mut length = 4;
        if self.data.is_empty() && !self.expects_response() {
            return length;
        }

        let extended = self.uses_extended_length();
        if !self.data.is_empty() {
            length += if extended { 3 } else { 1 } + self.data.len();
        }
        if self.expects_response() {
            length += match (extended, self.data.is_empty()) {
                (true, true) => 3,
                (true, false) => 2,
                (false, _) => 1,
            };
        }
        length
    }

    /// Serialize to raw APDU bytes
    ///
    /// # Panics
    /// Panics if the data field is longer than [`MAX_DATA_LENGTH`]. Use
    /// [`Command::try_to_bytes`] to check instead.
    pub fn to_bytes(&self) -> Bytes {
        match self.try_to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => panic!("cannot serialize APDU command: {e}"),
        }
    }

    /// Serialize to raw APDU bytes, rejecting oversized data
    pub fn try_to_bytes(&self) -> Result<Bytes, CommandError> {
        if self.data.len() > MAX_DATA_LENGTH {
            return Err(CommandError::data_too_long(self.data.len(), MAX_DATA_LENGTH));
        }

        let mut buffer = BytesMut::with_capacity(self.command_length());

        // Header: CLA, INS, P1, P2
        buffer.put_u8(self.class_byte());
        buffer.put_u8(self.instruction);
        buffer.put_u8(self.p1);
        buffer.put_u8(self.p2);

        if self.data.is_empty() && !self.expects_response() {
            return Ok(buffer.freeze());
        }

        let extended = self.uses_extended_length();

        // Lc and data
        if !self.data.is_empty() {
            if extended {
                // Exactly 65536 bytes truncates to 00 00 00
                buffer.put_u8(0x00);
                buffer.put_u16(self.data.len() as u16);
            } else {
                // 256 is sent as 00
                buffer.put_u8(self.data.len() as u8);
            }
            buffer.put_slice(&self.data);
        }

        // Le
        if self.expects_response() {
            if extended {
                if self.data.is_empty() {
                    buffer.put_u8(0x00);
                }
                buffer.put_u16(self.expected_response_length);
            } else {
                // Only 1..=256 reaches here, 256 is sent as 00
                buffer.put_u8(self.expected_response_length as u8);
            }
        }

        Ok(buffer.freeze())
    }

    /// Send this command on a transport and parse the response
    ///
    /// Fails with [`Error::NilTransport`] when no transport is given. A
    /// response carrying an error status is not an error here, classify it
    /// with [`Response::identify`].
    pub fn send(&self, transport: Option<&mut dyn CardTransport>) -> Result<Response> {
        match transport {
            Some(transport) => self.transmit(transport),
            None => Err(Error::NilTransport),
        }
    }

    /// Send this command on a transport and parse the response
    pub fn transmit<T: CardTransport + ?Sized>(&self, transport: &mut T) -> Result<Response> {
        let command = self.to_bytes();
        trace!(
            cla = format_args!("{:#04x}", command[0]),
            ins = format_args!("{:#04x}", self.instruction),
            length = command.len(),
            "Sending APDU command"
        );

        let raw = transport.transmit_raw(&command)?;
        let response = Response::from_bytes(&raw)?;

        let status = response.status();
        let level = status.tracing_level();
        if level == tracing::Level::DEBUG {
            debug!(status = %status, "{}", status.description());
        } else if level == tracing::Level::INFO {
            info!(status = %status, "{}", status.description());
        } else {
            warn!(status = %status, "{}", status.description());
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{GlobalPlatformClass, InterindustryClass};
    use crate::transport::{MockTransport, TransportError};
    use hex_literal::hex;

    fn base() -> Command {
        Command::new(Class::Raw(0x12), 0x34, 0x56, 0x78)
    }

    fn with_suffix(suffix: &[u8]) -> Vec<u8> {
        let mut expected = hex!("12345678").to_vec();
        expected.extend_from_slice(suffix);
        expected
    }

    #[test]
    fn test_header_only() {
        assert_eq!(base().to_bytes().as_ref(), hex!("12345678"));
        assert_eq!(base().command_length(), 4);
    }

    #[test]
    fn test_short_le() {
        assert_eq!(base().with_le(128).to_bytes().as_ref(), hex!("1234567880"));
        assert_eq!(base().with_le(256).to_bytes().as_ref(), hex!("1234567800"));
        assert_eq!(base().with_le(1).to_bytes().as_ref(), hex!("1234567801"));
    }

    #[test]
    fn test_extended_le_without_data() {
        let cmd = base().with_le(300);
        let bytes = cmd.to_bytes();
        assert!(bytes.ends_with(&hex!("012C")));
        assert_eq!(bytes.as_ref(), hex!("12345678 00012C"));
        assert_eq!(cmd.command_length(), bytes.len());

        // Zero with a response expected means the maximum
        let cmd = base().expecting_response();
        assert_eq!(cmd.to_bytes().as_ref(), hex!("12345678 000000"));
    }

    #[test]
    fn test_short_lc() {
        let cmd = base().with_data(hex!("102030").to_vec());
        assert_eq!(cmd.to_bytes().as_ref(), hex!("12345678 03 102030"));

        // 256 bytes still uses the short form, encoded as 00
        let cmd = base().with_data(vec![0u8; 256]);
        let mut expected = with_suffix(&[0x00]);
        expected.extend_from_slice(&[0u8; 256]);
        assert_eq!(cmd.to_bytes().as_ref(), expected.as_slice());
    }

    #[test]
    fn test_extended_lc() {
        let cmd = base().with_data(vec![0u8; 300]);
        let mut expected = with_suffix(&hex!("00012C"));
        expected.extend_from_slice(&[0u8; 300]);
        let bytes = cmd.to_bytes();
        assert_eq!(bytes.as_ref(), expected.as_slice());
        assert_eq!(cmd.command_length(), bytes.len());
    }

    #[test]
    fn test_short_lc_and_le() {
        let cmd = base().with_data(hex!("102030").to_vec()).with_le(128);
        assert_eq!(cmd.to_bytes().as_ref(), hex!("12345678 03 102030 80"));

        let cmd = base().with_data(hex!("102030").to_vec()).with_le(256);
        assert_eq!(cmd.to_bytes().as_ref(), hex!("12345678 03 102030 00"));

        let cmd = base().with_data(vec![0u8; 256]).with_le(0x57);
        let mut expected = with_suffix(&[0x00]);
        expected.extend_from_slice(&[0u8; 256]);
        expected.push(0x57);
        assert_eq!(cmd.to_bytes().as_ref(), expected.as_slice());
    }

    #[test]
    fn test_extended_lc_and_le() {
        // Large Le forces extended Lc as well, Le has no leading 00
        let cmd = base().with_data(vec![0u8; 12]).with_le(10000);
        let mut expected = with_suffix(&hex!("00000C"));
        expected.extend_from_slice(&[0u8; 12]);
        expected.extend_from_slice(&hex!("2710"));
        assert_eq!(cmd.to_bytes().as_ref(), expected.as_slice());

        // Large data forces extended Le
        let cmd = base().with_data(vec![0u8; 1000]).with_le(128);
        let bytes = cmd.to_bytes();
        assert_eq!(&bytes[4..7], hex!("0003E8"));
        assert!(bytes.ends_with(&hex!("0080")));
        assert_eq!(bytes.len(), 4 + 3 + 1000 + 2);
        assert_eq!(cmd.command_length(), bytes.len());
    }

    #[test]
    fn test_maximum_data_length_boundary() {
        // Known boundary: 65536 does not fit in two bytes and truncates to zero
        let cmd = base().with_data(vec![0u8; MAX_DATA_LENGTH]).expecting_response();
        let bytes = cmd.to_bytes();
        assert_eq!(&bytes[..7], hex!("12345678 000000"));
        assert!(bytes.ends_with(&hex!("0000")));
        assert_eq!(bytes.len(), 4 + 3 + MAX_DATA_LENGTH + 2);
    }

    #[test]
    fn test_data_too_long() {
        let cmd = base().with_data(vec![0u8; MAX_DATA_LENGTH + 1]);
        assert_eq!(
            cmd.try_to_bytes(),
            Err(CommandError::DataTooLong(MAX_DATA_LENGTH + 1, MAX_DATA_LENGTH))
        );
    }

    #[test]
    #[should_panic(expected = "Data too long")]
    fn test_data_too_long_panics() {
        let _ = base().with_data(vec![0u8; MAX_DATA_LENGTH + 1]).to_bytes();
    }

    #[test]
    fn test_missing_class_uses_sentinel() {
        let cmd = Command {
            instruction: 0xA4,
            ..Default::default()
        };
        assert_eq!(cmd.to_bytes().as_ref(), hex!("FFA40000"));
    }

    #[test]
    fn test_structured_classes() {
        let cmd = Command::new(InterindustryClass::new(5), 0xCA, 0x9F, 0x7F).with_le(256);
        assert_eq!(cmd.to_bytes().as_ref(), hex!("41CA9F7F00"));

        let cmd = Command::new(GlobalPlatformClass::PROPRIETARY, 0xF2, 0x80, 0x00);
        assert_eq!(cmd.to_bytes().as_ref(), hex!("80F28000"));
    }

    #[test]
    fn test_send_without_transport() {
        assert_eq!(base().send(None), Err(Error::NilTransport));
    }

    #[test]
    fn test_send_returns_error_status_as_response() {
        let mut transport = MockTransport::with_response(Bytes::from_static(&hex!("6A82")));
        let response = base().send(Some(&mut transport)).unwrap();
        assert_eq!(response.status_word(), 0x6A82);
        assert!(response.data().is_empty());
        assert_eq!(transport.commands, vec![Bytes::from_static(&hex!("12345678"))]);
    }

    #[test]
    fn test_send_propagates_transport_error() {
        let mut transport = MockTransport::new(Vec::new());
        transport.connected = false;
        assert_eq!(
            base().transmit(&mut transport),
            Err(Error::Transport(TransportError::Connection))
        );
    }
}
