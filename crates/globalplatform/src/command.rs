//! GlobalPlatform command subset
//!
//! A [`GpCommand`] carries at most 255 bytes of data and always asks for a
//! full 256 byte response when it expects one. It converts to an ISO 7816
//! [`Command`] for transmission.

use apdu_bertlv::Object;
use apdu_core::{CardTransport, Command, GlobalPlatformClass, Response};
use bytes::Bytes;
use tracing::debug;

use crate::constants::{delete_p2, get_status_p2, ins, select_p1, tags};
use crate::{Error, Result};

/// Largest data field of a GlobalPlatform command
pub const MAX_DATA_LENGTH: usize = 255;

/// Le requested by GlobalPlatform commands expecting response data
pub const EXPECTED_RESPONSE_LENGTH: u16 = 256;

/// A GlobalPlatform command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpCommand {
    /// Class byte
    pub class: GlobalPlatformClass,
    /// Instruction byte
    pub instruction: u8,
    /// First parameter
    pub p1: u8,
    /// Second parameter
    pub p2: u8,
    /// Command data
    pub data: Bytes,
    /// Whether the card is expected to return data
    pub expect_response_data: bool,
}

impl GpCommand {
    /// Create a new command without data
    pub const fn new(class: GlobalPlatformClass, instruction: u8, p1: u8, p2: u8) -> Self {
        Self {
            class,
            instruction,
            p1,
            p2,
            data: Bytes::new(),
            expect_response_data: false,
        }
    }

    /// Create a GlobalPlatform proprietary command on the basic channel
    pub const fn proprietary(instruction: u8, p1: u8, p2: u8) -> Self {
        Self::new(GlobalPlatformClass::PROPRIETARY, instruction, p1, p2)
    }

    /// Create an interindustry command on the basic channel
    pub const fn interindustry(instruction: u8, p1: u8, p2: u8) -> Self {
        Self::new(GlobalPlatformClass::INTERINDUSTRY, instruction, p1, p2)
    }

    /// Set the command data
    pub fn with_data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = data.into();
        self
    }

    /// Mark the command as expecting response data
    pub const fn expecting_response(mut self) -> Self {
        self.expect_response_data = true;
        self
    }

    /// SELECT an application by AID
    pub fn select(aid: impl AsRef<[u8]>) -> Self {
        Self::interindustry(ins::SELECT, select_p1::BY_NAME, 0x00)
            .with_data(Bytes::copy_from_slice(aid.as_ref()))
            .expecting_response()
    }

    /// GET STATUS for the registry entries selected by `p1`, filtered by AID
    ///
    /// An empty AID matches every entry.
    pub fn get_status(p1: u8, aid: impl AsRef<[u8]>) -> Self {
        let filter = Object::new(tags::AID, Bytes::copy_from_slice(aid.as_ref()));
        Self::proprietary(ins::GET_STATUS, p1, get_status_p2::TLV_DATA)
            .with_data(filter.to_bytes())
            .expecting_response()
    }

    /// DELETE an application or load file, optionally with its related objects
    pub fn delete(aid: impl AsRef<[u8]>, related: bool) -> Self {
        let p2 = if related {
            delete_p2::OBJECT_AND_RELATED
        } else {
            delete_p2::OBJECT
        };
        let object = Object::new(tags::AID, Bytes::copy_from_slice(aid.as_ref()));
        Self::proprietary(ins::DELETE, 0x00, p2)
            .with_data(object.to_bytes())
            .expecting_response()
    }

    /// Convert to an ISO 7816 command
    pub fn to_apdu(&self) -> Result<Command> {
        if self.data.len() > MAX_DATA_LENGTH {
            return Err(Error::DataTooLong {
                length: self.data.len(),
                max: MAX_DATA_LENGTH,
            });
        }

        let mut command = Command::new(self.class, self.instruction, self.p1, self.p2)
            .with_data(self.data.clone());
        if self.expect_response_data {
            command = command
                .with_le(EXPECTED_RESPONSE_LENGTH)
                .expecting_response();
        }
        Ok(command)
    }
}

/// Convert a command and send it on a transport
///
/// A response carrying an error status is returned as is.
pub fn send_on_transport(
    transport: Option<&mut dyn CardTransport>,
    command: &GpCommand,
) -> Result<Response> {
    let apdu = command.to_apdu()?;
    debug!(
        ins = format_args!("{:#04x}", command.instruction),
        "Sending GlobalPlatform command"
    );
    Ok(apdu.send(transport)?)
}
