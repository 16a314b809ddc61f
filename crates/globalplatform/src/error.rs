//! Error type for GlobalPlatform operations
//!
//! Wraps the APDU layer and BER-TLV errors with the failures specific to
//! GlobalPlatform commands and registry data.

use apdu_bertlv::ReadError;
use thiserror::Error;

/// Result type for GlobalPlatform operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for GlobalPlatform operations
#[derive(Debug, Error)]
pub enum Error {
    /// Command data exceeds what one GlobalPlatform command may carry
    #[error("too much data, one GP APDU command may only contain {max} bytes, got {length}")]
    DataTooLong {
        /// Data length of the rejected command
        length: usize,
        /// Largest accepted data length
        max: usize,
    },

    /// Errors from the APDU layer (transport, response, status)
    #[error(transparent)]
    Apdu(#[from] apdu_core::Error),

    /// Malformed BER-TLV in a card response
    #[error(transparent)]
    Tlv(#[from] ReadError),

    /// Privileges field of the wrong size
    #[error("Invalid privileges length: {0}, expected 1 or 3 bytes")]
    InvalidPrivileges(usize),

    /// A required data object is missing from a response
    #[error("Missing data object: {0}")]
    MissingObject(apdu_bertlv::Tag),
}

impl From<apdu_core::TransportError> for Error {
    fn from(error: apdu_core::TransportError) -> Self {
        Self::Apdu(error.into())
    }
}

impl From<apdu_core::StatusError> for Error {
    fn from(error: apdu_core::StatusError) -> Self {
        Self::Apdu(error.into())
    }
}
