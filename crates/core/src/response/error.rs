//! Error types specific to APDU responses

use thiserror::Error;

use super::classify::{CheckErrorStatus, ExecErrorStatus, WarningStatus};
use super::status::StatusWord;

/// Error for APDU response parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// Fewer than the two status bytes were received
    #[error("Response too short: {0} bytes, at least 2 required")]
    TooShort(usize),
}

/// A status word reported by the card, turned into an error
///
/// Produced by [`Status::into_error`](super::Status::into_error); normal
/// processing never converts to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatusError {
    /// Warning processing (62 XX, 63 XX)
    #[error("APDU warning: {} ({})", .0.condition, .0.raw)]
    Warning(WarningStatus),

    /// Execution error (64 XX to 66 XX)
    #[error("APDU execution error: {} ({})", .0.condition, .0.raw)]
    Execution(ExecErrorStatus),

    /// Checking error (67 XX to 6F XX)
    #[error("APDU checking error: {} ({})", .0.condition, .0.raw)]
    Checking(CheckErrorStatus),

    /// Proprietary or invalid status word
    #[error("Unknown APDU Error: {:04X}", .0.to_u16())]
    General(StatusWord),
}

impl StatusError {
    /// Get the status word
    pub const fn status_word(&self) -> StatusWord {
        match self {
            Self::Warning(s) => s.raw,
            Self::Execution(s) => s.raw,
            Self::Checking(s) => s.raw,
            Self::General(raw) => *raw,
        }
    }

    /// Check if this error has the given status word
    pub const fn has_status(&self, sw: u16) -> bool {
        self.status_word().to_u16() == sw
    }
}
