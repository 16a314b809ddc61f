//! Error types specific to APDU commands

use thiserror::Error;

/// Error for APDU command construction and serialization
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Command data does not fit in a single command
    #[error("Data too long: {0} bytes (max {1})")]
    DataTooLong(usize, usize),
}

impl CommandError {
    /// Create a data too long error
    pub const fn data_too_long(actual: usize, max: usize) -> Self {
        Self::DataTooLong(actual, max)
    }
}
