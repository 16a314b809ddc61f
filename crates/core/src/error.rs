//! Core error type for all APDU operations
//!
//! Each concern has its own error enum (class, command, response, status,
//! transport). This module gathers them into one [`Error`] so callers can
//! bubble any of them up with `?`.

use crate::class::ClassError;
use crate::command::CommandError;
use crate::response::error::{ResponseError, StatusError};
use crate::transport::TransportError;

/// Core error type that encompasses all possible errors in the crate
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// No transport was given to send a command on
    #[error("Cannot send APDU command on nil transport")]
    NilTransport,

    /// Transport failure, passed through unchanged
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Malformed response
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Command could not be serialized
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Invalid class byte
    #[error(transparent)]
    Class(#[from] ClassError),

    /// Card reported a non-normal status, for callers that opt into it
    #[error(transparent)]
    Status(#[from] StatusError),

    /// Context error with message and source error
    #[error("{context}: {source}")]
    Context {
        /// Contextual message
        context: String,
        /// Source error
        source: Box<Self>,
    },

    /// Generic dynamic error with string message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Create a new error with context information
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create a new error with a dynamic message
    pub fn message<S: Into<String>>(message: S) -> Self {
        Self::Message(message.into())
    }

    /// Strip any context layers
    pub fn root(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for APDU operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Extension trait for Result with APDU Errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, context: S) -> Result<T, Error>;
}

impl<T, E: Into<Error>> ResultExt<T> for Result<T, E> {
    fn context<S: Into<String>>(self, context: S) -> Result<T, Error> {
        self.map_err(|e| e.into().with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_chain() {
        let result: Result<(), TransportError> = Err(TransportError::Timeout);
        let error = result.context("selecting applet").unwrap_err();
        assert_eq!(error.to_string(), "selecting applet: Operation timed out");
        assert_eq!(error.root(), &Error::Transport(TransportError::Timeout));
    }

    #[test]
    fn test_nil_transport_message() {
        assert_eq!(
            Error::NilTransport.to_string(),
            "Cannot send APDU command on nil transport"
        );
    }
}
