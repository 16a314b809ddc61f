//! Core types for ISO/IEC 7816-4 APDU (Application Protocol Data Unit) exchanges
//!
//! This crate provides:
//!
//! - The class byte (CLA) codec, including the GlobalPlatform proprietary class
//! - Command serialization with short and extended length fields
//! - Response parsing and status word classification
//! - A transport abstraction and a thread-safe shared transport
//!
//! Status words reported by the card are data, not errors: classify them with
//! [`StatusWord::identify`] and opt into an error with
//! [`Status::into_error`](response::Status::into_error).
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

// Main modules
pub mod class;
pub mod command;
pub mod instruction;
pub mod response;
pub mod transport;

// Core error types
mod error;
pub use error::{Error, Result, ResultExt};

// Re-exports for common types
pub use class::{Class, ClassError, GlobalPlatformClass, InterindustryClass, SecureMessaging};
pub use command::{Command, CommandError};
pub use response::error::{ResponseError, StatusError};
pub use response::status::StatusWord;
pub use response::{Response, Status, utils};
pub use transport::{CardTransport, SharedTransport, TransportError};

/// Prelude module containing commonly used traits and types
pub mod prelude {
    pub use crate::{
        Bytes, BytesMut, CardTransport, Class, Command, Error, GlobalPlatformClass,
        InterindustryClass, Response, Result, ResultExt, SharedTransport, Status, StatusError,
        StatusWord,
    };
}
