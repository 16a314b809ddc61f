//! Error types for BER-TLV encoding and decoding

use std::io;

use thiserror::Error;

/// Failure while decoding or encoding BER-TLV data
#[derive(Debug, Error)]
pub enum TlvError {
    /// Input ended before the tag was complete
    #[error("ran out of bytes before reaching the end of the tag")]
    TruncatedTag,

    /// Tag number does not fit in 64 bits
    #[error("tag numbers beyond 64 bits are not supported ({groups} base-128 groups)")]
    UnsupportedTagNumber {
        /// Number of base-128 groups in the encoded number
        groups: usize,
    },

    /// Input ended before the first length byte
    #[error("ran out of bytes before the length")]
    MissingLength,

    /// Length byte `80`, indefinite form
    #[error("indefinite TLV lengths are not supported")]
    IndefiniteLengthUnsupported,

    /// Long form length with more than 8 length bytes
    #[error(
        "TLV lengths requiring more than 8 bytes of length data are not supported, {0} bytes of length data were indicated"
    )]
    LengthTooLong(u8),

    /// Input ended inside the long form length bytes
    #[error("{expected} length bytes were required, only {read} could be read")]
    TruncatedLength {
        /// Length bytes announced by the first byte
        expected: usize,
        /// Length bytes available
        read: usize,
    },

    /// Input ended inside the value
    #[error("{expected} value bytes were required, only {read} could be read")]
    TruncatedValue {
        /// Length announced by the object
        expected: u64,
        /// Value bytes available
        read: u64,
    },

    /// Value longer than the reader is configured to accept
    #[error("value length {length} exceeds the configured maximum of {max}")]
    ValueTooLong {
        /// Length announced by the object
        length: u64,
        /// Configured maximum
        max: u64,
    },

    /// Underlying I/O failure
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A decoding failure together with the number of bytes consumed before it
#[derive(Debug, Error)]
#[error("error reading TLV after {consumed} bytes: {source}")]
pub struct ReadError {
    /// Bytes consumed from the input, including those of the failed step
    pub consumed: usize,
    /// What went wrong
    #[source]
    pub source: TlvError,
}

impl ReadError {
    /// Create a new read error
    pub const fn new(consumed: usize, source: TlvError) -> Self {
        Self { consumed, source }
    }

    /// Account for bytes consumed by earlier steps
    pub(crate) const fn after(mut self, earlier: usize) -> Self {
        self.consumed += earlier;
        self
    }
}

/// Part of an object being written
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ObjectPart {
    /// The tag bytes
    #[display("tag")]
    Tag,
    /// The length bytes
    #[display("length")]
    Length,
    /// The value bytes
    #[display("value")]
    Value,
}

/// An encoding failure together with the number of bytes already written
#[derive(Debug, Error)]
#[error("writing {part} bytes failed after {written} bytes: {source}")]
pub struct WriteError {
    /// Bytes written to the output before the failure
    pub written: usize,
    /// Part of the object that could not be written
    pub part: ObjectPart,
    /// Underlying I/O failure
    #[source]
    pub source: io::Error,
}
