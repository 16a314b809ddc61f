//! Streaming BER-TLV object reader

use std::io::Read;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::error::{ReadError, TlvError};
use crate::length;
use crate::object::Object;
use crate::tag::Tag;

/// Configuration for [`TlvReader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReaderConfig {
    /// Largest value length accepted, unbounded when `None`
    pub max_value_length: Option<u64>,
}

impl ReaderConfig {
    /// Limit the value length the reader accepts
    pub const fn with_max_value_length(mut self, max: u64) -> Self {
        self.max_value_length = Some(max);
        self
    }
}

/// Reads BER-TLV objects one at a time from a byte stream
#[derive(Debug)]
pub struct TlvReader<R> {
    inner: R,
    config: ReaderConfig,
    position: usize,
    failed: bool,
}

impl<'a> TlvReader<&'a [u8]> {
    /// Create a reader over a byte slice
    pub const fn from_slice(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl<R: Read> TlvReader<R> {
    /// Create a reader with the default configuration
    pub const fn new(inner: R) -> Self {
        Self::with_config(inner, ReaderConfig {
            max_value_length: None,
        })
    }

    /// Create a reader with a custom configuration
    pub const fn with_config(inner: R, config: ReaderConfig) -> Self {
        Self {
            inner,
            config,
            position: 0,
            failed: false,
        }
    }

    /// Total bytes consumed from the input so far
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Give back the underlying reader
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read the next complete object
    ///
    /// On failure the error reports the bytes this call consumed.
    pub fn read(&mut self) -> Result<Object, ReadError> {
        match self.read_object() {
            Ok((object, consumed)) => {
                self.position += consumed;
                Ok(object)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Read a length and value whose tag was consumed separately
    pub fn read_without_tag(&mut self) -> Result<Bytes, ReadError> {
        match self.read_length_value() {
            Ok((_, value, consumed)) => {
                self.position += consumed;
                Ok(value)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn read_object(&mut self) -> Result<(Object, usize), ReadError> {
        let (tag, tag_len) = Tag::read_from(&mut self.inner)?;
        let (length, value, consumed) = self.read_length_value().map_err(|e| e.after(tag_len))?;
        Ok((Object { tag, length, value }, tag_len + consumed))
    }

    fn read_length_value(&mut self) -> Result<(u64, Bytes, usize), ReadError> {
        let (length, length_len) = length::read_from(&mut self.inner)?;

        if let Some(max) = self.config.max_value_length.filter(|max| length > *max) {
            return Err(ReadError::new(length_len, TlvError::ValueTooLong { length, max }));
        }

        let mut value = Vec::new();
        let read = (&mut self.inner)
            .take(length)
            .read_to_end(&mut value)
            .map_err(|e| ReadError::new(length_len + value.len(), e.into()))?;
        if (read as u64) < length {
            return Err(ReadError::new(
                length_len + read,
                TlvError::TruncatedValue {
                    expected: length,
                    read: read as u64,
                },
            ));
        }

        trace!(length, "Read TLV value");
        Ok((length, Bytes::from(value), length_len + read))
    }

    fn fail(&mut self, error: ReadError) -> ReadError {
        debug!(consumed = error.consumed, error = %error.source, "Failed to read TLV object");
        self.position += error.consumed;
        self.failed = true;
        error
    }
}

/// Iterates over the objects until the input ends cleanly or a read fails
impl<R: Read> Iterator for TlvReader<R> {
    type Item = Result<Object, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_object() {
            Ok((object, consumed)) => {
                self.position += consumed;
                Some(Ok(object))
            }
            Err(ReadError {
                consumed: 0,
                source: TlvError::TruncatedTag,
            }) => None,
            Err(e) => Some(Err(self.fail(e))),
        }
    }
}
