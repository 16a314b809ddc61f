//! Streaming BER-TLV object writer

use std::io::Write;

use tracing::{debug, trace};

use crate::error::{ObjectPart, WriteError};
use crate::io_util::write_counted;
use crate::length;
use crate::object::Object;

/// Writes BER-TLV objects one at a time to a byte stream
#[derive(Debug)]
pub struct TlvWriter<W> {
    inner: W,
}

impl<W: Write> TlvWriter<W> {
    /// Create a writer
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write one object and return the number of bytes written
    ///
    /// The length field is always recomputed from the value, `object.length`
    /// is ignored.
    pub fn write(&mut self, object: &Object) -> Result<usize, WriteError> {
        let mut written = 0;
        let length = object.value.len() as u64;

        let parts = [
            (ObjectPart::Tag, object.tag.to_bytes()),
            (ObjectPart::Length, length::encode(length)),
        ];
        for (part, bytes) in &parts {
            self.write_part(*part, bytes, &mut written)?;
        }
        self.write_part(ObjectPart::Value, &object.value, &mut written)?;

        trace!(tag = %object.tag, length, written, "Wrote TLV object");
        Ok(written)
    }

    fn write_part(
        &mut self,
        part: ObjectPart,
        bytes: &[u8],
        written: &mut usize,
    ) -> Result<(), WriteError> {
        write_counted(&mut self.inner, bytes, written).map_err(|source| {
            debug!(%part, written = *written, error = %source, "Failed to write TLV object");
            WriteError {
                written: *written,
                part,
                source,
            }
        })
    }
}
