//! A complete BER-TLV object

use bytes::Bytes;

use crate::length;
use crate::tag::Tag;

/// A tag, length and value triple
///
/// When decoded, `length` is the length read from the input and `value` holds
/// exactly that many bytes. When encoded, `length` is ignored and recomputed
/// from `value`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Object {
    /// Tag
    pub tag: Tag,
    /// Length as encoded
    pub length: u64,
    /// Value bytes
    pub value: Bytes,
}

impl Object {
    /// Create an object, deriving the length from the value
    pub fn new(tag: Tag, value: impl Into<Bytes>) -> Self {
        let value = value.into();
        Self {
            tag,
            length: value.len() as u64,
            value,
        }
    }

    /// Length of the encoded object
    pub fn encoded_len(&self) -> usize {
        let value_len = self.value.len();
        self.tag.encoded_len() + length::encoded_len(value_len as u64) + value_len
    }

    /// Encode the object
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.tag.to_bytes());
        out.extend_from_slice(&length::encode(self.value.len() as u64));
        out.extend_from_slice(&self.value);
        out
    }
}
