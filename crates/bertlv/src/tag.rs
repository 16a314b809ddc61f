//! BER-TLV tag field (ISO/IEC 8825-1 section 8.1.2)

use std::fmt;
use std::io::Read;

use tracing::trace;

use crate::error::{ReadError, TlvError};
use crate::io_util::read_byte;

/// b6 of the first tag byte: constructed encoding
const CONSTRUCTED_BIT: u8 = 0x20;
/// Low five bits of the first tag byte all set: number follows in further bytes
const MULTI_BYTE_MARKER: u8 = 0x1F;
/// b8 of a subsequent tag byte: more bytes follow
const CONTINUATION_BIT: u8 = 0x80;
/// Largest number encoded in the first tag byte
const MAX_SINGLE_BYTE_NUMBER: u64 = 30;
/// Base-128 groups that can hold a u64 (the leading one only 0 or 1), reading
/// stops once a tag runs past this
const MAX_NUMBER_GROUPS: usize = 10;

/// Class of a tag, bits b8 and b7 of the first byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum TagClass {
    /// Universal (00)
    #[default]
    Universal = 0,
    /// Application (01)
    Application = 1,
    /// Context-specific (10)
    #[display("Context-specific")]
    ContextSpecific = 2,
    /// Private (11)
    Private = 3,
}

impl TagClass {
    /// Class from the top two bits of a first tag byte
    pub const fn from_first_byte(byte: u8) -> Self {
        match byte >> 6 {
            0 => Self::Universal,
            1 => Self::Application,
            2 => Self::ContextSpecific,
            _ => Self::Private,
        }
    }
}

/// A BER-TLV tag: class, encoding and number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tag {
    /// Tag class
    pub class: TagClass,
    /// Constructed (true) or primitive (false) encoding
    pub constructed: bool,
    /// Tag number
    pub number: u64,
}

impl Tag {
    /// Create a new tag
    pub const fn new(class: TagClass, constructed: bool, number: u64) -> Self {
        Self {
            class,
            constructed,
            number,
        }
    }

    /// Create a primitive tag
    pub const fn primitive(class: TagClass, number: u64) -> Self {
        Self::new(class, false, number)
    }

    /// Create a constructed tag
    pub const fn constructed(class: TagClass, number: u64) -> Self {
        Self::new(class, true, number)
    }

    /// Number of base-128 groups needed after the first byte, 0 for the short form
    const fn number_groups(&self) -> usize {
        if self.number <= MAX_SINGLE_BYTE_NUMBER {
            return 0;
        }
        let bits = (u64::BITS - self.number.leading_zeros()) as usize;
        bits.div_ceil(7)
    }

    /// Length of the encoded tag
    pub const fn encoded_len(&self) -> usize {
        1 + self.number_groups()
    }

    /// Encode the tag
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut first = (self.class as u8) << 6;
        if self.constructed {
            first |= CONSTRUCTED_BIT;
        }

        let groups = self.number_groups();
        if groups == 0 {
            return vec![first | self.number as u8];
        }

        let mut out = Vec::with_capacity(1 + groups);
        out.push(first | MULTI_BYTE_MARKER);
        for group in (0..groups).rev() {
            let mut byte = ((self.number >> (7 * group)) & 0x7F) as u8;
            if group != 0 {
                byte |= CONTINUATION_BIT;
            }
            out.push(byte);
        }
        out
    }

    /// Decode a tag from the start of a slice, returning it with its encoded length
    pub fn from_bytes(mut data: &[u8]) -> Result<(Self, usize), ReadError> {
        Self::read_from(&mut data)
    }

    /// Decode a tag from a reader, returning it with the number of bytes consumed
    pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<(Self, usize), ReadError> {
        let first = match read_byte(reader) {
            Ok(Some(byte)) => byte,
            Ok(None) => return Err(ReadError::new(0, TlvError::TruncatedTag)),
            Err(e) => return Err(ReadError::new(0, e.into())),
        };
        let mut consumed = 1;

        let class = TagClass::from_first_byte(first);
        let constructed = first & CONSTRUCTED_BIT != 0;
        let low = first & MULTI_BYTE_MARKER;
        if low != MULTI_BYTE_MARKER {
            return Ok((Self::new(class, constructed, u64::from(low)), consumed));
        }

        let mut number = 0u64;
        let mut groups = 0;
        let mut leading = 0;
        loop {
            let byte = match read_byte(reader) {
                Ok(Some(byte)) => byte,
                Ok(None) => return Err(ReadError::new(consumed, TlvError::TruncatedTag)),
                Err(e) => return Err(ReadError::new(consumed, e.into())),
            };
            consumed += 1;

            let bits = byte & !CONTINUATION_BIT;
            if groups == 0 {
                leading = bits;
            }
            groups += 1;
            if groups > MAX_NUMBER_GROUPS {
                return Err(ReadError::new(
                    consumed,
                    TlvError::UnsupportedTagNumber { groups },
                ));
            }
            // High bits shifted out here only matter for rejected tags
            number = (number << 7) | u64::from(bits);

            if byte & CONTINUATION_BIT == 0 {
                break;
            }
        }

        if groups == MAX_NUMBER_GROUPS && leading > 1 {
            return Err(ReadError::new(
                consumed,
                TlvError::UnsupportedTagNumber { groups },
            ));
        }

        let tag = Self::new(class, constructed, number);
        trace!(%tag, consumed, "Decoded TLV tag");
        Ok((tag, consumed))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.class, self.number)?;
        if self.constructed {
            f.write_str(" (constructed)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_single_byte_tags() {
        assert_eq!(Tag::primitive(TagClass::Universal, 0).to_bytes(), hex!("00"));
        assert_eq!(Tag::primitive(TagClass::ContextSpecific, 30).to_bytes(), hex!("9E"));
        assert_eq!(Tag::constructed(TagClass::Application, 15).to_bytes(), hex!("6F"));
        assert_eq!(Tag::constructed(TagClass::Private, 1).to_bytes(), hex!("E1"));

        let (tag, consumed) = Tag::from_bytes(&hex!("6F 10")).unwrap();
        assert_eq!(tag, Tag::constructed(TagClass::Application, 15));
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_multi_byte_tags() {
        assert_eq!(Tag::primitive(TagClass::Universal, 31).to_bytes(), hex!("1F 1F"));
        assert_eq!(Tag::primitive(TagClass::ContextSpecific, 127).to_bytes(), hex!("9F 7F"));
        assert_eq!(Tag::primitive(TagClass::ContextSpecific, 128).to_bytes(), hex!("9F 81 00"));
        assert_eq!(Tag::constructed(TagClass::Application, 0x4F).to_bytes(), hex!("7F 4F"));

        let (tag, consumed) = Tag::from_bytes(&hex!("BF 0C 05")).unwrap();
        assert_eq!(tag, Tag::constructed(TagClass::ContextSpecific, 12));
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_round_trip() {
        let numbers = [0, 30, 31, 127, 128, 1_234_567_890, i64::MAX as u64, u64::MAX];
        let classes = [
            TagClass::Universal,
            TagClass::Application,
            TagClass::ContextSpecific,
            TagClass::Private,
        ];
        for number in numbers {
            for class in classes {
                for constructed in [false, true] {
                    let tag = Tag::new(class, constructed, number);
                    let bytes = tag.to_bytes();
                    assert_eq!(bytes.len(), tag.encoded_len());
                    assert_eq!(Tag::from_bytes(&bytes).unwrap(), (tag, bytes.len()), "{tag}");
                }
            }
        }
    }

    #[test]
    fn test_largest_tag_number() {
        let bytes = Tag::primitive(TagClass::Universal, u64::MAX).to_bytes();
        assert_eq!(bytes.len(), 11);
        assert_eq!(bytes[1], 0x81);
    }

    #[test]
    fn test_unsupported_tag_number() {
        // Ten groups with a leading group of 2 need 65 bits
        let mut data = vec![0x1F, 0x82];
        data.extend_from_slice(&[0xFF; 8]);
        data.push(0x7F);
        let err = Tag::from_bytes(&data).unwrap_err();
        assert!(matches!(
            err.source,
            TlvError::UnsupportedTagNumber { groups: 10 }
        ));
        assert_eq!(err.consumed, data.len());

        // Eleven groups are always rejected
        let mut data = vec![0x1F];
        data.extend_from_slice(&[0x80; 10]);
        data.push(0x01);
        let err = Tag::from_bytes(&data).unwrap_err();
        assert!(matches!(
            err.source,
            TlvError::UnsupportedTagNumber { groups: 11 }
        ));
        assert_eq!(err.consumed, 12);
    }

    #[test]
    fn test_endless_tag_stops_reading() {
        let data = [0xFF; 64];
        let mut reader = &data[..];
        let err = Tag::read_from(&mut reader).unwrap_err();
        assert!(matches!(
            err.source,
            TlvError::UnsupportedTagNumber { groups: 11 }
        ));
        assert_eq!(err.consumed, 12);
        assert_eq!(reader.len(), 64 - 12);
    }

    #[test]
    fn test_truncated_tag() {
        let err = Tag::from_bytes(&[]).unwrap_err();
        assert!(matches!(err.source, TlvError::TruncatedTag));
        assert_eq!(err.consumed, 0);

        let err = Tag::from_bytes(&hex!("9F 81")).unwrap_err();
        assert!(matches!(err.source, TlvError::TruncatedTag));
        assert_eq!(err.consumed, 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Tag::constructed(TagClass::ContextSpecific, 12).to_string(),
            "Context-specific 12 (constructed)"
        );
        assert_eq!(Tag::primitive(TagClass::Application, 79).to_string(), "Application 79");
    }
}
