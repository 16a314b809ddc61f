//! BER-TLV length field (ISO/IEC 8825-1 section 8.1.3)
//!
//! Only the definite form is supported, ISO/IEC 7816-4 does not use the
//! indefinite one.

use std::io::Read;

use tracing::trace;

use crate::error::{ReadError, TlvError};
use crate::io_util::{read_byte, read_full};

/// b8 of the first length byte: long form
const LONG_FORM_BIT: u8 = 0x80;
/// First byte of the indefinite form
const INDEFINITE_FORM: u8 = 0x80;
/// Most length bytes that fit a u64
const MAX_LENGTH_BYTES: u8 = 8;

/// Number of bytes in the encoding of `length`
pub const fn encoded_len(length: u64) -> usize {
    if length < LONG_FORM_BIT as u64 {
        1
    } else {
        1 + significant_bytes(length)
    }
}

const fn significant_bytes(length: u64) -> usize {
    (u64::BITS - length.leading_zeros()).div_ceil(8) as usize
}

/// Encode a length using the shortest definite form
pub fn encode(length: u64) -> Vec<u8> {
    if length < u64::from(LONG_FORM_BIT) {
        return vec![length as u8];
    }

    let count = significant_bytes(length);
    let mut out = Vec::with_capacity(1 + count);
    out.push(LONG_FORM_BIT | count as u8);
    out.extend_from_slice(&length.to_be_bytes()[8 - count..]);
    out
}

/// Decode a length from the start of a slice, returning it with its encoded length
pub fn decode(mut data: &[u8]) -> Result<(u64, usize), ReadError> {
    read_from(&mut data)
}

/// Decode a length from a reader, returning it with the number of bytes consumed
pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<(u64, usize), ReadError> {
    let first = match read_byte(reader) {
        Ok(Some(byte)) => byte,
        Ok(None) => return Err(ReadError::new(0, TlvError::MissingLength)),
        Err(e) => return Err(ReadError::new(0, e.into())),
    };

    if first == INDEFINITE_FORM {
        return Err(ReadError::new(1, TlvError::IndefiniteLengthUnsupported));
    }
    if first & LONG_FORM_BIT == 0 {
        return Ok((u64::from(first), 1));
    }

    let count = first & !LONG_FORM_BIT;
    if count > MAX_LENGTH_BYTES {
        return Err(ReadError::new(1, TlvError::LengthTooLong(count)));
    }

    let mut raw = [0u8; 8];
    let count = usize::from(count);
    let read = read_full(reader, &mut raw[8 - count..]).map_err(|e| ReadError::new(1, e.into()))?;
    if read < count {
        return Err(ReadError::new(
            1 + read,
            TlvError::TruncatedLength {
                expected: count,
                read,
            },
        ));
    }

    let length = u64::from_be_bytes(raw);
    trace!(length, consumed = 1 + count, "Decoded TLV length");
    Ok((length, 1 + count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_encode() {
        assert_eq!(encode(0), hex!("00"));
        assert_eq!(encode(127), hex!("7F"));
        assert_eq!(encode(128), hex!("81 80"));
        assert_eq!(encode(255), hex!("81 FF"));
        assert_eq!(encode(256), hex!("82 01 00"));
        assert_eq!(encode(1 << 32), hex!("85 01 00 00 00 00"));
        assert_eq!(encode(u64::MAX), hex!("88 FF FF FF FF FF FF FF FF"));
    }

    #[test]
    fn test_round_trip() {
        for length in [0, 127, 128, 255, 256, 1 << 32, i64::MAX as u64] {
            let bytes = encode(length);
            assert_eq!(bytes.len(), encoded_len(length));
            assert_eq!(decode(&bytes).unwrap(), (length, bytes.len()));
        }
    }

    #[test]
    fn test_non_minimal_long_form() {
        assert_eq!(decode(&hex!("82 00 05")).unwrap(), (5, 3));
        assert_eq!(decode(&hex!("81 05")).unwrap(), (5, 2));
    }

    #[test]
    fn test_indefinite_length() {
        let err = decode(&hex!("80")).unwrap_err();
        assert!(matches!(err.source, TlvError::IndefiniteLengthUnsupported));
        assert_eq!(err.consumed, 1);
    }

    #[test]
    fn test_length_too_long() {
        let err = decode(&hex!("89 01 02 03 04 05 06 07 08 09")).unwrap_err();
        assert!(matches!(err.source, TlvError::LengthTooLong(9)));
    }

    #[test]
    fn test_truncated_length() {
        let err = decode(&hex!("84 01 02")).unwrap_err();
        assert!(matches!(
            err.source,
            TlvError::TruncatedLength {
                expected: 4,
                read: 2
            }
        ));
        assert_eq!(err.consumed, 3);

        let err = decode(&[]).unwrap_err();
        assert!(matches!(err.source, TlvError::MissingLength));
        assert_eq!(err.consumed, 0);
    }
}
