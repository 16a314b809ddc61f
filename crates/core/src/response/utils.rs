//! Utility functions for APDU response handling

use tracing::debug;

use crate::response::error::ResponseError;
use crate::response::status::StatusWord;

/// Split raw response data into the trailing status word and the payload
///
/// # Errors
/// Returns [`ResponseError::TooShort`] if the data cannot hold a status word.
pub fn extract_status_and_payload(data: &[u8]) -> Result<(StatusWord, &[u8]), ResponseError> {
    match data {
        [payload @ .., sw1, sw2] => Ok((StatusWord::new(*sw1, *sw2), payload)),
        _ => {
            debug!("Response too short: {} bytes", data.len());
            Err(ResponseError::TooShort(data.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_status_and_payload() {
        // Payload and status
        let data = [0x01, 0x02, 0x03, 0x90, 0x00];
        let result = extract_status_and_payload(&data).unwrap();
        assert_eq!(result.0, StatusWord::new(0x90, 0x00));
        assert_eq!(result.1, &[0x01, 0x02, 0x03]);

        // Only status
        let data = [0x6A, 0x82];
        let result = extract_status_and_payload(&data).unwrap();
        assert_eq!(result.0, StatusWord::new(0x6A, 0x82));
        assert!(result.1.is_empty());

        // Insufficient data
        assert_eq!(
            extract_status_and_payload(&[0x90]),
            Err(ResponseError::TooShort(1))
        );
        assert_eq!(
            extract_status_and_payload(&[]),
            Err(ResponseError::TooShort(0))
        );
    }
}
