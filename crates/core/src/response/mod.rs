//! APDU response definitions
//!
//! This module provides the [`Response`] type, status words and their
//! classification according to ISO/IEC 7816-4.

pub mod classify;
pub mod error;
pub mod status;
pub mod utils;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

pub use classify::{
    CheckCondition, CheckErrorStatus, ExecErrorCondition, ExecErrorStatus, NormalCondition,
    NormalStatus, Status, StatusCategory, WarningCondition, WarningStatus,
};
use error::{ResponseError, StatusError};
use status::StatusWord;

/// APDU response: data field followed by the status word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Response data, empty when only a status word was received
    data: Bytes,
    /// Status word
    status: StatusWord,
}

impl Response {
    /// Create a new response with data and status
    pub fn new(data: impl Into<Bytes>, status: impl Into<StatusWord>) -> Self {
        Self {
            data: data.into(),
            status: status.into(),
        }
    }

    /// Create a success response
    pub fn success(data: impl Into<Bytes>) -> Self {
        Self::new(data, status::common::SUCCESS)
    }

    /// Create a response carrying only a status word
    pub fn status_only(status: impl Into<StatusWord>) -> Self {
        Self::new(Bytes::new(), status)
    }

    /// Parse response from raw bytes (including status word)
    pub fn from_bytes(data: &[u8]) -> Result<Self, ResponseError> {
        let (status, payload) = utils::extract_status_and_payload(data)?;

        trace!(
            sw1 = format_args!("{:#04x}", status.sw1),
            sw2 = format_args!("{:#04x}", status.sw2),
            payload_len = payload.len(),
            "Parsed APDU response"
        );

        Ok(Self {
            data: Bytes::copy_from_slice(payload),
            status,
        })
    }

    /// Response data
    pub const fn data(&self) -> &Bytes {
        &self.data
    }

    /// Status word
    pub const fn status(&self) -> StatusWord {
        self.status
    }

    /// Status word as a big-endian u16
    pub const fn status_word(&self) -> u16 {
        self.status.to_u16()
    }

    /// Classify the status word
    pub const fn identify(&self) -> Status {
        self.status.identify()
    }

    /// Check if the response status is 90 00
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Take the data if the card reported normal processing
    pub fn into_result(self) -> Result<Bytes, StatusError> {
        self.identify().into_error().map_or(Ok(self.data), Err)
    }
}

impl TryFrom<&[u8]> for Response {
    type Error = ResponseError;

    fn try_from(data: &[u8]) -> Result<Self, ResponseError> {
        Self::from_bytes(data)
    }
}

impl TryFrom<Bytes> for Response {
    type Error = ResponseError;

    fn try_from(data: Bytes) -> Result<Self, ResponseError> {
        Self::from_bytes(&data)
    }
}

impl From<Response> for Bytes {
    fn from(response: Response) -> Self {
        let mut buf = BytesMut::with_capacity(response.data.len() + 2);
        buf.put_slice(&response.data);
        buf.put_u8(response.status.sw1);
        buf.put_u8(response.status.sw2);
        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_creation() {
        let resp = Response::new(Bytes::from_static(&[0x01, 0x02, 0x03]), (0x90, 0x00));
        assert_eq!(resp.data().as_ref(), &[0x01, 0x02, 0x03]);
        assert_eq!(resp.status(), StatusWord::new(0x90, 0x00));
        assert!(resp.is_success());
    }

    #[test]
    fn test_response_from_bytes() {
        let resp = Response::from_bytes(&[0x01, 0x02, 0x03, 0x90, 0x00]).unwrap();
        assert_eq!(resp.data().as_ref(), &[0x01, 0x02, 0x03]);
        assert_eq!(resp.status_word(), 0x9000);
        assert!(resp.is_success());

        let resp = Response::from_bytes(&[0x90, 0x00]).unwrap();
        assert!(resp.data().is_empty());
        assert_eq!(resp.status_word(), 0x9000);

        assert_eq!(Response::from_bytes(&[]), Err(ResponseError::TooShort(0)));
        assert_eq!(Response::from_bytes(&[0x90]), Err(ResponseError::TooShort(1)));
    }

    #[test]
    fn test_response_round_trip_bytes() {
        let raw = Bytes::from_static(&[0xAA, 0xBB, 0x61, 0x10]);
        let resp = Response::try_from(raw.clone()).unwrap();
        assert_eq!(resp.status().remaining_bytes(), Some(0x10));
        assert_eq!(Bytes::from(resp), raw);
    }

    #[test]
    fn test_response_into_result() {
        let success = Response::success(Bytes::from_static(&[0x01, 0x02, 0x03]));
        assert_eq!(
            success.into_result(),
            Ok(Bytes::from_static(&[0x01, 0x02, 0x03]))
        );

        // More data available is still normal processing
        let more = Response::status_only((0x61, 0x20));
        assert_eq!(more.into_result(), Ok(Bytes::new()));

        let error = Response::status_only((0x6A, 0x82));
        let result = error.into_result();
        assert!(matches!(result, Err(StatusError::Checking(_))));
        assert!(result.unwrap_err().has_status(0x6A82));
    }
}
