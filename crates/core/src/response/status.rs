//! Status word definitions for APDU responses

use std::fmt;

use tracing::Level;

use super::classify::{Status, StatusCategory};

/// Status Word (SW1-SW2) from an APDU response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusWord {
    /// First status byte (SW1)
    pub sw1: u8,
    /// Second status byte (SW2)
    pub sw2: u8,
}

impl StatusWord {
    /// Create a new status word
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// Create from a u16 value (SW1 | SW2)
    pub const fn from_u16(status: u16) -> Self {
        Self {
            sw1: (status >> 8) as u8,
            sw2: status as u8,
        }
    }

    /// Convert to a u16 value (SW1 | SW2)
    pub const fn to_u16(&self) -> u16 {
        ((self.sw1 as u16) << 8) | (self.sw2 as u16)
    }

    /// Check if this status word indicates success (90 00)
    pub const fn is_success(&self) -> bool {
        self.sw1 == 0x90 && self.sw2 == 0x00
    }

    /// Check if this status word indicates more data is available (61 XX)
    pub const fn is_more_data_available(&self) -> bool {
        self.sw1 == 0x61
    }

    /// Get the number of remaining bytes when SW1 = 61
    pub const fn remaining_bytes(&self) -> Option<u8> {
        if self.sw1 == 0x61 {
            Some(self.sw2)
        } else {
            None
        }
    }

    /// Get the appropriate tracing level for this status word
    pub const fn tracing_level(&self) -> Level {
        match self.identify().category() {
            StatusCategory::Normal => Level::DEBUG,
            StatusCategory::Warning => Level::INFO,
            _ => Level::WARN,
        }
    }

    /// Get a description of this status word
    pub const fn description(&self) -> &'static str {
        self.identify().description()
    }

    /// Classify this status word
    pub const fn identify(self) -> Status {
        Status::identify(self)
    }
}

impl From<(u8, u8)> for StatusWord {
    fn from(tuple: (u8, u8)) -> Self {
        Self::new(tuple.0, tuple.1)
    }
}

impl From<[u8; 2]> for StatusWord {
    fn from(bytes: [u8; 2]) -> Self {
        Self::new(bytes[0], bytes[1])
    }
}

impl From<u16> for StatusWord {
    fn from(status: u16) -> Self {
        Self::from_u16(status)
    }
}

impl From<StatusWord> for u16 {
    fn from(status: StatusWord) -> Self {
        status.to_u16()
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X} {:02X}", self.sw1, self.sw2)
    }
}

/// Common status words
pub mod common {
    use super::StatusWord;

    /// Success (90 00)
    pub const SUCCESS: StatusWord = StatusWord::new(0x90, 0x00);

    /// More data available (61 XX) - XX is the number of remaining bytes
    pub const MORE_DATA: StatusWord = StatusWord::new(0x61, 0x00);

    /// Warning, non-volatile memory unchanged (62 00)
    pub const WARNING: StatusWord = StatusWord::new(0x62, 0x00);

    /// Execution error, non-volatile memory unchanged (64 00)
    pub const EXECUTION_ERROR: StatusWord = StatusWord::new(0x64, 0x00);

    /// Wrong length (67 00)
    pub const WRONG_LENGTH: StatusWord = StatusWord::new(0x67, 0x00);

    /// Logical channel not supported (68 81)
    pub const LOGICAL_CHANNEL_NOT_SUPPORTED: StatusWord = StatusWord::new(0x68, 0x81);

    /// Security condition not satisfied (69 82)
    pub const SECURITY_CONDITION_NOT_SATISFIED: StatusWord = StatusWord::new(0x69, 0x82);

    /// Conditions of use not satisfied (69 85)
    pub const CONDITIONS_OF_USE_NOT_SATISFIED: StatusWord = StatusWord::new(0x69, 0x85);

    /// Function not supported (6A 81)
    pub const FUNCTION_NOT_SUPPORTED: StatusWord = StatusWord::new(0x6A, 0x81);

    /// File or application not found (6A 82)
    pub const FILE_NOT_FOUND: StatusWord = StatusWord::new(0x6A, 0x82);

    /// Record not found (6A 83)
    pub const RECORD_NOT_FOUND: StatusWord = StatusWord::new(0x6A, 0x83);

    /// Incorrect parameters P1-P2 (6A 86)
    pub const INCORRECT_P1P2: StatusWord = StatusWord::new(0x6A, 0x86);

    /// Referenced data not found (6A 88)
    pub const REFERENCED_DATA_NOT_FOUND: StatusWord = StatusWord::new(0x6A, 0x88);

    /// Invalid instruction (6D 00)
    pub const INVALID_INSTRUCTION: StatusWord = StatusWord::new(0x6D, 0x00);

    /// Class not supported (6E 00)
    pub const CLASS_NOT_SUPPORTED: StatusWord = StatusWord::new(0x6E, 0x00);

    /// No precise diagnosis (6F 00)
    pub const NO_PRECISE_DIAGNOSIS: StatusWord = StatusWord::new(0x6F, 0x00);
}
