//! Privileges of an application or security domain
//!
//! Encoded as three bytes in INSTALL data and GET STATUS responses. Some
//! privileges imply others; both [`Privileges::from_bytes`] and
//! [`Privileges::to_bytes`] apply those implications.

use bitflags::bitflags;

use crate::{Error, Result};

bitflags! {
    /// GlobalPlatform privileges, byte 1 in the top bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Privileges: u32 {
        /// Security Domain
        const SECURITY_DOMAIN = 0x80_0000;
        /// DAP Verification
        const DAP_VERIFICATION = 0x40_0000;
        /// Delegated Management
        const DELEGATED_MANAGEMENT = 0x20_0000;
        /// Card Lock
        const CARD_LOCK = 0x10_0000;
        /// Card Terminate
        const CARD_TERMINATE = 0x08_0000;
        /// Card Reset
        const CARD_RESET = 0x04_0000;
        /// CVM Management
        const CVM_MANAGEMENT = 0x02_0000;
        /// Mandated DAP Verification
        const MANDATED_DAP_VERIFICATION = 0x01_0000;

        /// Trusted Path
        const TRUSTED_PATH = 0x00_8000;
        /// Authorized Management
        const AUTHORIZED_MANAGEMENT = 0x00_4000;
        /// Token Management
        const TOKEN_MANAGEMENT = 0x00_2000;
        /// Global Delete
        const GLOBAL_DELETE = 0x00_1000;
        /// Global Lock
        const GLOBAL_LOCK = 0x00_0800;
        /// Global Registry
        const GLOBAL_REGISTRY = 0x00_0400;
        /// Final Application
        const FINAL_APPLICATION = 0x00_0200;
        /// Global Service
        const GLOBAL_SERVICE = 0x00_0100;

        /// Receipt Generation
        const RECEIPT_GENERATION = 0x00_0080;
        /// Ciphered Load File Data Block
        const CIPHERED_LOAD_FILE_DATA_BLOCK = 0x00_0040;
        /// Contactless Activation
        const CONTACTLESS_ACTIVATION = 0x00_0020;
        /// Contactless Self-Activation
        const CONTACTLESS_SELF_ACTIVATION = 0x00_0010;

        // Reserved bits of byte 3 survive a decode/encode cycle
        const _ = 0x00_000F;
    }
}

impl Privileges {
    /// Decode the three byte form
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        let bits = u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]);
        Self::from_bits_retain(bits).with_implied()
    }

    /// Decode either the one byte (byte 1 only) or the three byte form
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        match *bytes {
            [first] => Ok(Self::from_bytes([first, 0, 0])),
            [first, second, third] => Ok(Self::from_bytes([first, second, third])),
            _ => Err(Error::InvalidPrivileges(bytes.len())),
        }
    }

    /// Encode to the three byte form
    pub const fn to_bytes(self) -> [u8; 3] {
        let [_, first, second, third] = self.with_implied().bits().to_be_bytes();
        [first, second, third]
    }

    /// Add the privileges implied by the ones already set
    pub const fn with_implied(self) -> Self {
        let mut bits = self.bits();
        if bits & Self::MANDATED_DAP_VERIFICATION.bits() != 0 {
            bits |= Self::DAP_VERIFICATION.bits();
        }
        let implies_sd = Self::DAP_VERIFICATION.bits()
            | Self::DELEGATED_MANAGEMENT.bits()
            | Self::MANDATED_DAP_VERIFICATION.bits()
            | Self::AUTHORIZED_MANAGEMENT.bits();
        if bits & implies_sd != 0 {
            bits |= Self::SECURITY_DOMAIN.bits();
        }
        Self::from_bits_retain(bits)
    }
}
