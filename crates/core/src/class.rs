//! Class byte (CLA) encoding and decoding
//!
//! The class byte carries the logical channel number, the command chaining
//! flag and the secure messaging indication as laid out in ISO/IEC 7816-4
//! section 5.4.1. GlobalPlatform reuses the interindustry layout and flags its
//! own commands with bit 8.
//!
//! Bits are numbered from b1 (least significant) to b8 (most significant).

use derive_more::Display;
use thiserror::Error;

/// Base of the first interindustry class (logical channels 0-3)
const FIRST_INTERINDUSTRY_BASE: u8 = 0x00;
/// Base of the further interindustry classes (logical channels 4-19)
const FURTHER_INTERINDUSTRY_BASE: u8 = 0x40;

const LONG_CHANNELS_START: u8 = 4;
const LONG_CHANNELS_END: u8 = 19;

/// b5: command is not the last of a chain
const CHAINING_BIT: u8 = 0x10;
/// b6: SM indication in the further interindustry layout
const FURTHER_SM_BIT: u8 = 0x20;
/// b8: GlobalPlatform proprietary command
const PROPRIETARY_BIT: u8 = 0x80;

/// Highest logical channel number that can be encoded in a class byte
pub const MAX_LOGICAL_CHANNEL: u8 = LONG_CHANNELS_END;

/// Error decoding a class byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClassError {
    /// The leading bits match neither interindustry layout
    #[error("Invalid CLA byte: {0:#04X}")]
    InvalidClassByte(u8),
}

/// Secure messaging indication carried by the class byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum SecureMessaging {
    /// No SM or no indication of SM
    #[default]
    #[display("no secure messaging indication")]
    None,
    /// Proprietary SM format
    #[display("proprietary secure messaging")]
    Proprietary,
    /// ISO SM, command header not processed
    #[display("ISO secure messaging, header not processed")]
    IsoNoHeaderProcessing,
    /// ISO SM, command header authenticated
    #[display("ISO secure messaging, header authenticated")]
    IsoHeaderAuthenticated,
}

impl SecureMessaging {
    /// Two-bit value used by the first interindustry layout
    pub const fn bits(self) -> u8 {
        match self {
            Self::None => 0b00,
            Self::Proprietary => 0b01,
            Self::IsoNoHeaderProcessing => 0b10,
            Self::IsoHeaderAuthenticated => 0b11,
        }
    }

    /// Decode from the two low bits of `bits`
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::None,
            0b01 => Self::Proprietary,
            0b10 => Self::IsoNoHeaderProcessing,
            _ => Self::IsoHeaderAuthenticated,
        }
    }
}

/// Interindustry class byte
///
/// Channels 4-19 use the "further interindustry" layout, which can only
/// express [`SecureMessaging::None`] or [`SecureMessaging::IsoNoHeaderProcessing`].
/// Any other indication on those channels is encoded as none. Channel numbers
/// above 19 are invalid and encode as channel 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InterindustryClass {
    /// More commands follow as part of this chain
    pub chaining: bool,
    /// Secure messaging indication
    pub secure_messaging: SecureMessaging,
    /// Logical channel number, 0-19
    pub logical_channel: u8,
}

impl InterindustryClass {
    /// Basic logical channel, no chaining and no secure messaging (CLA `00`)
    pub const BASIC: Self = Self::new(0);

    /// Create a class for the given logical channel
    pub const fn new(logical_channel: u8) -> Self {
        Self {
            chaining: false,
            secure_messaging: SecureMessaging::None,
            logical_channel,
        }
    }

    /// Set the command chaining flag
    pub const fn with_chaining(mut self, chaining: bool) -> Self {
        self.chaining = chaining;
        self
    }

    /// Set the secure messaging indication
    pub const fn with_secure_messaging(mut self, secure_messaging: SecureMessaging) -> Self {
        self.secure_messaging = secure_messaging;
        self
    }

    const fn uses_further_layout(&self) -> bool {
        self.logical_channel >= LONG_CHANNELS_START && self.logical_channel <= LONG_CHANNELS_END
    }

    /// Encode to a class byte
    pub const fn to_byte(&self) -> u8 {
        let further = self.uses_further_layout();
        let mut out = if further {
            FURTHER_INTERINDUSTRY_BASE
        } else {
            FIRST_INTERINDUSTRY_BASE
        };

        if self.chaining {
            out |= CHAINING_BIT;
        }

        if further {
            if matches!(self.secure_messaging, SecureMessaging::IsoNoHeaderProcessing) {
                out |= FURTHER_SM_BIT;
            }
            out |= self.logical_channel - LONG_CHANNELS_START;
        } else {
            out |= self.secure_messaging.bits() << 2;
            // Channels above 19 fall through here and encode as channel 0
            if self.logical_channel < LONG_CHANNELS_START {
                out |= self.logical_channel;
            }
        }

        out
    }

    /// Decode a class byte
    pub const fn from_byte(byte: u8) -> Result<Self, ClassError> {
        if byte & 0xE0 == 0 {
            Ok(Self {
                chaining: byte & CHAINING_BIT != 0,
                secure_messaging: SecureMessaging::from_bits(byte >> 2),
                logical_channel: byte & 0x03,
            })
        } else if byte & 0xC0 == FURTHER_INTERINDUSTRY_BASE {
            let secure_messaging = if byte & FURTHER_SM_BIT != 0 {
                SecureMessaging::IsoNoHeaderProcessing
            } else {
                SecureMessaging::None
            };
            Ok(Self {
                chaining: byte & CHAINING_BIT != 0,
                secure_messaging,
                logical_channel: (byte & 0x0F) + LONG_CHANNELS_START,
            })
        } else {
            Err(ClassError::InvalidClassByte(byte))
        }
    }

    /// Whether this is the last (or only) command of a chain
    pub const fn is_last_command(&self) -> bool {
        !self.chaining
    }

    /// The secure messaging indication that will actually be encoded
    ///
    /// Channels above 19 encode in the first interindustry layout, which
    /// carries every indication.
    pub const fn sm_indication(&self) -> SecureMessaging {
        if !self.uses_further_layout() {
            self.secure_messaging
        } else if matches!(self.secure_messaging, SecureMessaging::IsoNoHeaderProcessing) {
            SecureMessaging::IsoNoHeaderProcessing
        } else {
            SecureMessaging::None
        }
    }

    /// The logical channel that will actually be encoded
    pub const fn normalized_channel(&self) -> u8 {
        if self.logical_channel > LONG_CHANNELS_END {
            0
        } else {
            self.logical_channel
        }
    }
}

/// GlobalPlatform class byte: the interindustry layout plus the b8 flag
/// marking GlobalPlatform proprietary commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlobalPlatformClass {
    /// Interindustry part of the class
    pub interindustry: InterindustryClass,
    /// b8, set for GlobalPlatform proprietary commands
    pub proprietary: bool,
}

impl GlobalPlatformClass {
    /// GlobalPlatform proprietary command on the basic channel (CLA `80`)
    pub const PROPRIETARY: Self = Self::new(InterindustryClass::BASIC, true);

    /// Interindustry command on the basic channel (CLA `00`)
    pub const INTERINDUSTRY: Self = Self::new(InterindustryClass::BASIC, false);

    /// Create a new GlobalPlatform class
    pub const fn new(interindustry: InterindustryClass, proprietary: bool) -> Self {
        Self {
            interindustry,
            proprietary,
        }
    }

    /// Encode to a class byte
    pub const fn to_byte(&self) -> u8 {
        let out = self.interindustry.to_byte();
        if self.proprietary {
            out | PROPRIETARY_BIT
        } else {
            out
        }
    }

    /// Decode a class byte, b8 is read as the proprietary flag
    pub const fn from_byte(byte: u8) -> Result<Self, ClassError> {
        match InterindustryClass::from_byte(byte & !PROPRIETARY_BIT) {
            Ok(interindustry) => Ok(Self {
                interindustry,
                proprietary: byte & PROPRIETARY_BIT != 0,
            }),
            Err(_) => Err(ClassError::InvalidClassByte(byte)),
        }
    }
}

impl From<InterindustryClass> for GlobalPlatformClass {
    fn from(interindustry: InterindustryClass) -> Self {
        Self::new(interindustry, false)
    }
}

/// Any value that can be placed in the CLA position of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// ISO/IEC 7816-4 interindustry class
    Interindustry(InterindustryClass),
    /// GlobalPlatform class with the proprietary flag
    GlobalPlatform(GlobalPlatformClass),
    /// A class byte passed through unchanged
    Raw(u8),
}

impl Class {
    /// Encode to a class byte
    pub const fn to_byte(&self) -> u8 {
        match self {
            Self::Interindustry(class) => class.to_byte(),
            Self::GlobalPlatform(class) => class.to_byte(),
            Self::Raw(byte) => *byte,
        }
    }

    /// View this class as an interindustry class, if it can be read as one
    ///
    /// Raw bytes are decoded, and fail for proprietary layouts.
    pub const fn to_interindustry(&self) -> Result<InterindustryClass, ClassError> {
        match self {
            Self::Interindustry(class) => Ok(*class),
            Self::GlobalPlatform(class) => Ok(class.interindustry),
            Self::Raw(byte) => InterindustryClass::from_byte(*byte),
        }
    }
}

impl From<InterindustryClass> for Class {
    fn from(class: InterindustryClass) -> Self {
        Self::Interindustry(class)
    }
}

impl From<GlobalPlatformClass> for Class {
    fn from(class: GlobalPlatformClass) -> Self {
        Self::GlobalPlatform(class)
    }
}

impl From<u8> for Class {
    fn from(byte: u8) -> Self {
        Self::Raw(byte)
    }
}

impl From<Class> for u8 {
    fn from(class: Class) -> Self {
        class.to_byte()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SM: [SecureMessaging; 4] = [
        SecureMessaging::None,
        SecureMessaging::Proprietary,
        SecureMessaging::IsoNoHeaderProcessing,
        SecureMessaging::IsoHeaderAuthenticated,
    ];

    fn valid_classes() -> Vec<InterindustryClass> {
        let mut classes = Vec::new();
        for chaining in [false, true] {
            for channel in 0..=MAX_LOGICAL_CHANNEL {
                for sm in ALL_SM {
                    if channel >= 4
                        && !matches!(
                            sm,
                            SecureMessaging::None | SecureMessaging::IsoNoHeaderProcessing
                        )
                    {
                        continue;
                    }
                    classes.push(
                        InterindustryClass::new(channel)
                            .with_chaining(chaining)
                            .with_secure_messaging(sm),
                    );
                }
            }
        }
        classes
    }

    #[test]
    fn test_encode_first_interindustry() {
        assert_eq!(InterindustryClass::BASIC.to_byte(), 0x00);

        let class = InterindustryClass::new(2)
            .with_chaining(true)
            .with_secure_messaging(SecureMessaging::IsoHeaderAuthenticated);
        assert_eq!(class.to_byte(), 0x1E);

        let class = InterindustryClass::new(1).with_secure_messaging(SecureMessaging::Proprietary);
        assert_eq!(class.to_byte(), 0x05);
    }

    #[test]
    fn test_encode_further_interindustry() {
        assert_eq!(InterindustryClass::new(4).to_byte(), 0x40);

        let class = InterindustryClass::new(19)
            .with_chaining(true)
            .with_secure_messaging(SecureMessaging::IsoNoHeaderProcessing);
        assert_eq!(class.to_byte(), 0x7F);

        // Only "no header processing" survives on the long channels
        let class = InterindustryClass::new(5).with_secure_messaging(SecureMessaging::Proprietary);
        assert_eq!(class.to_byte(), 0x41);
        assert_eq!(class.sm_indication(), SecureMessaging::None);
    }

    #[test]
    fn test_invalid_channel_normalizes_to_zero() {
        let class = InterindustryClass::new(20).with_secure_messaging(SecureMessaging::Proprietary);
        assert_eq!(class.to_byte(), 0x04);
        assert_eq!(class.normalized_channel(), 0);
        assert_eq!(class.sm_indication(), SecureMessaging::Proprietary);

        assert_eq!(InterindustryClass::new(0xFF).to_byte(), 0x00);
    }

    #[test]
    fn test_accessors_match_encoding() {
        for channel in 0..=25 {
            for bits in 0..4 {
                let class = InterindustryClass::new(channel)
                    .with_secure_messaging(SecureMessaging::from_bits(bits));
                let decoded = InterindustryClass::from_byte(class.to_byte()).unwrap();
                assert_eq!(decoded.secure_messaging, class.sm_indication(), "{class:?}");
                assert_eq!(decoded.logical_channel, class.normalized_channel(), "{class:?}");
            }
        }
    }

    #[test]
    fn test_decode_layouts() {
        let class = InterindustryClass::from_byte(0x1E).unwrap();
        assert!(class.chaining);
        assert!(!class.is_last_command());
        assert_eq!(class.secure_messaging, SecureMessaging::IsoHeaderAuthenticated);
        assert_eq!(class.logical_channel, 2);

        let class = InterindustryClass::from_byte(0x6A).unwrap();
        assert!(!class.chaining);
        assert_eq!(class.secure_messaging, SecureMessaging::IsoNoHeaderProcessing);
        assert_eq!(class.logical_channel, 14);
    }

    #[test]
    fn test_decode_invalid_lead_bits() {
        for byte in [0x20, 0x3F, 0x80, 0x84, 0xA0, 0xC0, 0xFF] {
            assert_eq!(
                InterindustryClass::from_byte(byte),
                Err(ClassError::InvalidClassByte(byte)),
                "byte {byte:#04X}"
            );
        }
    }

    #[test]
    fn test_round_trip_all_valid_classes() {
        for class in valid_classes() {
            let byte = class.to_byte();
            assert_eq!(
                InterindustryClass::from_byte(byte),
                Ok(class),
                "class {class:?} encoded as {byte:#04X}"
            );
        }
    }

    #[test]
    fn test_every_decodable_byte_re_encodes() {
        for byte in 0..=u8::MAX {
            if let Ok(class) = InterindustryClass::from_byte(byte) {
                assert_eq!(class.to_byte(), byte);
            }
        }
    }

    #[test]
    fn test_global_platform_class() {
        assert_eq!(GlobalPlatformClass::PROPRIETARY.to_byte(), 0x80);
        assert_eq!(GlobalPlatformClass::INTERINDUSTRY.to_byte(), 0x00);

        let secured = GlobalPlatformClass::new(
            InterindustryClass::BASIC.with_secure_messaging(SecureMessaging::Proprietary),
            true,
        );
        assert_eq!(secured.to_byte(), 0x84);

        let decoded = GlobalPlatformClass::from_byte(0x84).unwrap();
        assert_eq!(decoded, secured);

        let decoded = GlobalPlatformClass::from_byte(0xC5).unwrap();
        assert!(decoded.proprietary);
        assert_eq!(decoded.interindustry.logical_channel, 9);

        assert_eq!(
            GlobalPlatformClass::from_byte(0xA0),
            Err(ClassError::InvalidClassByte(0xA0))
        );
    }

    #[test]
    fn test_class_variants() {
        let class = Class::from(InterindustryClass::new(3));
        assert_eq!(class.to_byte(), 0x03);

        let class = Class::from(GlobalPlatformClass::PROPRIETARY);
        assert_eq!(u8::from(class), 0x80);
        assert_eq!(class.to_interindustry(), Ok(InterindustryClass::BASIC));

        assert_eq!(Class::Raw(0x12).to_byte(), 0x12);
        assert_eq!(
            Class::Raw(0x80).to_interindustry(),
            Err(ClassError::InvalidClassByte(0x80))
        );
    }
}
