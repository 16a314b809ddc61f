//! Key type coding used in key information and PUT KEY data

use derive_more::Display;

/// Key type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[repr(u8)]
pub enum KeyType {
    /// DES, mode implicitly known
    #[display("DES")]
    Des = 0x80,
    /// Pre-shared key for TLS
    #[display("TLS pre-shared key")]
    TlsPreSharedKey = 0x85,
    /// AES
    #[display("AES")]
    Aes = 0x88,
    /// HMAC-SHA1, length implicitly known
    #[display("HMAC-SHA1")]
    HmacSha1 = 0x90,
    /// HMAC-SHA1-160, length 160 bits
    #[display("HMAC-SHA1-160")]
    HmacSha1_160 = 0x91,
    /// RSA public key, public exponent e in clear text
    #[display("RSA public exponent")]
    RsaPublicExponent = 0xA0,
    /// RSA public key, modulus N in clear text
    #[display("RSA modulus")]
    RsaModulus = 0xA1,
    /// RSA private key, modulus N
    #[display("RSA private modulus")]
    RsaPrivateModulus = 0xA2,
    /// RSA private key, private exponent d
    #[display("RSA private exponent")]
    RsaPrivateExponent = 0xA3,
    /// RSA private key, Chinese Remainder P component
    #[display("RSA CRT P")]
    RsaCrtP = 0xA4,
    /// RSA private key, Chinese Remainder Q component
    #[display("RSA CRT Q")]
    RsaCrtQ = 0xA5,
    /// RSA private key, Chinese Remainder PQ component (q^-1 mod p)
    #[display("RSA CRT PQ")]
    RsaCrtPq = 0xA6,
    /// RSA private key, Chinese Remainder DP1 component (d mod (p-1))
    #[display("RSA CRT DP1")]
    RsaCrtDp1 = 0xA7,
    /// RSA private key, Chinese Remainder DQ1 component (d mod (q-1))
    #[display("RSA CRT DQ1")]
    RsaCrtDq1 = 0xA8,
    /// ECC public key
    #[display("ECC public key")]
    EccPublicKey = 0xB0,
    /// ECC private key
    #[display("ECC private key")]
    EccPrivateKey = 0xB1,
    /// ECC field parameter P (field specification)
    #[display("ECC field parameter P")]
    EccFieldP = 0xB2,
    /// ECC field parameter A (first coefficient)
    #[display("ECC field parameter A")]
    EccFieldA = 0xB3,
    /// ECC field parameter B (second coefficient)
    #[display("ECC field parameter B")]
    EccFieldB = 0xB4,
    /// ECC field parameter G (generator)
    #[display("ECC field parameter G")]
    EccFieldG = 0xB5,
    /// ECC field parameter N (order of generator)
    #[display("ECC field parameter N")]
    EccFieldN = 0xB6,
    /// ECC field parameter k (cofactor)
    #[display("ECC field parameter k")]
    EccFieldK = 0xB7,
    /// ECC key parameters reference
    #[display("ECC key parameters reference")]
    EccKeyParametersReference = 0xF0,
    /// Extended format
    #[display("Extended format")]
    Extended = 0xFF,
}

impl KeyType {
    /// Decode a key type byte, `None` for values reserved for future use
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0x80 => Self::Des,
            0x85 => Self::TlsPreSharedKey,
            0x88 => Self::Aes,
            0x90 => Self::HmacSha1,
            0x91 => Self::HmacSha1_160,
            0xA0 => Self::RsaPublicExponent,
            0xA1 => Self::RsaModulus,
            0xA2 => Self::RsaPrivateModulus,
            0xA3 => Self::RsaPrivateExponent,
            0xA4 => Self::RsaCrtP,
            0xA5 => Self::RsaCrtQ,
            0xA6 => Self::RsaCrtPq,
            0xA7 => Self::RsaCrtDp1,
            0xA8 => Self::RsaCrtDq1,
            0xB0 => Self::EccPublicKey,
            0xB1 => Self::EccPrivateKey,
            0xB2 => Self::EccFieldP,
            0xB3 => Self::EccFieldA,
            0xB4 => Self::EccFieldB,
            0xB5 => Self::EccFieldG,
            0xB6 => Self::EccFieldN,
            0xB7 => Self::EccFieldK,
            0xF0 => Self::EccKeyParametersReference,
            0xFF => Self::Extended,
            _ => return None,
        })
    }

    /// The key type byte
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Whether this is one of the RSA key components
    pub const fn is_rsa(self) -> bool {
        matches!(self.to_byte(), 0xA0..=0xA8)
    }

    /// Whether this is one of the ECC key components or parameters
    pub const fn is_ecc(self) -> bool {
        matches!(self.to_byte(), 0xB0..=0xB7 | 0xF0)
    }
}

impl TryFrom<u8> for KeyType {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_byte(byte).ok_or(byte)
    }
}

impl From<KeyType> for u8 {
    fn from(key_type: KeyType) -> Self {
        key_type.to_byte()
    }
}
