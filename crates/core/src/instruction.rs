//! Interindustry instruction (INS) codes from ISO/IEC 7816-4
//!
//! This is not an exhaustive list. Protocols layered on top (GlobalPlatform
//! and friends) define their own instruction constants.

/// ACTIVATE FILE
pub const ACTIVATE_FILE: u8 = 0x44;
/// APPEND RECORD
pub const APPEND_RECORD: u8 = 0xE2;
/// CHANGE REFERENCE DATA
pub const CHANGE_REFERENCE_DATA: u8 = 0x24;
/// CREATE FILE
pub const CREATE_FILE: u8 = 0xE0;
/// DEACTIVATE FILE
pub const DEACTIVATE_FILE: u8 = 0x04;
/// DELETE FILE
pub const DELETE_FILE: u8 = 0xE4;
/// DISABLE VERIFICATION REQUIREMENT
pub const DISABLE_VERIFICATION_REQUIREMENT: u8 = 0x26;
/// ENABLE VERIFICATION REQUIREMENT
pub const ENABLE_VERIFICATION_REQUIREMENT: u8 = 0x28;
/// ENVELOPE
pub const ENVELOPE: u8 = 0xC2;
/// ERASE BINARY
pub const ERASE_BINARY: u8 = 0x0E;
/// ERASE RECORD(S)
pub const ERASE_RECORDS: u8 = 0x0C;
/// EXTERNAL (or MUTUAL) AUTHENTICATE
pub const EXTERNAL_MUTUAL_AUTHENTICATE: u8 = 0x82;
/// GENERAL AUTHENTICATE
pub const GENERAL_AUTHENTICATE: u8 = 0x86;
/// GENERATE ASYMMETRIC KEY PAIR
pub const GENERATE_ASYMMETRIC_KEY_PAIR: u8 = 0x46;
/// GET CHALLENGE
pub const GET_CHALLENGE: u8 = 0x84;
/// GET DATA
pub const GET_DATA: u8 = 0xCA;
/// GET RESPONSE
pub const GET_RESPONSE: u8 = 0xC0;
/// INTERNAL AUTHENTICATE
pub const INTERNAL_AUTHENTICATE: u8 = 0x88;
/// MANAGE CHANNEL
pub const MANAGE_CHANNEL: u8 = 0x70;
/// MANAGE SECURITY ENVIRONMENT
pub const MANAGE_SECURITY_ENVIRONMENT: u8 = 0x22;
/// PERFORM SCQL OPERATION
pub const PERFORM_SCQL_OPERATION: u8 = 0x10;
/// PERFORM SECURITY OPERATION
pub const PERFORM_SECURITY_OPERATION: u8 = 0x2A;
/// PERFORM TRANSACTION OPERATION
pub const PERFORM_TRANSACTION_OPERATION: u8 = 0x12;
/// PERFORM USER OPERATION
pub const PERFORM_USER_OPERATION: u8 = 0x14;
/// PUT DATA
pub const PUT_DATA: u8 = 0xDA;
/// READ BINARY
pub const READ_BINARY: u8 = 0xB0;
/// READ RECORD(S)
pub const READ_RECORDS: u8 = 0xB2;
/// RESET RETRY COUNTER
pub const RESET_RETRY_COUNTER: u8 = 0x2C;
/// SEARCH BINARY
pub const SEARCH_BINARY: u8 = 0xA0;
/// SEARCH RECORD
pub const SEARCH_RECORD: u8 = 0xA2;
/// SELECT
pub const SELECT: u8 = 0xA4;
/// TERMINATE CARD USAGE
pub const TERMINATE_CARD_USAGE: u8 = 0xFE;
/// TERMINATE DF
pub const TERMINATE_DF: u8 = 0xE6;
/// TERMINATE EF
pub const TERMINATE_EF: u8 = 0xE8;
/// UPDATE BINARY
pub const UPDATE_BINARY: u8 = 0xD6;
/// UPDATE RECORD
pub const UPDATE_RECORD: u8 = 0xDC;
/// VERIFY
pub const VERIFY: u8 = 0x20;
/// WRITE BINARY
pub const WRITE_BINARY: u8 = 0xD0;
/// WRITE RECORD
pub const WRITE_RECORD: u8 = 0xD2;

/// Set b1 of an instruction to request BER-TLV encoded data, where the
/// instruction allows it (e.g. READ BINARY `B0` becomes `B1`)
pub const fn set_ber_tlv(ins: u8) -> u8 {
    ins | 0x01
}
