//! Constants used in GlobalPlatform operations
//!
//! This module contains constants defined by the GlobalPlatform Card
//! Specification: CLA bytes, instruction codes, parameter values, status words
//! and BER-TLV tags.

/// GlobalPlatform command classes
pub mod cla {
    /// ISO7816 command class
    pub const ISO7816: u8 = 0x00;
    /// GlobalPlatform command class
    pub const GP: u8 = 0x80;
    /// Secure messaging command class (with MAC)
    pub const MAC: u8 = 0x84;
}

/// GlobalPlatform instruction codes
pub mod ins {
    /// DELETE command
    pub const DELETE: u8 = 0xE4;
    /// GET DATA command
    pub const GET_DATA: u8 = 0xCA;
    /// GET DATA command, BER-TLV encoded data
    pub const GET_DATA_BER_TLV: u8 = 0xCB;
    /// GET RESPONSE command
    pub const GET_RESPONSE: u8 = 0xC0;
    /// GET STATUS command
    pub const GET_STATUS: u8 = 0xF2;
    /// INSTALL command
    pub const INSTALL: u8 = 0xE6;
    /// LOAD command
    pub const LOAD: u8 = 0xE8;
    /// MANAGE CHANNEL command
    pub const MANAGE_CHANNEL: u8 = 0x70;
    /// PUT KEY command
    pub const PUT_KEY: u8 = 0xD8;
    /// SELECT command
    pub const SELECT: u8 = 0xA4;
    /// SET STATUS command
    pub const SET_STATUS: u8 = 0xF0;
    /// STORE DATA command
    pub const STORE_DATA: u8 = 0xE2;
    /// INITIALIZE UPDATE command
    pub const INITIALIZE_UPDATE: u8 = 0x50;
    /// EXTERNAL AUTHENTICATE command
    pub const EXTERNAL_AUTHENTICATE: u8 = 0x82;
}

/// Parameter values for SELECT command (P1)
pub mod select_p1 {
    /// Select by DF name
    pub const BY_NAME: u8 = 0x04;
}

/// Parameter values for GET STATUS command (P1)
pub mod get_status_p1 {
    /// Get status of issuer security domain
    pub const ISSUER_SECURITY_DOMAIN: u8 = 0x80;
    /// Get status of applications
    pub const APPLICATIONS: u8 = 0x40;
    /// Get status of executable load files
    pub const EXEC_LOAD_FILES: u8 = 0x20;
    /// Get status of executable load files and modules
    pub const EXEC_LOAD_FILES_AND_MODULES: u8 = 0x10;
}

/// Parameter values for GET STATUS command (P2)
pub mod get_status_p2 {
    /// Return data in TLV format
    pub const TLV_DATA: u8 = 0x02;
    /// Get the next occurrence
    pub const NEXT_OCCURRENCE: u8 = 0x01;
}

/// Parameter values for DELETE command (P2)
pub mod delete_p2 {
    /// Delete object
    pub const OBJECT: u8 = 0x00;
    /// Delete object and related objects
    pub const OBJECT_AND_RELATED: u8 = 0x80;
}

/// Commonly used status words in GlobalPlatform
pub mod status {
    use apdu_core::StatusWord;

    /// Success
    pub const SUCCESS: StatusWord = StatusWord::new(0x90, 0x00);
    /// More data available with GET STATUS next occurrence
    pub const MORE_DATA: StatusWord = StatusWord::new(0x63, 0x10);
    /// Referenced data not found
    pub const REFERENCED_DATA_NOT_FOUND: StatusWord = StatusWord::new(0x6A, 0x88);
    /// Security condition not satisfied
    pub const SECURITY_CONDITION_NOT_SATISFIED: StatusWord = StatusWord::new(0x69, 0x82);
}

/// Tags used in GlobalPlatform commands and responses
pub mod tags {
    use apdu_bertlv::{Tag, TagClass};

    /// Application or load file AID (4F)
    pub const AID: Tag = Tag::primitive(TagClass::Application, 0x0F);
    /// Executable module AID (84)
    pub const MODULE_AID: Tag = Tag::primitive(TagClass::ContextSpecific, 0x04);
    /// Life cycle state (9F70)
    pub const LIFE_CYCLE_STATE: Tag = Tag::primitive(TagClass::ContextSpecific, 0x70);
    /// Privileges (C5)
    pub const PRIVILEGES: Tag = Tag::primitive(TagClass::Private, 0x05);
    /// Associated security domain AID (CC)
    pub const ASSOCIATED_SECURITY_DOMAIN: Tag = Tag::primitive(TagClass::Private, 0x0C);
    /// Load file version (CE)
    pub const LOAD_FILE_VERSION: Tag = Tag::primitive(TagClass::Private, 0x0E);
    /// GET STATUS registry entry template (E3)
    pub const REGISTRY_ENTRY: Tag = Tag::constructed(TagClass::Private, 0x03);
}

/// Security domain AID (ISD)
pub const SECURITY_DOMAIN_AID: &[u8] = &[0xA0, 0x00, 0x00, 0x01, 0x51, 0x00, 0x00, 0x00];
