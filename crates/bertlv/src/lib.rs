//! BER-TLV encoding and decoding for smart card data
//!
//! Implements the subset of ISO/IEC 8825-1 (BER) used by ISO/IEC 7816-4 and
//! GlobalPlatform: tags with numbers up to 64 bits and definite lengths up to
//! 8 length bytes.
//!
//! ```
//! use apdu_bertlv::{Object, Tag, TagClass, TlvReader, TlvWriter};
//!
//! let aid = Object::new(Tag::primitive(TagClass::Application, 15), vec![0xA0, 0x00, 0x00, 0x01, 0x51]);
//! let mut writer = TlvWriter::new(Vec::new());
//! writer.write(&aid).unwrap();
//!
//! let encoded = writer.into_inner();
//! let decoded = TlvReader::from_slice(&encoded).read().unwrap();
//! assert_eq!(decoded, aid);
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub mod error;
mod io_util;
pub mod length;
mod object;
mod reader;
pub mod tag;
mod writer;

pub use error::{ObjectPart, ReadError, TlvError, WriteError};
pub use object::Object;
pub use reader::{ReaderConfig, TlvReader};
pub use tag::{Tag, TagClass};
pub use writer::TlvWriter;
