//! GlobalPlatform command subset on top of the ISO 7816 APDU layer
//!
//! This crate provides:
//!
//! - [`GpCommand`], the GlobalPlatform command form (at most 255 data bytes,
//!   Le of 256 when response data is expected), with SELECT, GET STATUS and
//!   DELETE builders
//! - The [`Privileges`] codec with the implied-privilege rules
//! - [`KeyType`] coding
//! - GET STATUS response parsing in [`registry`]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub mod command;
pub mod constants;
pub mod error;
pub mod key_type;
pub mod privileges;
pub mod registry;

pub use command::{GpCommand, send_on_transport};
pub use error::{Error, Result};
pub use key_type::KeyType;
pub use privileges::Privileges;
pub use registry::{ApplicationInfo, LoadFileInfo, parse_applications, parse_load_files};
