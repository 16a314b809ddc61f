//! GET STATUS response parsing
//!
//! Registry entries come back as a sequence of `E3` templates. Each holds the
//! entry AID (`4F`), its life cycle state (`9F70`), and depending on the
//! requested subset, privileges (`C5`) or executable module AIDs (`84`).

use apdu_bertlv::{Object, TlvReader};
use bytes::Bytes;
use tracing::trace;

use crate::constants::tags;
use crate::privileges::Privileges;
use crate::{Error, Result};

/// Application or security domain registry entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationInfo {
    /// AID of the application
    pub aid: Bytes,
    /// Life cycle state
    pub lifecycle: u8,
    /// Privileges
    pub privileges: Privileges,
    /// AID of the associated security domain, if reported
    pub security_domain: Option<Bytes>,
}

/// Executable load file registry entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFileInfo {
    /// AID of the load file
    pub aid: Bytes,
    /// Life cycle state
    pub lifecycle: u8,
    /// Load file version, if reported
    pub version: Option<Bytes>,
    /// Executable module AIDs, only present when modules were requested
    pub modules: Vec<Bytes>,
}

/// Parse the application or security domain entries of a GET STATUS response
pub fn parse_applications(data: &[u8]) -> Result<Vec<ApplicationInfo>> {
    entries(data)?
        .iter()
        .map(|entry| {
            let fields = Fields::parse(&entry.value)?;
            let privileges = match fields.privileges {
                Some(bytes) => Privileges::from_slice(&bytes)?,
                None => Privileges::empty(),
            };
            Ok(ApplicationInfo {
                aid: fields.aid.ok_or(Error::MissingObject(tags::AID))?,
                lifecycle: fields.lifecycle,
                privileges,
                security_domain: fields.security_domain,
            })
        })
        .collect()
}

/// Parse the load file entries of a GET STATUS response
pub fn parse_load_files(data: &[u8]) -> Result<Vec<LoadFileInfo>> {
    entries(data)?
        .iter()
        .map(|entry| {
            let fields = Fields::parse(&entry.value)?;
            Ok(LoadFileInfo {
                aid: fields.aid.ok_or(Error::MissingObject(tags::AID))?,
                lifecycle: fields.lifecycle,
                version: fields.version,
                modules: fields.modules,
            })
        })
        .collect()
}

/// Top level registry entry templates, other objects are skipped
fn entries(data: &[u8]) -> Result<Vec<Object>> {
    let mut entries = Vec::new();
    for object in TlvReader::from_slice(data) {
        let object = object?;
        if object.tag == tags::REGISTRY_ENTRY {
            entries.push(object);
        } else {
            trace!(tag = %object.tag, "Skipping non-registry object");
        }
    }
    Ok(entries)
}

#[derive(Default)]
struct Fields {
    aid: Option<Bytes>,
    lifecycle: u8,
    privileges: Option<Bytes>,
    security_domain: Option<Bytes>,
    version: Option<Bytes>,
    modules: Vec<Bytes>,
}

impl Fields {
    fn parse(template: &[u8]) -> Result<Self> {
        let mut fields = Self::default();
        for object in TlvReader::from_slice(template) {
            let object = object?;
            match object.tag {
                tags::AID => fields.aid = Some(object.value),
                tags::LIFE_CYCLE_STATE => {
                    fields.lifecycle = object.value.first().copied().unwrap_or_default();
                }
                tags::PRIVILEGES => fields.privileges = Some(object.value),
                tags::ASSOCIATED_SECURITY_DOMAIN => {
                    fields.security_domain = Some(object.value);
                }
                tags::LOAD_FILE_VERSION => fields.version = Some(object.value),
                tags::MODULE_AID => fields.modules.push(object.value),
                _ => {}
            }
        }
        Ok(fields)
    }
}
