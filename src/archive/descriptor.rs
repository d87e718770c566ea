//! Mod descriptor reading
//!
//! Reads the mod id and version from a jar's `fabric.mod.json`. Reading never
//! fails: a missing entry, malformed JSON, or a missing field all surface as
//! `None` for the affected field.

use std::io::{Read, Seek};

use serde_json::{Map, Value};
use zip::ZipArchive;

use crate::config::MOD_METADATA_ENTRY;

/// Identity fields of a mod
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub id: Option<String>,
    pub version: Option<String>,
}

impl Descriptor {
    /// Read the descriptor of a jar held in memory
    pub fn read(bytes: &[u8]) -> Self {
        match super::open(bytes) {
            Ok(mut archive) => Self::from_archive(&mut archive),
            Err(e) => {
                log::debug!("Not a readable jar, no descriptor: {e}");
                Self::default()
            }
        }
    }

    /// Read the descriptor from an already opened archive
    pub fn from_archive<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Self {
        let Ok(mut entry) = archive.by_name(MOD_METADATA_ENTRY) else {
            return Self::default();
        };
        let mut text = Vec::new();
        if let Err(e) = entry.read_to_end(&mut text) {
            log::debug!("Failed to read {MOD_METADATA_ENTRY}: {e}");
            return Self::default();
        }
        Self::from_json(&text)
    }

    /// Parse descriptor fields out of `fabric.mod.json` content
    pub fn from_json(text: &[u8]) -> Self {
        let text = text.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(text);
        match serde_json::from_slice::<Map<String, Value>>(text) {
            Ok(object) => Self {
                id: object.get("id").and_then(primitive_string),
                version: object.get("version").and_then(primitive_string),
            },
            Err(e) => {
                log::debug!("Malformed {MOD_METADATA_ENTRY}: {e}");
                Self::default()
            }
        }
    }
}

/// String form of a JSON primitive; objects, arrays and null have none
fn primitive_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
