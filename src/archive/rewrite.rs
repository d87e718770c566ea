//! Nested jar stripping
//!
//! Removes every nested jar entry from a staged jar and drops the `jars`
//! declaration from its `fabric.mod.json`, so a loader will not try to
//! expand anything that was already flattened.
//!
//! The edit is applied as one batch: the kept entries are copied raw into a
//! temporary archive next to the original, the metadata entry is replaced in
//! place, and the temporary archive is then persisted over the original. A
//! failure at any point leaves the original jar untouched.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::{MOD_METADATA_ENTRY, NESTED_JARS_KEY};
use crate::error::{FlattenError, Result};

/// What stripping changed in a jar
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StripOutcome {
    /// Entry names of the removed nested jars
    pub removed_jars: Vec<String>,
    /// Whether the `jars` declaration was removed from the metadata
    pub declaration_removed: bool,
}

impl StripOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.removed_jars.is_empty() && !self.declaration_removed
    }
}

/// Replacement for the metadata entry
struct MetadataEdit {
    index: usize,
    content: Vec<u8>,
    options: SimpleFileOptions,
}

/// Strip nested jars from the jar at `path`, editing it in place
pub fn strip_nested_jars(path: &Path) -> Result<StripOutcome> {
    let fail = |reason: String| FlattenError::RewriteFailed {
        path: path.display().to_string(),
        reason,
    };

    let bytes = fs::read(path).map_err(|e| fail(e.to_string()))?;
    let mut archive = super::open(&bytes).map_err(|e| fail(e.to_string()))?;

    let mut outcome = StripOutcome::default();
    let mut removed = vec![false; archive.len()];
    for (index, slot) in removed.iter_mut().enumerate() {
        let entry = archive.by_index_raw(index).map_err(|e| fail(e.to_string()))?;
        if super::is_nested_jar(entry.name(), entry.is_dir()) {
            outcome.removed_jars.push(entry.name().to_string());
            *slot = true;
        }
    }

    let edit = match archive.index_for_name(MOD_METADATA_ENTRY) {
        Some(index) => {
            let mut entry = archive.by_index(index).map_err(|e| fail(e.to_string()))?;
            let mut text = Vec::new();
            entry
                .read_to_end(&mut text)
                .map_err(|e| fail(format!("failed to read {MOD_METADATA_ENTRY}: {e}")))?;
            let content = without_nested_declaration(&text)
                .map_err(|e| fail(format!("failed to edit {MOD_METADATA_ENTRY}: {e}")))?;
            content.map(|content| {
                let method = match entry.compression() {
                    CompressionMethod::Stored => CompressionMethod::Stored,
                    _ => CompressionMethod::Deflated,
                };
                let mut options = SimpleFileOptions::default().compression_method(method);
                if let Some(time) = entry.last_modified() {
                    options = options.last_modified_time(time);
                }
                MetadataEdit {
                    index,
                    content,
                    options,
                }
            })
        }
        None => None,
    };
    outcome.declaration_removed = edit.is_some();

    if outcome.is_unchanged() {
        log::debug!("Nothing to strip in {}", path.display());
        return Ok(outcome);
    }

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let staging = NamedTempFile::new_in(parent).map_err(|e| fail(e.to_string()))?;
    let mut writer = ZipWriter::new(staging);
    for (index, &strip) in removed.iter().enumerate() {
        if strip {
            continue;
        }
        match &edit {
            Some(edit) if edit.index == index => {
                writer
                    .start_file(MOD_METADATA_ENTRY, edit.options)
                    .map_err(|e| fail(e.to_string()))?;
                writer
                    .write_all(&edit.content)
                    .map_err(|e| fail(e.to_string()))?;
            }
            _ => {
                let entry = archive.by_index_raw(index).map_err(|e| fail(e.to_string()))?;
                writer.raw_copy_file(entry).map_err(|e| fail(e.to_string()))?;
            }
        }
    }
    let staging = writer.finish().map_err(|e| fail(e.to_string()))?;
    // Temp files are created owner-only; keep the jar's own mode
    let permissions = fs::metadata(path)
        .map_err(|e| fail(e.to_string()))?
        .permissions();
    staging
        .as_file()
        .set_permissions(permissions)
        .map_err(|e| fail(e.to_string()))?;
    staging
        .persist(path)
        .map_err(|e| fail(e.error.to_string()))?;

    log::debug!(
        "Stripped {} nested jar(s) from {}{}",
        outcome.removed_jars.len(),
        path.display(),
        if outcome.declaration_removed {
            " and removed its jars declaration"
        } else {
            ""
        }
    );
    Ok(outcome)
}

/// Metadata content without the nested jar declaration.
///
/// Returns `Ok(None)` when the declaration is absent, so the entry can be left
/// byte-for-byte as it was. Every other key keeps its value and position.
pub fn without_nested_declaration(text: &[u8]) -> serde_json::Result<Option<Vec<u8>>> {
    let text = text.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(text);
    let mut object: Map<String, Value> = serde_json::from_slice(text)?;
    if object.shift_remove(NESTED_JARS_KEY).is_none() {
        return Ok(None);
    }
    serde_json::to_vec(&object).map(Some)
}
