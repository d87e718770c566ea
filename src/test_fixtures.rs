//! Test fixtures and utilities for reducing test setup duplication.
//!
//! Jars are built in memory with [`JarBuilder`], so tests can describe a mod,
//! its metadata and its nested jars in a few lines:
//!
//! ```ignore
//! use crate::test_fixtures::JarBuilder;
//!
//! let lib = JarBuilder::new().fabric_mod("lib", "1.0.0").build();
//! let jar = JarBuilder::new()
//!     .fabric_mod("outer", "2.0.0")
//!     .entry("META-INF/jars/lib.jar", lib)
//!     .build();
//! ```

use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builder for jar bytes
#[derive(Debug, Default)]
pub struct JarBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

impl JarBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arbitrary entry
    #[must_use]
    pub fn entry(mut self, name: &str, content: impl AsRef<[u8]>) -> Self {
        self.entries
            .push((name.to_string(), content.as_ref().to_vec()));
        self
    }

    /// Add a raw `fabric.mod.json`
    #[must_use]
    pub fn mod_json(self, json: &str) -> Self {
        self.entry("fabric.mod.json", json)
    }

    /// Add a `fabric.mod.json` declaring an id and a version
    #[must_use]
    pub fn fabric_mod(self, id: &str, version: &str) -> Self {
        self.mod_json(&format!(
            r#"{{"schemaVersion":1,"id":"{id}","version":"{version}"}}"#
        ))
    }

    /// Serialize the jar
    ///
    /// # Panics
    ///
    /// Panics if the in-memory archive cannot be written.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in self.entries {
            writer
                .start_file(name, SimpleFileOptions::default())
                .expect("Failed to start zip entry");
            writer.write_all(&content).expect("Failed to write zip entry");
        }
        writer
            .finish()
            .expect("Failed to finish zip archive")
            .into_inner()
    }
}

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Write jar bytes to `dir/name`
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_jar(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("Failed to write jar");
    path
}

/// Entry names of a jar, in archive order
///
/// # Panics
///
/// Panics if the bytes are not a readable jar.
#[must_use]
pub fn entry_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("Failed to open jar");
    (0..archive.len())
        .map(|i| {
            archive
                .by_index_raw(i)
                .expect("Failed to read zip entry")
                .name()
                .to_string()
        })
        .collect()
}

/// Text content of a jar entry, if present
///
/// # Panics
///
/// Panics if the bytes are not a readable jar.
#[must_use]
pub fn read_entry(bytes: &[u8], name: &str) -> Option<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("Failed to open jar");
    let mut entry = archive.by_name(name).ok()?;
    let mut text = String::new();
    entry.read_to_string(&mut text).ok()?;
    Some(text)
}
