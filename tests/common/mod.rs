//! Common test utilities for jarflat integration tests

use std::io::{Cursor, Read, Write};
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Get a command for the jarflat binary
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated, dead_code)]
pub fn jarflat_cmd() -> Command {
    Command::cargo_bin("jarflat").unwrap()
}

/// A mods directory plus room for output and staging, removed on drop
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Directory holding the top-level jars
    pub mods: PathBuf,
    /// Output directory; not created until jarflat runs
    pub output: PathBuf,
    /// Parent of the staging directory
    pub staging: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace with an empty mods directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let mods = temp.path().join("mods");
        std::fs::create_dir_all(&mods).expect("Failed to create mods directory");
        let output = temp.path().join("flat");
        let staging = temp.path().join("staging");
        Self {
            temp,
            mods,
            output,
            staging,
        }
    }

    /// Write a top-level jar
    pub fn add_jar(&self, name: &str, bytes: &[u8]) {
        std::fs::write(self.mods.join(name), bytes).expect("Failed to write jar");
    }

    /// jarflat invocation on this workspace's directories
    pub fn cmd(&self) -> Command {
        let mut cmd = jarflat_cmd();
        cmd.arg(&self.mods)
            .arg("--output")
            .arg(&self.output)
            .arg("--staging-dir")
            .arg(&self.staging)
            .env_remove("JARFLAT_INPUT")
            .env_remove("JARFLAT_OUTPUT");
        cmd
    }

    /// Sorted file names in the output directory
    pub fn output_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.output)
            .expect("Failed to read output directory")
            .map(|e| {
                e.expect("Failed to read output entry")
                    .file_name()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        names.sort();
        names
    }

    /// Bytes of an output jar
    pub fn read_output(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.output.join(name)).expect("Failed to read output jar")
    }

    /// Whether anything is left in the staging base
    pub fn staging_is_empty(&self) -> bool {
        !self.staging.exists()
            || std::fs::read_dir(&self.staging)
                .expect("Failed to read staging directory")
                .next()
                .is_none()
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for jar bytes
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct JarBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

#[allow(dead_code)]
impl JarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, name: &str, content: impl AsRef<[u8]>) -> Self {
        self.entries
            .push((name.to_string(), content.as_ref().to_vec()));
        self
    }

    /// Add a `fabric.mod.json` declaring an id and a version
    pub fn fabric_mod(self, id: &str, version: &str) -> Self {
        self.entry(
            "fabric.mod.json",
            format!(r#"{{"schemaVersion":1,"id":"{id}","version":"{version}"}}"#),
        )
    }

    /// Add a nested jar and declare it in `fabric.mod.json`
    pub fn with_declared_jar(self, id: &str, version: &str, name: &str, jar: &[u8]) -> Self {
        let path = format!("META-INF/jars/{name}");
        self.entry(
            "fabric.mod.json",
            format!(
                r#"{{"schemaVersion":1,"id":"{id}","version":"{version}","jars":[{{"file":"{path}"}}]}}"#
            ),
        )
        .entry(&path, jar)
    }

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

/// Entry names of a jar, in archive order
#[allow(dead_code)]
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
#[allow(dead_code)]
pub fn read_entry(bytes: &[u8], name: &str) -> Option<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("Failed to open jar");
    let mut entry = archive.by_name(name).ok()?;
    let mut text = String::new();
    entry.read_to_string(&mut text).ok()?;
    Some(text)
}
