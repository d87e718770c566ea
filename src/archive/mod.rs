//! Jar (zip) archive access
//!
//! Jars are handled as in-memory byte buffers: a nested jar is read fully
//! before it is opened, so recursion never depends on a seekable stream of
//! the outer archive.
//!
//! - [`descriptor`]: reads mod id and version from `fabric.mod.json`
//! - [`rewrite`]: strips nested jars and their declaration from a staged jar

pub mod descriptor;
pub mod rewrite;

use std::io::{Cursor, Read};

use zip::ZipArchive;
use zip::result::ZipResult;

use crate::config::NESTED_JAR_SUFFIX;

pub use descriptor::Descriptor;

/// A nested jar read out of its containing archive
#[derive(Debug, Clone)]
pub struct NestedJar {
    /// Full entry path inside the container (e.g. `META-INF/jars/lib.jar`)
    pub entry_name: String,
    /// Entry modification time, Unix seconds
    pub modified: i64,
    pub bytes: Vec<u8>,
}

impl NestedJar {
    /// File name without the directories of the entry path
    pub fn file_name(&self) -> &str {
        file_name(&self.entry_name)
    }
}

/// Open a jar held in memory
pub fn open(bytes: &[u8]) -> ZipResult<ZipArchive<Cursor<&[u8]>>> {
    ZipArchive::new(Cursor::new(bytes))
}

/// Whether an entry is a nested jar
pub fn is_nested_jar(entry_name: &str, is_dir: bool) -> bool {
    !is_dir && entry_name.ends_with(NESTED_JAR_SUFFIX)
}

/// Last path segment of an entry name
pub fn file_name(entry_name: &str) -> &str {
    entry_name.rsplit('/').next().unwrap_or(entry_name)
}

/// Convert a zip entry time to Unix seconds; missing or invalid times map to 0
pub fn entry_timestamp(time: Option<zip::DateTime>) -> i64 {
    time.and_then(|t| {
        chrono::NaiveDate::from_ymd_opt(
            i32::from(t.year()),
            u32::from(t.month()),
            u32::from(t.day()),
        )
        .and_then(|date| {
            date.and_hms_opt(
                u32::from(t.hour()),
                u32::from(t.minute()),
                u32::from(t.second()),
            )
        })
    })
    .map_or(0, |naive| naive.and_utc().timestamp())
}

/// Whether the jar contains an entry with exactly this name
pub fn contains_entry(bytes: &[u8], name: &str) -> ZipResult<bool> {
    let archive = open(bytes)?;
    Ok(archive.index_for_name(name).is_some())
}

/// Read every nested jar of an archive, in archive order
pub fn nested_jars(bytes: &[u8]) -> ZipResult<Vec<NestedJar>> {
    let mut archive = open(bytes)?;
    let mut jars = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if !is_nested_jar(entry.name(), entry.is_dir()) {
            continue;
        }
        let mut data = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry.read_to_end(&mut data)?;
        jars.push(NestedJar {
            entry_name: entry.name().to_string(),
            modified: entry_timestamp(entry.last_modified()),
            bytes: data,
        });
    }
    Ok(jars)
}
