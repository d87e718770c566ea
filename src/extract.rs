//! Recursive jar extraction
//!
//! Every top-level jar and every jar nested inside it (at any depth) is
//! staged as a [`Candidate`] under `<staging>/<mod id>/`. Nested jars are
//! walked depth-first and staged before the jar that contains them, so
//! staging order is fully determined by input order and archive order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::{self, Descriptor};
use crate::config::UNIDENTIFIED_BUCKET;
use crate::error::{FlattenError, Result};
use crate::run::{LINEAGE_SEPARATOR, Run};

/// A staged copy of a jar that may be selected for the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Where the staged copy lives
    pub path: PathBuf,
    /// Real file name of the jar
    pub file_name: String,
    /// Mod id, or the unidentified bucket name
    pub identifier: String,
    /// Descriptor read when the jar was staged
    pub descriptor: Descriptor,
    /// Names of the jars containing this one, outermost first
    pub lineage: Vec<String>,
    /// Modification time of the containing jar, Unix seconds
    pub container_time: i64,
    /// Modification time of this jar's entry, Unix seconds
    pub entry_time: i64,
}

impl Candidate {
    /// Nesting depth; 0 for top-level jars
    pub fn depth(&self) -> usize {
        self.lineage.len()
    }

    pub fn is_unidentified(&self) -> bool {
        self.identifier == UNIDENTIFIED_BUCKET
    }

    /// Name used in messages, e.g. `lib.jar (Depth 1)`
    pub fn display_name(&self) -> String {
        format!("{} (Depth {})", self.file_name, self.depth())
    }

    /// Full chain down to this jar, e.g. `a.jar -> lib.jar`
    pub fn lineage_display(&self) -> String {
        self.lineage
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.file_name.as_str()))
            .collect::<Vec<_>>()
            .join(LINEAGE_SEPARATOR)
    }
}

/// Stages jars into one run's staging directory
pub struct Extractor<'a> {
    run: &'a Run,
    staging_dir: &'a Path,
}

impl<'a> Extractor<'a> {
    pub fn new(run: &'a Run, staging_dir: &'a Path) -> Self {
        Self { run, staging_dir }
    }

    /// Stage a top-level jar and everything nested inside it.
    ///
    /// Returns the staged candidates in staging order: nested jars first
    /// (depth-first), the top-level jar last.
    pub fn stage_input(
        &self,
        file_name: &str,
        bytes: &[u8],
        modified: i64,
    ) -> Result<Vec<Candidate>> {
        let mut staged = Vec::new();
        let lineage = vec![file_name.to_string()];
        self.stage_nested(bytes, &lineage, modified, &mut staged)?;

        let descriptor = Descriptor::read(bytes);
        let identifier = bucket_for(&descriptor);
        let path = self.stage_bytes(&identifier, file_name, bytes)?;
        staged.push(Candidate {
            path,
            file_name: file_name.to_string(),
            identifier,
            descriptor,
            lineage: Vec::new(),
            container_time: modified,
            entry_time: modified,
        });
        Ok(staged)
    }

    /// Stage every jar nested in `bytes`, whose own lineage is `container`
    fn stage_nested(
        &self,
        bytes: &[u8],
        container: &[String],
        container_time: i64,
        staged: &mut Vec<Candidate>,
    ) -> Result<()> {
        let container_name = container.join(LINEAGE_SEPARATOR);
        let jars = archive::nested_jars(bytes).map_err(|e| FlattenError::MalformedArchive {
            name: container_name.clone(),
            reason: e.to_string(),
        })?;

        for jar in jars {
            let file_name = jar.file_name().to_string();

            let mut child = container.to_vec();
            child.push(file_name.clone());
            self.stage_nested(&jar.bytes, &child, jar.modified, staged)?;

            let descriptor = Descriptor::read(&jar.bytes);
            let identifier = bucket_for(&descriptor);
            let staged_name = self.run.staged_name(
                container_time,
                jar.modified,
                staged.len(),
                &container_name,
                &file_name,
            );
            let path = self.stage_bytes(&identifier, &staged_name, &jar.bytes)?;
            log::debug!(
                "Staged {container_name}{LINEAGE_SEPARATOR}{file_name} as {identifier}"
            );
            staged.push(Candidate {
                path,
                file_name,
                identifier,
                descriptor,
                lineage: container.to_vec(),
                container_time,
                entry_time: jar.modified,
            });
        }
        Ok(())
    }

    /// Write bytes to `<staging>/<bucket>/<name>`
    fn stage_bytes(&self, identifier: &str, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let dir = self.staging_dir.join(bucket_dir_name(identifier));
        let path = dir.join(name);
        let fail = |e: std::io::Error| FlattenError::StagingFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        };
        fs::create_dir_all(&dir).map_err(fail)?;
        fs::write(&path, bytes).map_err(fail)?;
        Ok(path)
    }
}

/// Bucket a jar is grouped under
pub fn bucket_for(descriptor: &Descriptor) -> String {
    descriptor
        .id
        .clone()
        .unwrap_or_else(|| UNIDENTIFIED_BUCKET.to_string())
}

/// Directory name for a bucket; ids never escape the staging directory
fn bucket_dir_name(identifier: &str) -> String {
    let name: String = identifier
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    if name.is_empty() || name == "." || name == ".." {
        format!("_{name}")
    } else {
        name
    }
}
