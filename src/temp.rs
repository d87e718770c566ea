//! Staging directory for a flattening run
//!
//! Staged jars live in a temporary directory that is never created under the
//! current working directory (e.g. when TMPDIR=tmp or TMPDIR=./tmp) and is
//! removed when the run ends, whether it succeeded or not.

use std::env;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{FlattenError, Result};

/// Returns a directory path suitable for creating temporary directories.
/// Never returns a relative path.
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// Create the staging directory for one run under `base`
pub fn create_staging_dir(base: &Path) -> Result<TempDir> {
    std::fs::create_dir_all(base).map_err(|e| FlattenError::StagingFailed {
        path: base.display().to_string(),
        reason: e.to_string(),
    })?;
    tempfile::Builder::new()
        .prefix(".removejij-")
        .tempdir_in(base)
        .map_err(|e| FlattenError::StagingFailed {
            path: base.display().to_string(),
            reason: e.to_string(),
        })
}
