//! Run configuration
//!
//! The well-known names used to recognize mods inside jars, and the
//! directories a single flattening run reads from and writes to.

use std::path::PathBuf;

/// Suffix that marks an archive entry as a nested jar
pub const NESTED_JAR_SUFFIX: &str = ".jar";

/// Mod metadata entry at the root of a jar
pub const MOD_METADATA_ENTRY: &str = "fabric.mod.json";

/// Metadata key that declares nested jars
pub const NESTED_JARS_KEY: &str = "jars";

/// Entry that excludes a top-level jar from flattening entirely
pub const EXCLUDE_MARKER_ENTRY: &str = ".modpacks-flatter-exclude";

/// Bucket for jars without a readable mod id
pub const UNIDENTIFIED_BUCKET: &str = "invalid";

/// Default output directory name, created inside the input directory
pub const DEFAULT_OUTPUT_DIR: &str = "flattenedMods";

/// Directories used by one flattening run
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    /// Directory holding the top-level jars
    pub input_dir: PathBuf,
    /// Directory that receives the flattened jars; must not exist yet
    pub output_dir: PathBuf,
    /// Parent directory for the temporary staging area
    pub staging_base: PathBuf,
}

impl FlattenConfig {
    /// Build a configuration, filling in defaults for unset directories
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: Option<PathBuf>,
        staging_base: Option<PathBuf>,
    ) -> Self {
        let input_dir = input_dir.into();
        let output_dir = output_dir.unwrap_or_else(|| input_dir.join(DEFAULT_OUTPUT_DIR));
        let staging_base = staging_base.unwrap_or_else(crate::temp::temp_dir_base);
        Self {
            input_dir,
            output_dir,
            staging_base,
        }
    }

    /// Whether a top-level file name looks like a jar
    pub fn is_jar_name(name: &str) -> bool {
        name.ends_with(NESTED_JAR_SUFFIX)
    }
}
