//! Per-invocation run context
//!
//! A [`Run`] owns everything that lives exactly as long as one flattening
//! invocation: the token that separates lineage text from real file names in
//! staged jar names, the ordered warning list, and the size totals.

use uuid::Uuid;

/// Separator between jar names in a lineage chain
pub const LINEAGE_SEPARATOR: &str = " -> ";

/// Context threaded through every step of one flattening run
#[derive(Debug)]
pub struct Run {
    token: String,
    warnings: Vec<String>,
    input_size: u64,
    output_size: u64,
}

impl Run {
    /// Start a run with a fresh random token
    pub fn new() -> Self {
        Self::with_token(Uuid::new_v4().simple().to_string())
    }

    /// Start a run with a fixed token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            warnings: Vec::new(),
            input_size: 0,
            output_size: 0,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Record a warning; warnings are kept in the order they were raised
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn add_input_size(&mut self, bytes: u64) {
        self.input_size += bytes;
    }

    pub fn add_output_size(&mut self, bytes: u64) {
        self.output_size += bytes;
    }

    pub fn input_size(&self) -> u64 {
        self.input_size
    }

    pub fn output_size(&self) -> u64 {
        self.output_size
    }

    /// Staged file name for a nested jar.
    ///
    /// `sequence` numbers the entry among everything staged from the same
    /// top-level jar, so entries sharing a file name in different directories
    /// stay apart. `container_lineage` is the rendered chain of the jar that
    /// contains the entry, outermost first (e.g. `"a.jar -> b.jar"`).
    pub fn staged_name(
        &self,
        container_time: i64,
        entry_time: i64,
        sequence: usize,
        container_lineage: &str,
        file_name: &str,
    ) -> String {
        format!(
            "{container_time} {entry_time} {sequence} {container_lineage}{LINEAGE_SEPARATOR}{} {file_name}",
            self.token
        )
    }

    /// The real file name of a staged jar, without its lineage prefix
    pub fn strip_lineage<'a>(&self, staged_name: &'a str) -> &'a str {
        match staged_name.find(&self.token) {
            Some(index) => {
                let rest = &staged_name[index + self.token.len()..];
                rest.strip_prefix(' ').unwrap_or(rest)
            }
            None => staged_name,
        }
    }

    /// Nesting depth encoded in a staged jar name; 0 for top-level jars
    pub fn depth_of(&self, staged_name: &str) -> usize {
        match staged_name.find(&self.token) {
            Some(index) => staged_name[..index].matches(LINEAGE_SEPARATOR).count(),
            None => 0,
        }
    }
}

impl Default for Run {
    fn default() -> Self {
        Self::new()
    }
}
