//! Run summary
//!
//! Aggregates what a run did once every mod id has been resolved: how many
//! candidates each mod id had, the warnings raised along the way, and the
//! total size before and after flattening.

use std::collections::BTreeMap;

use crate::extract::Candidate;
use crate::run::Run;
use crate::ui;

/// Number of rows in the duplication table
pub const TOP_DUPLICATES: usize = 20;

/// Final figures of a flattening run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Candidate count per mod id, highest first; ties keep id order
    pub counts: Vec<(String, usize)>,
    /// Warnings in the order they were raised
    pub warnings: Vec<String>,
    /// Bytes of the counted top-level inputs
    pub input_size: u64,
    /// Bytes of the emitted jars
    pub output_size: u64,
}

impl Summary {
    /// Collect the summary from the staged groups and the run
    pub fn collect(groups: &BTreeMap<String, Vec<Candidate>>, run: &Run) -> Self {
        let mut counts: Vec<(String, usize)> = groups
            .iter()
            .map(|(identifier, candidates)| (identifier.clone(), candidates.len()))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Self {
            counts,
            warnings: run.warnings().to_vec(),
            input_size: run.input_size(),
            output_size: run.output_size(),
        }
    }

    /// The mod ids with the most candidates
    pub fn top_duplicates(&self) -> &[(String, usize)] {
        &self.counts[..self.counts.len().min(TOP_DUPLICATES)]
    }

    /// Print the duplication table, the warnings and the size comparison
    pub fn print(&self) {
        ui::section(&format!(
            "Duplication Stats (Showing top {TOP_DUPLICATES} results)"
        ));
        for (identifier, count) in self.top_duplicates() {
            println!(" - {identifier} x{count}");
        }

        if !self.warnings.is_empty() {
            ui::section(&format!("You have {} warnings:", self.warnings.len()));
            for warning in &self.warnings {
                println!(" - {warning}");
            }
        }

        println!();
        println!(
            "Flattened {} to {}",
            format_size(self.input_size),
            format_size(self.output_size)
        );
    }
}

/// Format a byte count with 1024-based units and one decimal
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}
