//! Progress bar display while stripping staged jars

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for the stripping step
pub struct ProgressDisplay {
    jar_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total staged jar count
    pub fn new(total_jars: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let jar_pb = ProgressBar::new(total_jars);
        jar_pb.set_style(style);
        Self { jar_pb }
    }

    /// Show the jar currently being stripped
    pub fn update_jar(&self, jar_name: &str) {
        // Truncate long names for display
        let display_name = if jar_name.chars().count() > 50 {
            let tail: String = jar_name
                .chars()
                .rev()
                .take(47)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("...{tail}")
        } else {
            jar_name.to_string()
        };
        self.jar_pb.set_message(display_name);
    }

    /// Increment jar progress
    pub fn inc_jar(&self) {
        self.jar_pb.inc(1);
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        self.jar_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.jar_pb.abandon();
    }
}
