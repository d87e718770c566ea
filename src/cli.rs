//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

use crate::config::FlattenConfig;

/// Jarflat - jar-in-jar flattener
///
/// Extracts every jar nested inside the jars of a mods directory and writes a
/// flat, deduplicated set of jars to an output directory.
#[derive(Parser, Debug)]
#[command(
    name = "jarflat",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Flatten jar-in-jar mods into a deduplicated set of jars",
    long_about = "Jarflat extracts all jars nested inside the jars of a directory, strips the \
                  nested jars from every copy, and keeps a single jar per mod id, preferring \
                  standalone copies and then the highest semantic version.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  jarflat\n    \
                  jarflat ./mods\n    \
                  jarflat ./mods --output ./flat\n    \
                  jarflat ./mods --verbose"
)]
pub struct Cli {
    /// Directory holding the top-level jars
    #[arg(default_value = ".", env = "JARFLAT_INPUT")]
    pub input: PathBuf,

    /// Output directory; must not exist yet (defaults to <INPUT>/flattenedMods)
    #[arg(long, short = 'o', env = "JARFLAT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Directory under which the staging directory is created (defaults to the system temp dir)
    #[arg(long, value_name = "DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Build the run configuration from the parsed arguments
    pub fn into_config(self) -> FlattenConfig {
        FlattenConfig::new(self.input, self.output, self.staging_dir)
    }
}
