//! Jarflat - jar-in-jar flattener
//!
//! Turns a directory of mod jars, some of which embed further jars, into a
//! flat directory holding one jar per mod id with every embedded jar removed.

use clap::Parser;
use env_logger::Env;

mod archive;
mod cli;
mod config;
mod error;
mod extract;
mod flatten;
mod progress;
mod report;
mod resolver;
mod run;
mod temp;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::Cli;

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.into_config();
    log::debug!(
        "Flattening {} into {}",
        config.input_dir.display(),
        config.output_dir.display()
    );

    if let Err(e) = flatten::flatten(&config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
