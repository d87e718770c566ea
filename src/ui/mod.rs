//! Console output for a flattening run
//!
//! Decisions are printed as they are made, one line each, prefixed with
//! their level. Colors come from `console` and are dropped automatically
//! when stdout is not a terminal.

use console::Style;

use crate::resolver::Selection;

/// Print an informational line
pub fn info(message: &str) {
    println!("{} {message}", Style::new().green().apply_to("[INFO]"));
}

/// Print a warning line
pub fn warn(message: &str) {
    println!("{} {message}", Style::new().yellow().apply_to("[WARN]"));
}

/// Print an error line
pub fn error(message: &str) {
    println!("{} {message}", Style::new().red().bold().apply_to("[ERROR]"));
}

/// Print a step header surrounded by blank lines
pub fn step(title: &str) {
    println!();
    println!("{}", Style::new().bold().apply_to(title));
    println!();
}

/// Print a section title preceded by a blank line
pub fn section(title: &str) {
    println!();
    println!("{}", Style::new().bold().apply_to(title));
}

/// Print the outcome of resolving one mod id at its level
pub fn selection(selection: &Selection<'_>) {
    if selection.is_warning() {
        warn(&selection.message);
    } else if selection.winner.is_none() {
        error(&selection.message);
    } else {
        info(&selection.message);
    }
}
