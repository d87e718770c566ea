//! Error types and handling for jarflat
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//! Only fatal conditions are represented here; unreadable metadata and
//! unparseable versions degrade to absent values at the point of use.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for flattening operations
#[derive(Error, Diagnostic, Debug)]
pub enum FlattenError {
    // Precondition errors
    #[error("Output directory already exists: {path}")]
    #[diagnostic(
        code(jarflat::output::exists),
        help("Remove or rename the existing output directory, or pass a different --output")
    )]
    OutputExists { path: String },

    #[error("Input directory not found: {path}")]
    #[diagnostic(
        code(jarflat::input::not_found),
        help("Pass the directory that contains the jars to flatten")
    )]
    InputNotFound { path: String },

    // Archive errors
    #[error("Failed to load jar: {name}: {reason}")]
    #[diagnostic(
        code(jarflat::archive::malformed),
        help("Check that the file is a valid jar (zip) archive")
    )]
    MalformedArchive { name: String, reason: String },

    #[error("Failed to remove nested jars from {path}: {reason}")]
    #[diagnostic(code(jarflat::archive::rewrite_failed))]
    RewriteFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to stage jar: {path}: {reason}")]
    #[diagnostic(code(jarflat::fs::staging_failed))]
    StagingFailed { path: String, reason: String },

    #[error("Failed to write output file: {path}: {reason}")]
    #[diagnostic(code(jarflat::fs::write_failed))]
    OutputWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(jarflat::fs::io_error))]
    IoError { message: String },
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, FlattenError>;
