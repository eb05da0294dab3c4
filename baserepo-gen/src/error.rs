//! Error types for `baserepo-gen`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the generation pipeline.
///
/// Every variant is fatal for the whole invocation. A requested type that no
/// parsed file declares is not an error; see [`crate::Outcome::NotFound`].
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The package directory could not be listed.
    #[error("cannot process directory {path}: {source}")]
    Directory {
        /// Directory that failed.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A source file is not valid Rust.
    #[error("parsing package: {path}:{line}:{column}: {message}")]
    Parse {
        /// File that failed to parse.
        path: Utf8PathBuf,
        /// One-based line of the offending token.
        line: usize,
        /// One-based column of the offending token.
        column: usize,
        /// Parser diagnostic.
        message: String,
    },

    /// Filtering left nothing to parse.
    #[error("{directory}: no buildable Rust source files")]
    NoSourceFiles {
        /// Directory (or `.` for explicit file lists) that was searched.
        directory: Utf8PathBuf,
    },

    /// Explicit files were spread across several module directories.
    #[error("source files must share one module directory: {first} and {other} differ")]
    MixedPackage {
        /// Directory of the first accepted file.
        first: Utf8PathBuf,
        /// Conflicting directory.
        other: Utf8PathBuf,
    },

    /// A type or module name cannot be used as a Rust identifier.
    #[error("invalid identifier '{name}': {reason}")]
    InvalidIdentifier {
        /// Offending name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The configured runtime crate does not parse as a path.
    #[error("runtime crate '{0}' is not a valid Rust path")]
    InvalidRuntimePath(String),

    /// Configuration layers could not be merged or extracted.
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// A path could not be represented as UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// The generated file could not be written.
    #[error("writing output {path}: {source}")]
    Write {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Any other filesystem failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
