//! Error types raised while reading inputs and writing results.

use camino::Utf8PathBuf;
use happystates_core::RegionError;
use thiserror::Error;

/// Errors raised while loading an input file.
///
/// Line numbers are one-based.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Opening or reading the file failed.
    #[error("failed to read {path}")]
    Read {
        /// Requested file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A line did not have the expected shape.
    #[error("{path}:{line}: {message}")]
    Malformed {
        /// File being parsed.
        path: Utf8PathBuf,
        /// Offending line.
        line: usize,
        /// What was wrong with it.
        message: String,
    },
    /// A numeric field could not be parsed.
    #[error("{path}:{line}: invalid {field} value {value:?}")]
    InvalidNumber {
        /// File being parsed.
        path: Utf8PathBuf,
        /// Offending line.
        line: usize,
        /// Name of the field.
        field: &'static str,
        /// Raw text of the field.
        value: String,
    },
    /// A post line was not valid JSON.
    #[error("{path}:{line}: malformed post")]
    Json {
        /// File being parsed.
        path: Utf8PathBuf,
        /// Offending line.
        line: usize,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The region document is not well-formed XML.
    #[error("{path}: malformed XML")]
    Xml {
        /// File being parsed.
        path: Utf8PathBuf,
        /// Source error from `roxmltree`, including the position.
        #[source]
        source: roxmltree::Error,
    },
    /// A boundary in the region file was rejected.
    #[error("{path}: invalid region")]
    Region {
        /// File being parsed.
        path: Utf8PathBuf,
        /// Source error from region validation.
        #[source]
        source: RegionError,
    },
}

/// Errors raised while writing output files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Creating the parent directory for the output file failed.
    #[error("failed to create parent directory {path}")]
    CreateParent {
        /// Path of the directory that could not be created.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Creating or writing the output file failed.
    #[error("failed to write {path}")]
    Write {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
}
