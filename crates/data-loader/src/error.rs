//! Error types for artifact loading.

use thiserror::Error;

/// Errors that can occur while loading and validating the model artifacts.
///
/// Loading is all-or-nothing: any of these aborts startup, there is no
/// partial bundle.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// I/O error occurred while reading an artifact file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line in an artifact file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A matrix row had a different width than the rest of the file
    #[error("{file}: line {line} has {found} values, expected {expected}")]
    RaggedRow {
        file: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A flat buffer didn't match the declared matrix dimensions
    #[error("matrix dimensions {rows}x{cols} do not match buffer length {len}")]
    DimensionMismatch { rows: usize, cols: usize, len: usize },

    /// An artifact's row count disagrees with the catalog size
    #[error("{artifact} has {found} rows, expected {expected} (one per catalog item)")]
    RowCountMismatch {
        artifact: &'static str,
        expected: usize,
        found: usize,
    },

    /// The similarity matrix must be square over the catalog
    #[error("similarity matrix is {rows}x{cols}, expected {expected}x{expected}")]
    NotSquare {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    /// The catalog file contained no items
    #[error("catalog is empty")]
    EmptyCatalog,

    /// The feature matrix has no columns to fit against
    #[error("feature matrix has zero columns")]
    EmptyFeatures,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
