//! Capture Read Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading raw capture files
#[derive(Debug, Error)]
pub enum ReadError {
    /// CSV-level failure (I/O or malformed structure)
    #[error("failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row
    #[error("{}: missing required column {column:?}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A field failed numeric parsing
    #[error("{}: non-numeric value {value:?} at line {line}", path.display())]
    NonNumeric {
        path: PathBuf,
        line: u64,
        value: String,
    },

    /// A magnitude row width differs from the first row
    #[error("{}: line {line} has {got} columns, expected {expected}", path.display())]
    RaggedRow {
        path: PathBuf,
        line: u64,
        got: usize,
        expected: usize,
    },

    /// The file contains no data rows
    #[error("{}: capture contains no samples", path.display())]
    Empty { path: PathBuf },

    /// Magnitude and metadata files disagree on packet count
    #[error("magnitude file has {magnitude_rows} packets but metadata has {metadata_rows}")]
    RowCountMismatch {
        magnitude_rows: usize,
        metadata_rows: usize,
    },
}
