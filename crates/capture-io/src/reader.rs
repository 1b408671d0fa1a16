//! Shared CSV Reader Plumbing

use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord, Terminator};

use crate::error::ReadError;

/// Open a capture CSV.
///
/// Records terminate on `\n` only: capture exports carry CRLF line endings
/// and the carriage return is part of the final field (and, in the bitrate
/// header, part of the column name). Numeric parsing trims it back off.
pub(crate) fn open_reader(path: &Path, has_headers: bool) -> Result<Reader<std::fs::File>, ReadError> {
    ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(|source| ReadError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

/// Index of `column` in the header row, matched exactly (no trimming).
pub(crate) fn header_index(
    path: &Path,
    headers: &StringRecord,
    column: &str,
) -> Result<usize, ReadError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| ReadError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

/// Parse field `idx` of `record` as `f64`, trimming stray whitespace.
pub(crate) fn numeric_field(
    path: &Path,
    record: &StringRecord,
    idx: usize,
    line: u64,
) -> Result<f64, ReadError> {
    let raw = record.get(idx).unwrap_or("");
    raw.trim().parse::<f64>().map_err(|_| ReadError::NonNumeric {
        path: path.to_path_buf(),
        line,
        value: raw.to_string(),
    })
}

/// Line number of a record, for diagnostics.
pub(crate) fn record_line(record: &StringRecord, fallback: u64) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(fallback)
}
