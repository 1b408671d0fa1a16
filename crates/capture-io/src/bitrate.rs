//! Bitrate Metadata Reader

use std::path::Path;

use tracing::debug;

use crate::error::ReadError;
use crate::metadata::FRAME_TIME_COLUMN;
use crate::reader::{header_index, numeric_field, open_reader, record_line};

/// Header name of the packet-length column.
///
/// The trailing carriage return is literal: the capture export terminates
/// records with `\n` and leaves the `\r` inside the final header name. It
/// is part of the expected schema and is matched exactly.
pub const LENGTH_COLUMN: &str = "_ws.col.Length\r";

/// Per-packet bitrate trace: timestamps (seconds) and raw frame lengths
/// (bytes, header not yet subtracted).
#[derive(Debug, Clone)]
pub struct BitrateTrace {
    pub timestamps: Vec<f64>,
    pub lengths: Vec<f64>,
}

impl BitrateTrace {
    /// Number of captured packets
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the trace holds no packets
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Read a bitrate metadata CSV (`frame.time` + literal `_ws.col.Length\r`).
pub fn read_bitrate_trace(path: &Path) -> Result<BitrateTrace, ReadError> {
    let mut reader = open_reader(path, true)?;
    let headers = reader
        .headers()
        .map_err(|source| ReadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let time_idx = header_index(path, &headers, FRAME_TIME_COLUMN)?;
    let length_idx = header_index(path, &headers, LENGTH_COLUMN)?;

    let mut timestamps = Vec::new();
    let mut lengths = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|source| ReadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record_line(&record, row as u64 + 2);
        timestamps.push(numeric_field(path, &record, time_idx, line)?);
        lengths.push(numeric_field(path, &record, length_idx, line)?);
    }

    if timestamps.is_empty() {
        return Err(ReadError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!("read {} bitrate packets from {}", timestamps.len(), path.display());
    Ok(BitrateTrace { timestamps, lengths })
}
