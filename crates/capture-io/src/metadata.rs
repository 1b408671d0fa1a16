//! CSI Packet Metadata Reader

use std::path::Path;

use tracing::debug;

use crate::error::ReadError;
use crate::reader::{header_index, numeric_field, open_reader, record_line};

/// Header name of the per-packet timestamp column.
pub const FRAME_TIME_COLUMN: &str = "frame.time";

/// Read per-packet timestamps (seconds) from a CSI metadata CSV.
///
/// Rows are aligned by order with the magnitude file; the pairing is
/// validated by [`crate::CsiCapture::load`].
pub fn read_csi_timestamps(path: &Path) -> Result<Vec<f64>, ReadError> {
    let mut reader = open_reader(path, true)?;
    let headers = reader
        .headers()
        .map_err(|source| ReadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let time_idx = header_index(path, &headers, FRAME_TIME_COLUMN)?;

    let mut timestamps = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|source| ReadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record_line(&record, row as u64 + 2);
        timestamps.push(numeric_field(path, &record, time_idx, line)?);
    }

    if timestamps.is_empty() {
        return Err(ReadError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!("read {} packet timestamps from {}", timestamps.len(), path.display());
    Ok(timestamps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_capture_file;

    #[test]
    fn test_reads_frame_time_column() {
        let path = write_capture_file(
            "meta_basic.csv",
            "frame.number,frame.time\n1,0.105\n2,0.213\n",
        );
        let timestamps = read_csi_timestamps(&path).unwrap();
        assert_eq!(timestamps, vec![0.105, 0.213]);
    }

    #[test]
    fn test_missing_column_rejected() {
        let path = write_capture_file("meta_nocol.csv", "frame.number\n1\n");
        match read_csi_timestamps(&path) {
            Err(ReadError::MissingColumn { column, .. }) => {
                assert_eq!(column, FRAME_TIME_COLUMN);
            }
            other => panic!("expected missing-column error, got {other:?}"),
        }
    }

    #[test]
    fn test_header_only_is_empty() {
        let path = write_capture_file("meta_headeronly.csv", "frame.time\n");
        assert!(matches!(
            read_csi_timestamps(&path),
            Err(ReadError::Empty { .. })
        ));
    }
}
