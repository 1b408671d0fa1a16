//! CSI Magnitude File Reader

use std::path::Path;

use ndarray::Array2;
use tracing::debug;

use crate::error::ReadError;
use crate::reader::{numeric_field, open_reader, record_line};

/// CSI magnitude capture: one row per packet, one column per subcarrier.
#[derive(Debug, Clone)]
pub struct CsiMagnitude {
    /// Packet-by-subcarrier magnitude matrix
    pub matrix: Array2<f64>,
}

impl CsiMagnitude {
    /// Number of captured packets
    pub fn n_packets(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of subcarriers per packet
    pub fn n_subcarriers(&self) -> usize {
        self.matrix.ncols()
    }
}

/// Read a headerless CSI magnitude CSV.
///
/// The subcarrier count is fixed by the first row; a row of any other
/// width is a schema error.
pub fn read_csi_magnitude(path: &Path) -> Result<CsiMagnitude, ReadError> {
    let mut reader = open_reader(path, false)?;

    let mut values: Vec<f64> = Vec::new();
    let mut n_subcarriers = 0usize;
    let mut n_packets = 0usize;

    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|source| ReadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record_line(&record, row as u64 + 1);

        if n_packets == 0 {
            n_subcarriers = record.len();
        } else if record.len() != n_subcarriers {
            return Err(ReadError::RaggedRow {
                path: path.to_path_buf(),
                line,
                got: record.len(),
                expected: n_subcarriers,
            });
        }

        for idx in 0..record.len() {
            values.push(numeric_field(path, &record, idx, line)?);
        }
        n_packets += 1;
    }

    if n_packets == 0 {
        return Err(ReadError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!(
        "read {} packets x {} subcarriers from {}",
        n_packets,
        n_subcarriers,
        path.display()
    );

    let matrix = Array2::from_shape_vec((n_packets, n_subcarriers), values)
        .expect("row widths validated during parsing");
    Ok(CsiMagnitude { matrix })
}
