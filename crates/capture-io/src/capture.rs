//! Validated CSI Capture Pair

use std::path::Path;

use ndarray::Array2;

use crate::error::ReadError;
use crate::magnitude::read_csi_magnitude;
use crate::metadata::read_csi_timestamps;

/// A CSI capture with its magnitude matrix and row-aligned timestamps.
#[derive(Debug, Clone)]
pub struct CsiCapture {
    /// Packet-by-subcarrier magnitude matrix
    pub magnitude: Array2<f64>,
    /// Per-packet timestamps in seconds, one per matrix row
    pub timestamps: Vec<f64>,
}

impl CsiCapture {
    /// Load and cross-validate a magnitude/metadata file pair.
    ///
    /// The two files pair rows by order; differing packet counts mean the
    /// files do not belong to the same capture.
    pub fn load(magnitude_path: &Path, metadata_path: &Path) -> Result<Self, ReadError> {
        let magnitude = read_csi_magnitude(magnitude_path)?;
        let timestamps = read_csi_timestamps(metadata_path)?;

        if magnitude.n_packets() != timestamps.len() {
            return Err(ReadError::RowCountMismatch {
                magnitude_rows: magnitude.n_packets(),
                metadata_rows: timestamps.len(),
            });
        }

        Ok(Self {
            magnitude: magnitude.matrix,
            timestamps,
        })
    }

    /// Number of captured packets
    pub fn n_packets(&self) -> usize {
        self.timestamps.len()
    }
}
