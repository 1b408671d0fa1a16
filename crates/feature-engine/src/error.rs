//! Feature Extraction Error Types

use thiserror::Error;

/// Errors during feature extraction
#[derive(Debug, Clone, Error)]
pub enum FeatureError {
    /// The aligned table lacks the column a reducer requires
    #[error("aligned table has no {0:?} column")]
    MissingColumn(&'static str),

    /// The aligned table has no subcarrier columns
    #[error("aligned table has no subcarrier columns")]
    NoSubcarriers,

    /// Window size and stride must both be positive
    #[error("window size and stride must be positive, got {size}/{stride}")]
    InvalidWindow { size: usize, stride: usize },
}
