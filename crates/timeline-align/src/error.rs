//! Alignment Error Types

use thiserror::Error;

/// Errors during timeline alignment
#[derive(Debug, Clone, Error)]
pub enum AlignError {
    /// No samples to align; readers validate this before alignment runs
    #[error("cannot align an empty capture")]
    EmptyInput,

    /// Value rows and timestamp count differ
    #[error("{rows} value rows but {timestamps} timestamps")]
    LengthMismatch { rows: usize, timestamps: usize },

    /// Grid interval must be a positive number of seconds
    #[error("grid interval must be positive, got {0}")]
    InvalidInterval(f64),

    /// A raw timestamp is NaN or infinite and has no grid bucket
    #[error("timestamp at row {row} is not finite")]
    NonFiniteTimestamp { row: usize },
}
