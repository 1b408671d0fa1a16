//! Pipeline Error Types

use std::path::PathBuf;
use thiserror::Error;

use capture_io::ReadError;
use feature_engine::FeatureError;
use timeline_align::AlignError;

/// Fatal orchestration errors: bad configuration or an unusable capture root
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration could not be loaded or parsed
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A configuration value the pipeline cannot run with
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A capture directory is missing from the capture root
    #[error("capture directory {} does not exist", .0.display())]
    MissingDirectory(PathBuf),

    /// Listing a capture directory failed
    #[error("failed to list {}: {source}", path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The selected file set is beyond the number of matched sets
    #[error("file_set is {selected} but only {available} matched sets exist")]
    SetOutOfRange { selected: usize, available: usize },
}

/// Per-set failures: these abort one capture set, never the run
#[derive(Debug, Error)]
pub enum ProcessError {
    /// A capture file could not be read or failed schema validation
    #[error(transparent)]
    Read(#[from] ReadError),

    /// Timeline alignment rejected the capture
    #[error(transparent)]
    Align(#[from] AlignError),

    /// Feature extraction rejected the aligned table
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// Sink write failures
#[derive(Debug, Error)]
pub enum SinkError {
    /// Output directory could not be created
    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the feature table failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
