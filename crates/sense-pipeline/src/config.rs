//! Pipeline Configuration

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use feature_engine::{JoinMode, WindowSpec};
use timeline_align::{Aggregation, AlignConfig, BitrateAlignConfig};

use crate::error::PipelineError;

/// Top-level pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Capture root containing the three capture directories
    pub base_folder: PathBuf,

    /// Grid interval in seconds
    pub interval: f64,

    /// Subcarriers retained per packet, evenly spread (`None` keeps all)
    pub subcarriers: Option<usize>,

    /// CSI bucket aggregation ("mean" or "first")
    pub aggregation: Aggregation,

    /// Header bytes subtracted from every frame length
    pub header_adjust: f64,

    /// CSI feature window
    pub csi_window: WindowSpec,

    /// Bitrate median window
    pub bitrate_window: WindowSpec,

    /// Join mode for the two feature series
    pub join: JoinMode,

    /// File set selector: 0 processes every matched set, t processes the
    /// t-th (1-indexed)
    pub file_set: usize,

    /// Directory for exported feature tables; unset logs summaries only
    pub output_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_folder: PathBuf::from("."),
            interval: 0.1,
            subcarriers: Some(12),
            aggregation: Aggregation::Mean,
            header_adjust: 34.0,
            csi_window: WindowSpec { size: 10, stride: 1 },
            bitrate_window: WindowSpec { size: 3, stride: 1 },
            join: JoinMode::Inner,
            file_set: 0,
            output_dir: None,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from an optional TOML file layered with
    /// `CSI_SENSE_*` environment overrides. Unknown enum values (for
    /// example an unsupported aggregation method) fail here, before any
    /// capture is touched.
    pub fn load(path: Option<&Path>) -> Result<Self, PipelineError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let merged = builder
            .add_source(Environment::with_prefix("CSI_SENSE"))
            .build()?;

        let config: PipelineConfig = merged.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(self.interval > 0.0) || !self.interval.is_finite() {
            return Err(PipelineError::InvalidConfig(format!(
                "interval must be a positive number of seconds, got {}",
                self.interval
            )));
        }
        if self.subcarriers == Some(0) {
            return Err(PipelineError::InvalidConfig(
                "subcarriers must be at least 1 when set".to_string(),
            ));
        }
        for (name, window) in [("csi_window", self.csi_window), ("bitrate_window", self.bitrate_window)] {
            if !window.is_valid() {
                return Err(PipelineError::InvalidConfig(format!(
                    "{name} size and stride must be positive, got {}/{}",
                    window.size, window.stride
                )));
            }
        }
        Ok(())
    }

    /// CSI alignment settings derived from this configuration
    pub fn align_config(&self) -> AlignConfig {
        AlignConfig {
            interval: self.interval,
            subcarriers: self.subcarriers,
            aggregation: self.aggregation,
        }
    }

    /// Bitrate alignment settings derived from this configuration
    pub fn bitrate_align_config(&self) -> BitrateAlignConfig {
        BitrateAlignConfig {
            interval: self.interval,
            header_adjust: self.header_adjust,
        }
    }
}
