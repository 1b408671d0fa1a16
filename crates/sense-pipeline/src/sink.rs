//! Feature Sinks
//!
//! The pipeline's contract ends at handing a joined feature table to a
//! sink. Chart rendering lives behind this seam and out of this crate;
//! the shipped sinks export the table as CSV or log a summary of it.

use std::path::PathBuf;

use tracing::info;

use feature_engine::JoinedFeatures;
use timeline_align::is_missing;

use crate::error::SinkError;

/// Receiver of joined feature tables, one call per capture set.
pub trait FeatureSink {
    /// Present one joined feature table; `label` identifies the set.
    fn present(&mut self, label: &str, features: &JoinedFeatures) -> Result<(), SinkError>;
}

/// Writes one `<label>_features.csv` per capture set.
pub struct CsvSink {
    output_dir: PathBuf,
}

impl CsvSink {
    /// Create a sink writing into `output_dir` (created on first use).
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }
}

impl FeatureSink for CsvSink {
    fn present(&mut self, label: &str, features: &JoinedFeatures) -> Result<(), SinkError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| SinkError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.output_dir.join(format!("{label}_features.csv"));
        let mut writer =
            csv::Writer::from_path(&path).map_err(|source| write_error(&path, source))?;

        writer
            .write_record(["timestamp", "csi_feature", "bitrate_median"])
            .map_err(|source| write_error(&path, source))?;
        for i in 0..features.len() {
            writer
                .write_record([
                    format_cell(features.timestamps[i]),
                    format_cell(features.csi_feature[i]),
                    format_cell(features.bitrate_median[i]),
                ])
                .map_err(|source| write_error(&path, source))?;
        }
        writer
            .flush()
            .map_err(|source| write_error(&path, csv::Error::from(source)))?;

        info!("wrote {} feature rows to {}", features.len(), path.display());
        Ok(())
    }
}

fn write_error(path: &std::path::Path, source: csv::Error) -> SinkError {
    SinkError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Empty field for missing cells, plain decimal otherwise.
fn format_cell(value: f64) -> String {
    if is_missing(value) {
        String::new()
    } else {
        value.to_string()
    }
}

/// Logs a per-set summary instead of writing files.
#[derive(Debug, Default)]
pub struct SummarySink;

impl FeatureSink for SummarySink {
    fn present(&mut self, label: &str, features: &JoinedFeatures) -> Result<(), SinkError> {
        if features.is_empty() {
            info!("{label}: joined feature table is empty");
            return Ok(());
        }

        let span = features.timestamps[features.len() - 1] - features.timestamps[0];
        let csi = SeriesStats::compute(&features.csi_feature);
        let bitrate = SeriesStats::compute(&features.bitrate_median);
        info!(
            "{label}: {} rows over {:.1}s; csi_feature mean={:.2} std={:.2} min={:.2} max={:.2}; \
             bitrate_median mean={:.1} std={:.1} min={:.1} max={:.1}",
            features.len(),
            span,
            csi.mean,
            csi.std_dev,
            csi.min,
            csi.max,
            bitrate.mean,
            bitrate.std_dev,
            bitrate.min,
            bitrate.max
        );
        Ok(())
    }
}

/// Summary statistics over the non-missing values of a series
#[derive(Debug, Clone, Copy, Default)]
struct SeriesStats {
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
}

impl SeriesStats {
    fn compute(values: &[f64]) -> Self {
        let known: Vec<f64> = values.iter().copied().filter(|v| !is_missing(*v)).collect();
        if known.is_empty() {
            return Self::default();
        }

        let n = known.len() as f64;
        let mean = known.iter().sum::<f64>() / n;
        let variance = known.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        let min = known.iter().cloned().fold(f64::MAX, f64::min);
        let max = known.iter().cloned().fold(f64::MIN, f64::max);
        Self {
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        }
    }
}
