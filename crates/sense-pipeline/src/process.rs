//! Per-Set Processing
//!
//! Runs one capture set through the full pipeline:
//! read → align → fill → extract → join.

use tracing::{debug, warn};

use capture_io::{read_bitrate_trace, CsiCapture};
use feature_engine::{
    csi_feature_extraction, join_features, median_filter_bitrate, FeatureSeries, JoinedFeatures,
};
use timeline_align::{align_bitrate, align_csi_magnitude, fill_missing_bitrate, fill_missing_csi};

use crate::config::PipelineConfig;
use crate::discover::CaptureSet;
use crate::error::ProcessError;

/// Process one capture set into its joined feature table.
///
/// Any failure aborts only this set; the caller decides whether to
/// continue with the next one.
pub fn process_set(
    config: &PipelineConfig,
    set: &CaptureSet,
) -> Result<JoinedFeatures, ProcessError> {
    let capture = CsiCapture::load(&set.csi_magnitude_path, &set.csi_metadata_path)?;
    let trace = read_bitrate_trace(&set.bitrate_path)?;

    let mut csi_aligned =
        align_csi_magnitude(capture.magnitude.view(), &capture.timestamps, &config.align_config())?;
    fill_missing_csi(&mut csi_aligned);

    let mut bitrate_aligned =
        align_bitrate(&trace.timestamps, &trace.lengths, &config.bitrate_align_config())?;
    fill_missing_bitrate(&mut bitrate_aligned);

    let csi_features = csi_feature_extraction(&csi_aligned, config.csi_window)?;
    let bitrate_median = median_filter_bitrate(&bitrate_aligned, config.bitrate_window)?;
    log_preview(&csi_features);
    log_preview(&bitrate_median);

    let joined = join_features(&csi_features, &bitrate_median, config.join);
    if joined.is_empty() && !csi_features.is_empty() && !bitrate_median.is_empty() {
        // Exact-match joins only line up when both series came off the
        // same grid; an empty result here usually means the two signals
        // were aligned at different intervals.
        warn!(
            "join of {} CSI and {} bitrate feature rows produced no rows",
            csi_features.len(),
            bitrate_median.len()
        );
    }
    Ok(joined)
}

fn log_preview(series: &FeatureSeries) {
    let head: Vec<(f64, f64)> = series
        .timestamps
        .iter()
        .copied()
        .zip(series.values.iter().copied())
        .take(5)
        .collect();
    debug!("{} head: {:?} ({} rows)", series.name, head, series.len());
}
