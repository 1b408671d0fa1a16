//! CSI Sense Pipeline
//!
//! Offline orchestration of the capture-to-features pipeline: discovers
//! matched capture sets under a capture root, runs each selected set
//! through read → align → fill → extract → join, and hands the joined
//! feature table to a sink. A failing set is logged and skipped; the run
//! carries on with the next one.

mod config;
mod discover;
mod error;
mod process;
mod sink;

pub use crate::config::PipelineConfig;
pub use discover::{
    capture_segment, discover_sets, CaptureSet, BR_METADATA_DIR, CSI_MAGNITUDE_DIR,
    CSI_METADATA_DIR,
};
pub use error::{PipelineError, ProcessError, SinkError};
pub use process::process_set;
pub use sink::{CsvSink, FeatureSink, SummarySink};

use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Outcome counts for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Sets processed and presented
    pub processed: usize,
    /// Sets aborted by a read, alignment, extraction, or sink failure
    pub failed: usize,
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Process every selected capture set under the configured root.
///
/// Fatal errors (bad configuration, missing capture directories, a
/// selector beyond the matched sets) abort the run; everything else is a
/// per-set failure that only increments the report's failure count.
pub fn run(config: &PipelineConfig, sink: &mut dyn FeatureSink) -> Result<RunReport, PipelineError> {
    config.validate()?;

    let sets = discover_sets(&config.base_folder)?;
    if sets.is_empty() {
        warn!("no matched capture sets under {}", config.base_folder.display());
        return Ok(RunReport::default());
    }
    info!("{} matched capture sets", sets.len());

    let selected: Vec<&CaptureSet> = match config.file_set {
        0 => sets.iter().collect(),
        t if t <= sets.len() => vec![&sets[t - 1]],
        t => {
            return Err(PipelineError::SetOutOfRange {
                selected: t,
                available: sets.len(),
            })
        }
    };

    let mut report = RunReport::default();
    for set in selected {
        info!("processing capture set {}", set.segment);
        let outcome = process_set(config, set)
            .map_err(SetFailure::Process)
            .and_then(|joined| {
                sink.present(&set.segment, &joined)
                    .map_err(SetFailure::Sink)
            });
        match outcome {
            Ok(()) => report.processed += 1,
            Err(failure) => {
                error!("capture set {} failed: {}", set.segment, failure);
                report.failed += 1;
            }
        }
    }

    info!(
        "run complete: {} processed, {} failed",
        report.processed, report.failed
    );
    Ok(report)
}

/// Either stage of a per-set failure, for one log line
#[derive(Debug, thiserror::Error)]
enum SetFailure {
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}
