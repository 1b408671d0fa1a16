//! CSI Sense Pipeline - Main Entry Point

use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use sense_pipeline::{init_logging, run, CsvSink, FeatureSink, PipelineConfig, SummarySink};

fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== CSI Sense Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = PipelineConfig::load(config_path.as_deref())
        .context("failed to load pipeline configuration")?;
    info!("capture root: {}", config.base_folder.display());

    let mut sink: Box<dyn FeatureSink> = match &config.output_dir {
        Some(dir) => Box::new(CsvSink::new(dir.clone())),
        None => Box::new(SummarySink),
    };

    run(&config, sink.as_mut()).context("pipeline run failed")?;
    Ok(())
}
