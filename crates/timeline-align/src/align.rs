//! Timeline Aligner
//!
//! Buckets raw samples onto a uniform grid by rounding each timestamp to
//! the nearest grid point (ties to even, the rounding the capture tooling
//! uses). Every grid point between the rounded minimum and maximum is
//! present in the output, carrying either an aggregate of the samples
//! that rounded to it or the missing marker.

use std::collections::HashMap;

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AlignError;
use crate::table::{AlignedTable, Column, MISSING};

/// Column-name prefix of CSI magnitude columns.
pub const SUBCARRIER_PREFIX: &str = "subcarrier_";

/// Column name of aggregated payload bytes.
pub const BITRATE_COLUMN: &str = "bitrate_bytes";

/// Aggregation for CSI samples sharing a grid bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Arithmetic mean per column of every sample in the bucket
    Mean,
    /// First sample in original row order
    First,
}

/// CSI alignment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Grid interval in seconds
    pub interval: f64,
    /// Subcarriers to retain, evenly spread over the index range
    /// (`None` keeps all)
    pub subcarriers: Option<usize>,
    /// Bucket aggregation method
    pub aggregation: Aggregation,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            interval: 0.1,
            subcarriers: None,
            aggregation: Aggregation::Mean,
        }
    }
}

/// Bitrate alignment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitrateAlignConfig {
    /// Grid interval in seconds
    pub interval: f64,
    /// Header bytes subtracted from every frame length; negative payloads
    /// are kept, not clamped
    pub header_adjust: f64,
}

impl Default for BitrateAlignConfig {
    fn default() -> Self {
        Self {
            interval: 0.1,
            header_adjust: 34.0,
        }
    }
}

/// Grid bucket of a raw timestamp: `round(t / interval)`, ties to even.
fn bucket_index(timestamp: f64, interval: f64) -> i64 {
    (timestamp / interval).round_ties_even() as i64
}

/// Grid label of a bucket. Labels derived this way are bit-identical
/// across signals aligned at the same interval, so downstream joins can
/// compare them exactly.
fn bucket_label(index: i64, interval: f64) -> f64 {
    index as f64 * interval
}

fn validate(interval: f64, n_rows: usize, timestamps: &[f64]) -> Result<(), AlignError> {
    if !(interval > 0.0) || !interval.is_finite() {
        return Err(AlignError::InvalidInterval(interval));
    }
    if timestamps.is_empty() {
        return Err(AlignError::EmptyInput);
    }
    if n_rows != timestamps.len() {
        return Err(AlignError::LengthMismatch {
            rows: n_rows,
            timestamps: timestamps.len(),
        });
    }
    if let Some(row) = timestamps.iter().position(|t| !t.is_finite()) {
        return Err(AlignError::NonFiniteTimestamp { row });
    }
    Ok(())
}

/// Evenly spread `target` indices over `[0, total - 1]`.
///
/// Linear interpolation truncated to integers, both endpoints kept.
/// Duplicate indices are possible at small ratios and are deliberately
/// not deduplicated.
fn select_subcarriers(total: usize, target: usize) -> Vec<usize> {
    if target == 0 {
        return Vec::new();
    }
    if target == 1 {
        return vec![0];
    }
    let span = (total - 1) as f64;
    (0..target)
        .map(|i| (span * i as f64 / (target - 1) as f64) as usize)
        .collect()
}

/// Align raw CSI magnitudes on the uniform grid.
///
/// `magnitude` rows pair with `timestamps` by index. The output grid runs
/// from the rounded minimum to the rounded maximum timestamp inclusive;
/// buckets no sample rounded to hold the missing marker in every
/// subcarrier column.
pub fn align_csi_magnitude(
    magnitude: ArrayView2<'_, f64>,
    timestamps: &[f64],
    config: &AlignConfig,
) -> Result<AlignedTable, AlignError> {
    validate(config.interval, magnitude.nrows(), timestamps)?;

    let total = magnitude.ncols();
    let selected: Vec<usize> = match config.subcarriers {
        Some(target) if target < total => select_subcarriers(total, target),
        _ => (0..total).collect(),
    };
    let width = selected.len();

    // Per-bucket accumulation in original row order.
    let mut sums: HashMap<i64, Vec<f64>> = HashMap::new();
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for (row, &t) in timestamps.iter().enumerate() {
        let bucket = bucket_index(t, config.interval);
        match config.aggregation {
            Aggregation::Mean => {
                let entry = sums.entry(bucket).or_insert_with(|| vec![0.0; width]);
                for (slot, &col) in selected.iter().enumerate() {
                    entry[slot] += magnitude[[row, col]];
                }
                *counts.entry(bucket).or_insert(0) += 1;
            }
            Aggregation::First => {
                sums.entry(bucket).or_insert_with(|| {
                    selected.iter().map(|&col| magnitude[[row, col]]).collect()
                });
            }
        }
    }

    let first_bucket = timestamps
        .iter()
        .map(|&t| bucket_index(t, config.interval))
        .min()
        .ok_or(AlignError::EmptyInput)?;
    let last_bucket = timestamps
        .iter()
        .map(|&t| bucket_index(t, config.interval))
        .max()
        .ok_or(AlignError::EmptyInput)?;

    let n_rows = (last_bucket - first_bucket + 1) as usize;
    let mut grid = Vec::with_capacity(n_rows);
    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(n_rows); width];

    for bucket in first_bucket..=last_bucket {
        grid.push(bucket_label(bucket, config.interval));
        match sums.get(&bucket) {
            Some(values) => {
                let divisor = match config.aggregation {
                    Aggregation::Mean => counts[&bucket] as f64,
                    Aggregation::First => 1.0,
                };
                for (slot, &v) in values.iter().enumerate() {
                    columns[slot].push(v / divisor);
                }
            }
            None => {
                for column in &mut columns {
                    column.push(MISSING);
                }
            }
        }
    }

    debug!(
        "aligned {} packets onto {} grid rows ({} subcarriers)",
        timestamps.len(),
        n_rows,
        width
    );

    let columns = columns
        .into_iter()
        .enumerate()
        .map(|(i, values)| Column::new(format!("{SUBCARRIER_PREFIX}{i}"), values))
        .collect();
    Ok(AlignedTable::new(grid, columns))
}

/// Align a bitrate trace on the uniform grid.
///
/// Each frame length has `header_adjust` subtracted before the per-bucket
/// sum; buckets with no frames hold the missing marker (zero-filling is
/// the gap filler's job, after alignment).
pub fn align_bitrate(
    timestamps: &[f64],
    lengths: &[f64],
    config: &BitrateAlignConfig,
) -> Result<AlignedTable, AlignError> {
    validate(config.interval, lengths.len(), timestamps)?;

    let mut sums: HashMap<i64, f64> = HashMap::new();
    for (&t, &len) in timestamps.iter().zip(lengths) {
        let bucket = bucket_index(t, config.interval);
        *sums.entry(bucket).or_insert(0.0) += len - config.header_adjust;
    }

    let buckets = timestamps
        .iter()
        .map(|&t| bucket_index(t, config.interval));
    let first_bucket = buckets.clone().min().ok_or(AlignError::EmptyInput)?;
    let last_bucket = buckets.max().ok_or(AlignError::EmptyInput)?;

    let n_rows = (last_bucket - first_bucket + 1) as usize;
    let mut grid = Vec::with_capacity(n_rows);
    let mut payload = Vec::with_capacity(n_rows);
    for bucket in first_bucket..=last_bucket {
        grid.push(bucket_label(bucket, config.interval));
        payload.push(sums.get(&bucket).copied().unwrap_or(MISSING));
    }

    debug!(
        "aligned {} frames onto {} grid rows",
        timestamps.len(),
        n_rows
    );

    Ok(AlignedTable::new(
        grid,
        vec![Column::new(BITRATE_COLUMN, payload)],
    ))
}
