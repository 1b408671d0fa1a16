//! Feature Series Join
//!
//! Merges the two derived series on exact timestamp equality. Upstream
//! timestamps come from one grid-rounding rule, so equality is exact when
//! both pipelines ran at the same interval; if the intervals disagree the
//! join silently comes back empty or sparse, and that is the caller's
//! signal to check its configuration — the join does not paper over it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use timeline_align::MISSING;

use crate::features::FeatureSeries;

/// Join mode for merging the two feature series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    /// Keep only timestamps present in both series
    Inner,
    /// Keep timestamps present in either series; the absent side carries
    /// the missing marker
    #[default]
    Outer,
}

/// Joined per-timestamp feature rows, ascending by timestamp.
#[derive(Debug, Clone, Default)]
pub struct JoinedFeatures {
    pub timestamps: Vec<f64>,
    pub csi_feature: Vec<f64>,
    pub bitrate_median: Vec<f64>,
}

impl JoinedFeatures {
    /// Number of joined rows
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the join produced no rows
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    fn push(&mut self, timestamp: f64, csi: f64, bitrate: f64) {
        self.timestamps.push(timestamp);
        self.csi_feature.push(csi);
        self.bitrate_median.push(bitrate);
    }
}

/// Join the CSI feature series with the bitrate median series.
///
/// Both inputs are sorted ascending before the merge; within one series
/// the grid-derived timestamps are unique. The result is sorted ascending
/// by timestamp.
pub fn join_features(
    csi: &FeatureSeries,
    bitrate: &FeatureSeries,
    mode: JoinMode,
) -> JoinedFeatures {
    let left = sorted_pairs(csi);
    let right = sorted_pairs(bitrate);

    let mut joined = JoinedFeatures::default();
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        let (lt, lv) = left[i];
        let (rt, rv) = right[j];
        match lt.total_cmp(&rt) {
            std::cmp::Ordering::Equal => {
                joined.push(lt, lv, rv);
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => {
                if mode == JoinMode::Outer {
                    joined.push(lt, lv, MISSING);
                }
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                if mode == JoinMode::Outer {
                    joined.push(rt, MISSING, rv);
                }
                j += 1;
            }
        }
    }
    if mode == JoinMode::Outer {
        for &(t, v) in &left[i..] {
            joined.push(t, v, MISSING);
        }
        for &(t, v) in &right[j..] {
            joined.push(t, MISSING, v);
        }
    }

    debug!(
        "joined {} + {} feature rows into {} ({:?})",
        csi.len(),
        bitrate.len(),
        joined.len(),
        mode
    );
    joined
}

fn sorted_pairs(series: &FeatureSeries) -> Vec<(f64, f64)> {
    let mut pairs: Vec<(f64, f64)> = series
        .timestamps
        .iter()
        .copied()
        .zip(series.values.iter().copied())
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    pairs
}
