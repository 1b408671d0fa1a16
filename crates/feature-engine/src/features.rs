//! Windowed Feature Reducers

use ndarray::{s, Array2};
use tracing::debug;

use timeline_align::{AlignedTable, BITRATE_COLUMN, SUBCARRIER_PREFIX};

use crate::error::FeatureError;
use crate::pca::dominant_variance;
use crate::window::WindowSpec;

/// Name of the CSI dominant-component variance series.
pub const CSI_FEATURE: &str = "csi_feature";

/// Name of the bitrate sliding-median series.
pub const BITRATE_MEDIAN: &str = "bitrate_median";

/// Default window of the CSI feature extractor.
pub const DEFAULT_CSI_WINDOW: WindowSpec = WindowSpec { size: 10, stride: 1 };

/// Default window of the standalone bitrate median filter. The composed
/// pipeline passes its own (3/1) window instead.
pub const DEFAULT_MEDIAN_WINDOW: WindowSpec = WindowSpec { size: 5, stride: 1 };

/// A derived scalar series keyed by window-center timestamps.
#[derive(Debug, Clone)]
pub struct FeatureSeries {
    /// Series name, used as the column name after joining
    pub name: String,
    /// Center timestamp of each window
    pub timestamps: Vec<f64>,
    /// Derived scalar per window
    pub values: Vec<f64>,
}

impl FeatureSeries {
    /// Number of feature rows
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the series holds no rows
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

fn check_window(spec: WindowSpec) -> Result<(), FeatureError> {
    if spec.is_valid() {
        Ok(())
    } else {
        Err(FeatureError::InvalidWindow {
            size: spec.size,
            stride: spec.stride,
        })
    }
}

/// Extract the dominant-component variance series from aligned CSI data.
///
/// Each window's subcarrier matrix is reduced to the top eigenvalue of
/// its sample covariance, rounded half-to-even to two decimals. A table
/// shorter than one window yields an empty series.
pub fn csi_feature_extraction(
    table: &AlignedTable,
    spec: WindowSpec,
) -> Result<FeatureSeries, FeatureError> {
    check_window(spec)?;

    let subcarriers: Vec<&[f64]> = table
        .columns()
        .iter()
        .filter(|c| c.name.starts_with(SUBCARRIER_PREFIX))
        .map(|c| c.values.as_slice())
        .collect();
    if subcarriers.is_empty() {
        return Err(FeatureError::NoSubcarriers);
    }

    let n = table.n_rows();
    let width = subcarriers.len();
    let mut matrix = Array2::zeros((n, width));
    for (col, values) in subcarriers.iter().enumerate() {
        for (row, &v) in values.iter().enumerate() {
            matrix[[row, col]] = v;
        }
    }

    let mut timestamps = Vec::with_capacity(spec.count(n));
    let mut values = Vec::with_capacity(spec.count(n));
    for start in spec.starts(n) {
        let window = matrix.slice(s![start..start + spec.size, ..]);
        values.push(round2(dominant_variance(window)));
        timestamps.push(table.timestamps()[spec.center(start)]);
    }

    debug!("extracted {} CSI feature windows from {} rows", values.len(), n);
    Ok(FeatureSeries {
        name: CSI_FEATURE.to_string(),
        timestamps,
        values,
    })
}

/// Apply a sliding median to the aligned bitrate series.
///
/// Rows are sorted ascending by timestamp first; each window emits the
/// median of its payload bytes at the window-center timestamp. No
/// rounding is applied.
pub fn median_filter_bitrate(
    table: &AlignedTable,
    spec: WindowSpec,
) -> Result<FeatureSeries, FeatureError> {
    check_window(spec)?;

    let mut sorted = table.clone();
    sorted.sort_by_timestamp();
    let column = sorted
        .column(BITRATE_COLUMN)
        .ok_or(FeatureError::MissingColumn(BITRATE_COLUMN))?;

    let n = sorted.n_rows();
    let mut timestamps = Vec::with_capacity(spec.count(n));
    let mut values = Vec::with_capacity(spec.count(n));
    for start in spec.starts(n) {
        values.push(median(&column.values[start..start + spec.size]));
        timestamps.push(sorted.timestamps()[spec.center(start)]);
    }

    debug!("filtered {} bitrate windows from {} rows", values.len(), n);
    Ok(FeatureSeries {
        name: BITRATE_MEDIAN.to_string(),
        timestamps,
        values,
    })
}

/// Median of a non-empty window; even windows average the middle pair.
fn median(window: &[f64]) -> f64 {
    let mut sorted = window.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Round half-to-even to two decimal digits.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeline_align::Column;

    fn bitrate_table(values: Vec<f64>) -> AlignedTable {
        let grid = (0..values.len()).map(|i| i as f64 * 0.1).collect();
        AlignedTable::new(grid, vec![Column::new(BITRATE_COLUMN, values)])
    }

    fn csi_table(columns: Vec<Vec<f64>>) -> AlignedTable {
        let n = columns.first().map_or(0, |c| c.len());
        let grid = (0..n).map(|i| i as f64 * 0.1).collect();
        let columns = columns
            .into_iter()
            .enumerate()
            .map(|(i, values)| Column::new(format!("{SUBCARRIER_PREFIX}{i}"), values))
            .collect();
        AlignedTable::new(grid, columns)
    }

    #[test]
    fn test_median_filter_centers_windows() {
        // Window 3/1 over five values: medians at the three center rows.
        let table = bitrate_table(vec![10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = median_filter_bitrate(&table, WindowSpec::new(3, 1)).unwrap();
        assert_eq!(series.values, vec![20.0, 30.0, 40.0]);
        let expected: Vec<f64> = [1, 2, 3].iter().map(|&i| i as f64 * 0.1).collect();
        assert_eq!(series.timestamps, expected);
    }

    #[test]
    fn test_median_resists_spikes() {
        let table = bitrate_table(vec![10.0, 500.0, 12.0, 11.0, 10.0]);
        let series = median_filter_bitrate(&table, WindowSpec::new(5, 1)).unwrap();
        assert_eq!(series.values, vec![11.0]);
    }

    #[test]
    fn test_even_window_averages_middle_pair() {
        let table = bitrate_table(vec![10.0, 20.0, 30.0, 40.0]);
        let series = median_filter_bitrate(&table, WindowSpec::new(4, 1)).unwrap();
        assert_eq!(series.values, vec![25.0]);
    }

    #[test]
    fn test_short_series_yields_no_rows() {
        let table = bitrate_table(vec![10.0, 20.0]);
        let series = median_filter_bitrate(&table, WindowSpec::new(3, 1)).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_median_sorts_before_windowing() {
        let mut table = bitrate_table(vec![30.0, 10.0, 20.0]);
        // Scramble the grid; the filter must re-sort by timestamp.
        let grid = vec![0.2, 0.0, 0.1];
        table = AlignedTable::new(
            grid,
            vec![Column::new(BITRATE_COLUMN, table.column(BITRATE_COLUMN).unwrap().values.clone())],
        );
        let series = median_filter_bitrate(&table, WindowSpec::new(3, 1)).unwrap();
        assert_eq!(series.values, vec![20.0]);
        assert_eq!(series.timestamps, vec![0.1]);
    }

    #[test]
    fn test_missing_bitrate_column_is_error() {
        let table = csi_table(vec![vec![1.0, 2.0, 3.0]]);
        assert!(matches!(
            median_filter_bitrate(&table, WindowSpec::new(3, 1)),
            Err(FeatureError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_csi_static_channel_scores_zero() {
        let table = csi_table(vec![vec![5.0; 12], vec![5.0; 12]]);
        let series = csi_feature_extraction(&table, DEFAULT_CSI_WINDOW).unwrap();
        assert_eq!(series.len(), 3);
        assert!(series.values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_csi_motion_scores_positive() {
        // Correlated swings across both subcarriers.
        let swing: Vec<f64> = (0..12).map(|i| if i % 2 == 0 { 10.0 } else { -10.0 }).collect();
        let table = csi_table(vec![swing.clone(), swing]);
        let series = csi_feature_extraction(&table, DEFAULT_CSI_WINDOW).unwrap();
        assert!(series.values.iter().all(|&v| v > 100.0));
    }

    #[test]
    fn test_csi_feature_rounded_to_two_decimals() {
        let column: Vec<f64> = (0..10).map(|i| (i as f64) * 0.317).collect();
        let table = csi_table(vec![column]);
        let series = csi_feature_extraction(&table, DEFAULT_CSI_WINDOW).unwrap();
        assert_eq!(series.len(), 1);
        let v = series.values[0];
        assert_eq!(v, (v * 100.0).round() / 100.0);
    }

    #[test]
    fn test_csi_center_timestamps() {
        let table = csi_table(vec![(0..12).map(|i| i as f64).collect()]);
        let series = csi_feature_extraction(&table, DEFAULT_CSI_WINDOW).unwrap();
        // Windows start at 0, 1, 2; centers at rows 5, 6, 7.
        let expected: Vec<f64> = [5, 6, 7].iter().map(|&i| i as f64 * 0.1).collect();
        assert_eq!(series.timestamps, expected);
    }

    #[test]
    fn test_no_subcarrier_columns_is_error() {
        let table = bitrate_table(vec![1.0, 2.0]);
        assert!(matches!(
            csi_feature_extraction(&table, DEFAULT_CSI_WINDOW),
            Err(FeatureError::NoSubcarriers)
        ));
    }
}
