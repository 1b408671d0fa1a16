//! Gap Filler
//!
//! Replaces missing cells left by alignment. CSI columns propagate the
//! nearest known value (forward, then backward, so edge gaps inherit the
//! nearest available sample); bitrate columns treat a missing bucket as
//! "no traffic observed" and become zero. Filling never adds rows.

use tracing::debug;

use crate::align::SUBCARRIER_PREFIX;
use crate::table::{is_missing, AlignedTable};

/// Forward- then backward-fill every `subcarrier_*` column.
///
/// Rows are stably sorted ascending by timestamp first. A column with no
/// known value at all stays entirely missing.
pub fn fill_missing_csi(table: &mut AlignedTable) {
    table.sort_by_timestamp();

    let mut filled = 0usize;
    for column in table.columns_mut() {
        if !column.name.starts_with(SUBCARRIER_PREFIX) {
            continue;
        }

        let mut last_known = None;
        for value in column.values.iter_mut() {
            if is_missing(*value) {
                if let Some(known) = last_known {
                    *value = known;
                    filled += 1;
                }
            } else {
                last_known = Some(*value);
            }
        }

        let mut next_known = None;
        for value in column.values.iter_mut().rev() {
            if is_missing(*value) {
                if let Some(known) = next_known {
                    *value = known;
                    filled += 1;
                }
            } else {
                next_known = Some(*value);
            }
        }
    }

    debug!("propagated {} missing CSI cells", filled);
}

/// Zero-fill every column whose name contains "bitrate".
///
/// Rows are stably sorted ascending by timestamp first.
pub fn fill_missing_bitrate(table: &mut AlignedTable) {
    table.sort_by_timestamp();

    let mut filled = 0usize;
    for column in table.columns_mut() {
        if !column.name.contains("bitrate") {
            continue;
        }
        for value in column.values.iter_mut() {
            if is_missing(*value) {
                *value = 0.0;
                filled += 1;
            }
        }
    }

    debug!("zero-filled {} missing bitrate cells", filled);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{align_csi_magnitude, AlignConfig};
    use crate::table::{AlignedTable, Column, MISSING};
    use ndarray::Array2;
    use proptest::prelude::*;

    fn csi_table(values: Vec<f64>) -> AlignedTable {
        let grid = (0..values.len()).map(|i| i as f64 * 0.1).collect();
        AlignedTable::new(grid, vec![Column::new("subcarrier_0", values)])
    }

    #[test]
    fn test_interior_gap_takes_earlier_value() {
        let mut table = csi_table(vec![1.0, MISSING, MISSING, 4.0]);
        fill_missing_csi(&mut table);
        assert_eq!(table.column("subcarrier_0").unwrap().values, vec![1.0, 1.0, 1.0, 4.0]);
    }

    #[test]
    fn test_leading_gap_takes_later_value() {
        let mut table = csi_table(vec![MISSING, MISSING, 3.0]);
        fill_missing_csi(&mut table);
        assert_eq!(table.column("subcarrier_0").unwrap().values, vec![3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_all_missing_column_stays_missing() {
        let mut table = csi_table(vec![MISSING, MISSING]);
        fill_missing_csi(&mut table);
        assert!(table
            .column("subcarrier_0")
            .unwrap()
            .values
            .iter()
            .all(|&v| is_missing(v)));
    }

    #[test]
    fn test_bitrate_missing_becomes_zero() {
        let mut table = AlignedTable::new(
            vec![0.0, 0.1, 0.2],
            vec![Column::new("bitrate_bytes", vec![82.0, MISSING, 40.0])],
        );
        fill_missing_bitrate(&mut table);
        assert_eq!(
            table.column("bitrate_bytes").unwrap().values,
            vec![82.0, 0.0, 40.0]
        );
    }

    #[test]
    fn test_bitrate_fill_matches_by_substring() {
        let mut table = AlignedTable::new(
            vec![0.0],
            vec![
                Column::new("bitrate_median", vec![MISSING]),
                Column::new("subcarrier_0", vec![MISSING]),
            ],
        );
        fill_missing_bitrate(&mut table);
        assert_eq!(table.column("bitrate_median").unwrap().values, vec![0.0]);
        assert!(is_missing(table.column("subcarrier_0").unwrap().values[0]));
    }

    #[test]
    fn test_constant_capture_fills_to_constant() {
        // 100 irregular samples spanning 0.0..=9.95s at constant magnitude:
        // the grid has 100 rows and every filled cell equals 5.0.
        let timestamps: Vec<f64> = (0..100)
            .map(|i| match i {
                0 => 0.0,
                99 => 9.95,
                _ => i as f64 * 0.1 + if i % 3 == 0 { 0.013 } else { -0.021 },
            })
            .collect();
        let magnitude = Array2::from_elem((100, 1), 5.0);
        let mut table =
            align_csi_magnitude(magnitude.view(), &timestamps, &AlignConfig::default()).unwrap();
        assert_eq!(table.n_rows(), 100);

        fill_missing_csi(&mut table);
        assert!(table
            .column("subcarrier_0")
            .unwrap()
            .values
            .iter()
            .all(|&v| v == 5.0));
    }

    proptest! {
        /// Filling an already-filled table changes nothing.
        #[test]
        fn prop_csi_fill_is_idempotent(
            cells in proptest::collection::vec(
                proptest::option::weighted(0.7, -100.0f64..100.0),
                1..50,
            ),
        ) {
            let values: Vec<f64> = cells
                .iter()
                .map(|c| c.unwrap_or(MISSING))
                .collect();
            let mut once = csi_table(values);
            fill_missing_csi(&mut once);
            let mut twice = once.clone();
            fill_missing_csi(&mut twice);

            let a = &once.column("subcarrier_0").unwrap().values;
            let b = &twice.column("subcarrier_0").unwrap().values;
            prop_assert_eq!(a.len(), b.len());
            for (&x, &y) in a.iter().zip(b.iter()) {
                prop_assert!(x == y || (is_missing(x) && is_missing(y)));
            }
        }

        /// Zero-filling twice equals zero-filling once.
        #[test]
        fn prop_bitrate_fill_is_idempotent(
            cells in proptest::collection::vec(
                proptest::option::weighted(0.7, -100.0f64..100.0),
                1..50,
            ),
        ) {
            let values: Vec<f64> = cells
                .iter()
                .map(|c| c.unwrap_or(MISSING))
                .collect();
            let grid = (0..values.len()).map(|i| i as f64 * 0.1).collect();
            let mut once = AlignedTable::new(grid, vec![Column::new("bitrate_bytes", values)]);
            fill_missing_bitrate(&mut once);
            let mut twice = once.clone();
            fill_missing_bitrate(&mut twice);
            prop_assert_eq!(
                &once.column("bitrate_bytes").unwrap().values,
                &twice.column("bitrate_bytes").unwrap().values
            );
        }
    }
}
