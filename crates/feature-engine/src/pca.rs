//! Dominant-Component Variance
//!
//! The CSI motion feature: the top eigenvalue of a window's sample
//! covariance (rows = time steps, columns = subcarriers). Strong
//! correlated fluctuation across subcarriers concentrates variance in the
//! first principal component and pushes this value up; a static channel
//! keeps it near zero.

use ndarray::{Array1, Array2, ArrayView2};

const MAX_ITERATIONS: usize = 500;
const TOLERANCE: f64 = 1e-10;

/// Top eigenvalue of the sample covariance of `window`.
///
/// Covariance uses the `n - 1` denominator. Windows with fewer than two
/// rows have no sample covariance and yield 0.0.
pub fn dominant_variance(window: ArrayView2<'_, f64>) -> f64 {
    let n = window.nrows();
    if n < 2 || window.ncols() == 0 {
        return 0.0;
    }

    let mut centered = window.to_owned();
    for mut column in centered.columns_mut() {
        let mean = column.sum() / n as f64;
        column.mapv_inplace(|v| v - mean);
    }

    let covariance = centered.t().dot(&centered) / (n as f64 - 1.0);
    top_eigenvalue(&covariance)
}

/// Power iteration on a symmetric positive semi-definite matrix.
///
/// Starts from the basis vector of the largest diagonal entry; if that
/// entry is zero the whole matrix is zero and so is the eigenvalue.
fn top_eigenvalue(matrix: &Array2<f64>) -> f64 {
    let d = matrix.nrows();
    let (start, max_diag) = (0..d)
        .map(|i| (i, matrix[[i, i]]))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or((0, 0.0));
    if max_diag <= 0.0 {
        return 0.0;
    }

    let mut vector = Array1::zeros(d);
    vector[start] = 1.0;

    let mut eigenvalue = 0.0;
    for _ in 0..MAX_ITERATIONS {
        let image = matrix.dot(&vector);
        let norm = image.dot(&image).sqrt();
        if norm == 0.0 {
            return 0.0;
        }

        // Rayleigh quotient of the unit iterate.
        let estimate = vector.dot(&image);
        vector = image / norm;

        if (estimate - eigenvalue).abs() <= TOLERANCE * estimate.abs().max(1.0) {
            return estimate;
        }
        eigenvalue = estimate;
    }
    eigenvalue
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_constant_window_has_zero_variance() {
        let window = Array2::from_elem((10, 4), 5.0);
        assert_eq!(dominant_variance(window.view()), 0.0);
    }

    #[test]
    fn test_single_column_matches_sample_variance() {
        let window = array![[1.0], [2.0], [3.0], [4.0]];
        // Sample variance of 1..4 with n-1 denominator.
        let expected = 10.0 / 6.0;
        assert!((dominant_variance(window.view()) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_correlated_columns_concentrate_variance() {
        // Perfectly correlated columns: the top component carries the
        // full trace of the covariance.
        let window = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        assert!((dominant_variance(window.view()) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_anti_correlated_columns() {
        let window = array![[1.0, -1.0], [0.0, 0.0], [-1.0, 1.0]];
        assert!((dominant_variance(window.view()) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_dominant_axis_wins() {
        // Independent columns: the eigenvalue is the larger variance.
        let window = array![[10.0, 1.0], [-10.0, -1.0], [10.0, 1.0], [-10.0, -1.0]];
        let loud = dominant_variance(window.view());
        let quiet_only = dominant_variance(window.slice(ndarray::s![.., 1..]));
        assert!(loud > 100.0);
        assert!(quiet_only < 2.0);
    }

    #[test]
    fn test_degenerate_single_row() {
        let window = array![[1.0, 2.0, 3.0]];
        assert_eq!(dominant_variance(window.view()), 0.0);
    }
}
