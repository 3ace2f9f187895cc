//! Dense linear algebra for small symmetric systems.

use crate::error::RegressionError;
use ndarray::{Array1, Array2};

/// Relative pivot threshold below which a matrix is treated as singular.
const PIVOT_TOLERANCE: f64 = 1e-13;

/// Invert a square matrix by Gauss-Jordan elimination with partial pivoting.
///
/// # Errors
/// Returns [`RegressionError::Singular`] when a pivot falls below the
/// tolerance relative to the largest entry.
pub fn invert(matrix: &Array2<f64>) -> Result<Array2<f64>, RegressionError> {
    let n = matrix.nrows();
    if matrix.ncols() != n {
        return Err(RegressionError::DimensionMismatch {
            expected: n,
            actual: matrix.ncols(),
        });
    }
    if n == 0 {
        return Err(RegressionError::Singular);
    }

    let scale = matrix.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return Err(RegressionError::Singular);
    }

    // Augmented matrix [A | I]
    let mut aug = Array2::<f64>::zeros((n, 2 * n));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = matrix[[i, j]];
        }
        aug[[i, n + i]] = 1.0;
    }

    for col in 0..n {
        let mut pivot_row = col;
        let mut pivot_val = aug[[col, col]].abs();
        for row in (col + 1)..n {
            if aug[[row, col]].abs() > pivot_val {
                pivot_val = aug[[row, col]].abs();
                pivot_row = row;
            }
        }

        if pivot_val < PIVOT_TOLERANCE * scale {
            return Err(RegressionError::Singular);
        }

        if pivot_row != col {
            for j in 0..(2 * n) {
                aug.swap([col, j], [pivot_row, j]);
            }
        }

        let pivot = aug[[col, col]];
        for j in 0..(2 * n) {
            aug[[col, j]] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for j in 0..(2 * n) {
                aug[[row, j]] -= factor * aug[[col, j]];
            }
        }
    }

    let mut inverse = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            inverse[[i, j]] = aug[[i, n + j]];
        }
    }
    Ok(inverse)
}

/// Eigenvalues of a symmetric matrix by cyclic Jacobi rotations, descending.
pub fn symmetric_eigenvalues(matrix: &Array2<f64>, max_sweeps: usize) -> Array1<f64> {
    let n = matrix.nrows();
    let mut a = matrix.clone();
    let norm: f64 = a.iter().map(|v| v * v).sum::<f64>().sqrt();
    let tolerance = 1e-14 * norm.max(f64::MIN_POSITIVE);

    for _ in 0..max_sweeps {
        let off: f64 = (0..n)
            .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
            .map(|(i, j)| a[[i, j]] * a[[i, j]])
            .sum::<f64>()
            .sqrt();
        if off < tolerance {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                if a[[p, q]].abs() < tolerance {
                    continue;
                }
                let (cos, sin) = rotation(a[[p, p]], a[[q, q]], a[[p, q]]);
                rotate(&mut a, p, q, cos, sin);
            }
        }
    }

    let mut eigenvalues: Vec<f64> = (0..n).map(|i| a[[i, i]]).collect();
    eigenvalues.sort_by(|x, y| y.total_cmp(x));
    Array1::from(eigenvalues)
}

/// Square root of the ratio of the extreme eigenvalues of a symmetric matrix.
///
/// Infinite when the smallest eigenvalue is zero to machine precision.
pub fn condition_number(matrix: &Array2<f64>) -> f64 {
    let eigenvalues = symmetric_eigenvalues(matrix, 100);
    let Some(&max_eig) = eigenvalues.first() else {
        return f64::NAN;
    };
    let min_eig = eigenvalues[eigenvalues.len() - 1];
    if min_eig <= max_eig.abs() * f64::EPSILON {
        f64::INFINITY
    } else {
        (max_eig / min_eig).sqrt()
    }
}

/// Rotation (cos, sin) that annihilates `a[p][q]`.
fn rotation(app: f64, aqq: f64, apq: f64) -> (f64, f64) {
    let tau = (aqq - app) / (2.0 * apq);
    let t = if tau >= 0.0 {
        1.0 / (tau + (1.0 + tau * tau).sqrt())
    } else {
        -1.0 / (-tau + (1.0 + tau * tau).sqrt())
    };
    let cos = 1.0 / (1.0 + t * t).sqrt();
    (cos, t * cos)
}

fn rotate(a: &mut Array2<f64>, p: usize, q: usize, cos: f64, sin: f64) {
    let n = a.nrows();
    let app = a[[p, p]];
    let aqq = a[[q, q]];
    let apq = a[[p, q]];

    a[[p, p]] = cos * cos * app - 2.0 * cos * sin * apq + sin * sin * aqq;
    a[[q, q]] = sin * sin * app + 2.0 * cos * sin * apq + cos * cos * aqq;
    a[[p, q]] = 0.0;
    a[[q, p]] = 0.0;

    for i in 0..n {
        if i != p && i != q {
            let aip = a[[i, p]];
            let aiq = a[[i, q]];
            a[[i, p]] = cos * aip - sin * aiq;
            a[[p, i]] = a[[i, p]];
            a[[i, q]] = sin * aip + cos * aiq;
            a[[q, i]] = a[[i, q]];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_invert_identity_product() {
        let a = array![[4.0, 2.0, 0.6], [2.0, 2.0, 0.4], [0.6, 0.4, 1.0]];
        let inv = invert(&a).unwrap();
        let product = a.dot(&inv);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(product[[i, j]], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_invert_needs_pivoting() {
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let inv = invert(&a).unwrap();
        assert_abs_diff_eq!(inv[[0, 1]], 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(inv[[1, 0]], 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_invert_singular() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        assert_eq!(invert(&a), Err(RegressionError::Singular));
        assert_eq!(invert(&Array2::zeros((2, 2))), Err(RegressionError::Singular));
    }

    #[test]
    fn test_invert_non_square() {
        let a = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            invert(&a),
            Err(RegressionError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_eigenvalues_symmetric() {
        // Eigenvalues of [[2, 1], [1, 2]] are 3 and 1.
        let a = array![[2.0, 1.0], [1.0, 2.0]];
        let eig = symmetric_eigenvalues(&a, 50);
        assert_abs_diff_eq!(eig[0], 3.0, epsilon = 1e-10);
        assert_abs_diff_eq!(eig[1], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_condition_number() {
        let a = array![[4.0, 0.0], [0.0, 1.0]];
        assert_abs_diff_eq!(condition_number(&a), 2.0, epsilon = 1e-12);

        let singular = array![[1.0, 1.0], [1.0, 1.0]];
        assert!(condition_number(&singular).is_infinite());
    }
}
