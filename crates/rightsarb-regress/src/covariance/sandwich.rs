//! White sandwich covariance estimators
//!
//! ```text
//! V = (X'X)⁻¹ X' diag(ω) X (X'X)⁻¹
//! where ω_i is:
//! - HC0: e_i²
//! - HC1: e_i² · n/(n-k)
//! - HC2: e_i² / (1 - h_ii)
//! - HC3: e_i² / (1 - h_ii)²
//! and h_ii = x_i'(X'X)⁻¹x_i is the leverage of observation i.
//! ```
//!
//! The nonrobust case returns σ̂²(X'X)⁻¹ with σ̂² = e'e/(n-k).
//!
//! # References
//! - White, H. (1980). "A Heteroskedasticity-Consistent Covariance Matrix
//!   Estimator and a Direct Test for Heteroskedasticity." Econometrica, 48(4).
//! - MacKinnon, J. G., & White, H. (1985). "Some heteroskedasticity-consistent
//!   covariance matrix estimators with improved finite sample properties."
//!   Journal of Econometrics, 29(3).

use super::{CovType, CovarianceEstimator};
use crate::error::RegressionError;
use ndarray::{Array1, Array2, Axis};

/// Sandwich covariance estimator for a given [`CovType`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SandwichEstimator {
    cov_type: CovType,
}

impl SandwichEstimator {
    /// Create an estimator of the given type
    pub const fn new(cov_type: CovType) -> Self {
        Self { cov_type }
    }

    /// Covariance type produced by this estimator
    pub const fn cov_type(&self) -> CovType {
        self.cov_type
    }

    /// Diagonal of the hat matrix X(X'X)⁻¹X'
    pub fn leverage(x: &Array2<f64>, xtx_inv: &Array2<f64>) -> Array1<f64> {
        let projected = x.dot(xtx_inv);
        (&projected * x).sum_axis(Axis(1))
    }

    fn weights(
        &self,
        x: &Array2<f64>,
        residuals: &Array1<f64>,
        xtx_inv: &Array2<f64>,
    ) -> Array1<f64> {
        let (n, k) = x.dim();
        let squared = residuals.mapv(|e| e * e);
        match self.cov_type {
            CovType::NonRobust | CovType::HC0 => squared,
            CovType::HC1 => squared * (n as f64 / (n - k) as f64),
            CovType::HC2 => {
                let h = Self::leverage(x, xtx_inv);
                squared / h.mapv(|h| 1.0 - h)
            }
            CovType::HC3 => {
                let h = Self::leverage(x, xtx_inv);
                squared / h.mapv(|h| (1.0 - h).powi(2))
            }
        }
    }
}

impl CovarianceEstimator for SandwichEstimator {
    fn estimate(
        &self,
        x: &Array2<f64>,
        residuals: &Array1<f64>,
        xtx_inv: &Array2<f64>,
    ) -> Result<Array2<f64>, RegressionError> {
        let (n, k) = x.dim();
        if residuals.len() != n {
            return Err(RegressionError::DimensionMismatch {
                expected: n,
                actual: residuals.len(),
            });
        }
        if xtx_inv.dim() != (k, k) {
            return Err(RegressionError::DimensionMismatch {
                expected: k,
                actual: xtx_inv.nrows(),
            });
        }
        if n <= k {
            return Err(RegressionError::InsufficientData {
                required: k,
                actual: n,
            });
        }

        if self.cov_type == CovType::NonRobust {
            let sigma2 = residuals.dot(residuals) / (n - k) as f64;
            return Ok(xtx_inv * sigma2);
        }

        let omega = self.weights(x, residuals, xtx_inv);
        // X' diag(ω) X
        let weighted = x * &omega.insert_axis(Axis(1));
        let meat = x.t().dot(&weighted);
        Ok(xtx_inv.dot(&meat).dot(xtx_inv))
    }
}
