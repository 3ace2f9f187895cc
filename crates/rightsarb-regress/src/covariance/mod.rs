//! Parameter covariance estimation
//!
//! Provides the classical and heteroskedasticity-consistent (White) estimators
//! of the covariance matrix of OLS coefficients.

pub mod sandwich;

pub use sandwich::SandwichEstimator;

use crate::error::RegressionError;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Covariance type used for coefficient inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CovType {
    /// σ̂²(X'X)⁻¹
    NonRobust,
    /// White's estimator without small-sample correction
    #[serde(rename = "hc0")]
    HC0,
    /// HC0 scaled by n/(n-k)
    #[default]
    #[serde(rename = "hc1")]
    HC1,
    /// Squared residuals weighted by 1/(1-h)
    #[serde(rename = "hc2")]
    HC2,
    /// Squared residuals weighted by 1/(1-h)²
    #[serde(rename = "hc3")]
    HC3,
}

impl CovType {
    /// All supported covariance types.
    pub const ALL: [Self; 5] = [Self::NonRobust, Self::HC0, Self::HC1, Self::HC2, Self::HC3];

    /// Whether this is a heteroskedasticity-robust estimator.
    pub const fn is_robust(self) -> bool {
        !matches!(self, Self::NonRobust)
    }

    /// Label used in regression summaries.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NonRobust => "nonrobust",
            Self::HC0 => "HC0",
            Self::HC1 => "HC1",
            Self::HC2 => "HC2",
            Self::HC3 => "HC3",
        }
    }
}

impl fmt::Display for CovType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CovType {
    type Err = RegressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nonrobust" | "classical" => Ok(Self::NonRobust),
            "hc0" => Ok(Self::HC0),
            "hc1" => Ok(Self::HC1),
            "hc2" => Ok(Self::HC2),
            "hc3" => Ok(Self::HC3),
            other => Err(RegressionError::UnknownCovType(other.to_string())),
        }
    }
}

/// Trait for estimators of the OLS coefficient covariance matrix
pub trait CovarianceEstimator {
    /// Estimate the k x k covariance of the coefficients
    ///
    /// # Arguments
    /// * `x` - Design matrix including the intercept column (n x k)
    /// * `residuals` - Fitted residuals (n)
    /// * `xtx_inv` - Inverse of the cross-product matrix X'X (k x k)
    fn estimate(
        &self,
        x: &Array2<f64>,
        residuals: &Array1<f64>,
        xtx_inv: &Array2<f64>,
    ) -> Result<Array2<f64>, RegressionError>;
}
