//! Residual diagnostics reported alongside an OLS fit.

use crate::linalg::condition_number;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Minimum sample size for the D'Agostino skewness test.
const OMNIBUS_MIN_N: usize = 8;

/// Normality, autocorrelation and conditioning diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// D'Agostino-Pearson K² statistic
    pub omnibus: f64,
    /// p-value of the omnibus statistic under χ²(2)
    pub omnibus_pvalue: f64,
    /// Residual skewness (biased)
    pub skew: f64,
    /// Residual kurtosis (non-excess, normal = 3)
    pub kurtosis: f64,
    /// Jarque-Bera statistic
    pub jarque_bera: f64,
    /// p-value of the Jarque-Bera statistic under χ²(2)
    pub jb_pvalue: f64,
    /// Durbin-Watson statistic
    pub durbin_watson: f64,
    /// Square root of the eigenvalue ratio of X'X
    pub condition_number: f64,
}

impl Diagnostics {
    /// Compute diagnostics from residuals and the design matrix (with intercept).
    pub fn compute(residuals: &Array1<f64>, x: &Array2<f64>) -> Self {
        let skew = skewness(residuals);
        let kurtosis = kurtosis(residuals);
        let jarque_bera = jarque_bera(residuals.len(), skew, kurtosis);
        let omnibus = omnibus(residuals.len(), skew, kurtosis);

        Self {
            omnibus,
            omnibus_pvalue: chi2_sf(omnibus),
            skew,
            kurtosis,
            jarque_bera,
            jb_pvalue: chi2_sf(jarque_bera),
            durbin_watson: durbin_watson(residuals),
            condition_number: condition_number(&x.t().dot(x)),
        }
    }
}

fn central_moment(values: &Array1<f64>, order: i32) -> f64 {
    let n = values.len() as f64;
    let mean = values.sum() / n;
    values.iter().map(|v| (v - mean).powi(order)).sum::<f64>() / n
}

/// Biased sample skewness m3 / m2^1.5.
pub fn skewness(values: &Array1<f64>) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m2 = central_moment(values, 2);
    if m2 == 0.0 {
        return f64::NAN;
    }
    central_moment(values, 3) / m2.powf(1.5)
}

/// Biased sample kurtosis m4 / m2² (normal = 3).
pub fn kurtosis(values: &Array1<f64>) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m2 = central_moment(values, 2);
    if m2 == 0.0 {
        return f64::NAN;
    }
    central_moment(values, 4) / (m2 * m2)
}

/// Jarque-Bera statistic n/6 · (S² + (K-3)²/4).
pub fn jarque_bera(n: usize, skew: f64, kurtosis: f64) -> f64 {
    n as f64 / 6.0 * (skew * skew + (kurtosis - 3.0).powi(2) / 4.0)
}

/// Durbin-Watson statistic Σ(e_t - e_{t-1})² / Σe_t².
pub fn durbin_watson(residuals: &Array1<f64>) -> f64 {
    let ssr = residuals.dot(residuals);
    let diff: f64 = residuals
        .windows(2)
        .into_iter()
        .map(|w| (w[1] - w[0]).powi(2))
        .sum();
    diff / ssr
}

/// D'Agostino-Pearson omnibus statistic; NaN below eight observations.
pub fn omnibus(n: usize, skew: f64, kurtosis: f64) -> f64 {
    if n < OMNIBUS_MIN_N {
        return f64::NAN;
    }
    let zs = skew_z(n as f64, skew);
    let zk = kurtosis_z(n as f64, kurtosis);
    zs * zs + zk * zk
}

/// D'Agostino (1970) transformation of sample skewness to a standard normal.
fn skew_z(n: f64, b2: f64) -> f64 {
    let mut y = b2 * ((n + 1.0) * (n + 3.0) / (6.0 * (n - 2.0))).sqrt();
    let beta2 = 3.0 * (n * n + 27.0 * n - 70.0) * (n + 1.0) * (n + 3.0)
        / ((n - 2.0) * (n + 5.0) * (n + 7.0) * (n + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();
    if y == 0.0 {
        y = 1.0;
    }
    let ya = y / alpha;
    delta * (ya + (ya * ya + 1.0).sqrt()).ln()
}

/// Anscombe-Glynn (1983) transformation of sample kurtosis to a standard normal.
fn kurtosis_z(n: f64, b2: f64) -> f64 {
    let expected = 3.0 * (n - 1.0) / (n + 1.0);
    let var_b2 = 24.0 * n * (n - 2.0) * (n - 3.0)
        / ((n + 1.0) * (n + 1.0) * (n + 3.0) * (n + 5.0));
    let x = (b2 - expected) / var_b2.sqrt();
    let sqrt_beta1 = 6.0 * (n * n - 5.0 * n + 2.0) / ((n + 7.0) * (n + 9.0))
        * (6.0 * (n + 3.0) * (n + 5.0) / (n * (n - 2.0) * (n - 3.0))).sqrt();
    let a = 6.0
        + 8.0 / sqrt_beta1 * (2.0 / sqrt_beta1 + (1.0 + 4.0 / (sqrt_beta1 * sqrt_beta1)).sqrt());
    let term1 = 1.0 - 2.0 / (9.0 * a);
    let denom = 1.0 + x * (2.0 / (a - 4.0)).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    let term2 = denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt();
    (term1 - term2) / (2.0 / (9.0 * a)).sqrt()
}

fn chi2_sf(statistic: f64) -> f64 {
    if !statistic.is_finite() {
        return f64::NAN;
    }
    ChiSquared::new(2.0).map_or(f64::NAN, |dist| dist.sf(statistic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_symmetric_sample_has_zero_skew() {
        let values = array![-2.0, -1.0, 0.0, 1.0, 2.0];
        assert_relative_eq!(skewness(&values), 0.0, epsilon = 1e-12);
        // m2 = 2, m4 = 34/5
        assert_relative_eq!(kurtosis(&values), 1.7, epsilon = 1e-12);
    }

    #[test]
    fn test_jarque_bera_of_normal_moments_is_zero() {
        assert_relative_eq!(jarque_bera(100, 0.0, 3.0), 0.0);
        assert_relative_eq!(jarque_bera(60, 1.0, 5.0), 10.0 * (1.0 + 1.0));
    }

    #[test]
    fn test_durbin_watson() {
        let alternating = array![1.0, -1.0, 1.0, -1.0];
        assert_relative_eq!(durbin_watson(&alternating), 3.0);
        let constant = array![1.0, 1.0, 1.0, 1.0];
        assert_relative_eq!(durbin_watson(&constant), 0.0);
    }

    #[test]
    fn test_omnibus_small_sample_is_nan() {
        assert!(omnibus(7, 0.1, 3.0).is_nan());
        assert!(omnibus(8, 0.1, 3.0).is_finite());
    }

    #[test]
    fn test_omnibus_grows_with_skew() {
        let mild = omnibus(50, 0.2, 3.0);
        let strong = omnibus(50, 1.5, 3.0);
        assert!(strong > mild);
        assert!(chi2_sf(strong) < chi2_sf(mild));
    }

    #[test]
    fn test_compute_fills_all_fields() {
        let residuals = array![0.3, -0.5, 0.1, 0.4, -0.6, 0.3, -0.2, 0.2, 0.05, -0.05];
        let x = Array2::from_shape_fn((10, 2), |(i, j)| if j == 0 { 1.0 } else { i as f64 });
        let diag = Diagnostics::compute(&residuals, &x);
        assert!(diag.omnibus.is_finite());
        assert!((0.0..=1.0).contains(&diag.omnibus_pvalue));
        assert!((0.0..=1.0).contains(&diag.jb_pvalue));
        assert!(diag.durbin_watson > 0.0 && diag.durbin_watson < 4.0);
        assert!(diag.condition_number > 1.0);
    }
}
