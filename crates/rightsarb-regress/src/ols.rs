//! Ordinary least squares with selectable coefficient covariance.

use crate::covariance::{CovType, CovarianceEstimator, SandwichEstimator};
use crate::diagnostics::Diagnostics;
use crate::error::RegressionError;
use crate::formula::Formula;
use crate::linalg::invert;
use ndarray::{Array1, Array2, s};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, FisherSnedecor, Normal, StudentsT};
use std::f64::consts::PI;

/// Two-sided coverage of reported confidence intervals.
const CONFIDENCE: f64 = 0.95;

/// A linear model ready to be fitted.
#[derive(Debug, Clone)]
pub struct Ols {
    formula: Formula,
    y: Array1<f64>,
    /// Design matrix with the intercept column prepended
    x: Array2<f64>,
}

impl Ols {
    /// Create a model from a response vector and regressor matrix (without
    /// intercept). Columns of `x` follow `formula.regressors`.
    ///
    /// # Errors
    /// Returns an error when dimensions disagree with the formula or with
    /// each other.
    pub fn new(formula: Formula, y: Array1<f64>, x: Array2<f64>) -> Result<Self, RegressionError> {
        if x.nrows() != y.len() {
            return Err(RegressionError::DimensionMismatch {
                expected: y.len(),
                actual: x.nrows(),
            });
        }
        if x.ncols() != formula.regressors.len() {
            return Err(RegressionError::DimensionMismatch {
                expected: formula.regressors.len(),
                actual: x.ncols(),
            });
        }

        let n = y.len();
        let mut design = Array2::<f64>::ones((n, x.ncols() + 1));
        design.slice_mut(s![.., 1..]).assign(&x);

        Ok(Self {
            formula,
            y,
            x: design,
        })
    }

    /// Create a model from row-major observations.
    ///
    /// # Errors
    /// Returns [`RegressionError::DimensionMismatch`] for ragged rows.
    pub fn from_rows(formula: Formula, y: &[f64], rows: &[Vec<f64>]) -> Result<Self, RegressionError> {
        let k = formula.regressors.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != k) {
            return Err(RegressionError::DimensionMismatch {
                expected: k,
                actual: bad.len(),
            });
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let x = Array2::from_shape_vec((rows.len(), k), flat).map_err(|_| {
            RegressionError::DimensionMismatch {
                expected: rows.len() * k,
                actual: rows.iter().map(Vec::len).sum(),
            }
        })?;
        Self::new(formula, Array1::from(y.to_vec()), x)
    }

    /// Model formula.
    pub const fn formula(&self) -> &Formula {
        &self.formula
    }

    /// Number of observations.
    pub fn nobs(&self) -> usize {
        self.y.len()
    }

    /// Fit by least squares and compute inference with the given covariance.
    ///
    /// # Errors
    /// Returns an error when there are no residual degrees of freedom or
    /// X'X is singular.
    pub fn fit(&self, cov_type: CovType) -> Result<OlsResults, RegressionError> {
        let (n, k) = self.x.dim();
        if n <= k {
            return Err(RegressionError::InsufficientData {
                required: k,
                actual: n,
            });
        }

        let xtx_inv = invert(&self.x.t().dot(&self.x))?;
        let params = xtx_inv.dot(&self.x.t().dot(&self.y));
        let fitted = self.x.dot(&params);
        let residuals = &self.y - &fitted;

        let cov_params = SandwichEstimator::new(cov_type).estimate(&self.x, &residuals, &xtx_inv)?;
        let bse: Array1<f64> = cov_params.diag().mapv(f64::sqrt);
        let tvalues = &params / &bse;

        let df_resid = (n - k) as f64;
        let df_model = (k - 1) as f64;
        let reference = Reference::new(cov_type, df_resid)?;
        let pvalues = tvalues.mapv(|t| reference.two_sided(t));
        let crit = reference.critical(CONFIDENCE);
        let conf_int: Vec<(f64, f64)> = params
            .iter()
            .zip(bse.iter())
            .map(|(b, se)| (b - crit * se, b + crit * se))
            .collect();

        let ssr = residuals.dot(&residuals);
        let y_mean = self.y.sum() / n as f64;
        let tss: f64 = self.y.iter().map(|v| (v - y_mean).powi(2)).sum();
        let rsquared = 1.0 - ssr / tss;
        let rsquared_adj = 1.0 - (n as f64 - 1.0) / df_resid * (1.0 - rsquared);

        let (fvalue, f_pvalue) = wald_slopes(&params, &cov_params, df_resid)?;

        let nf = n as f64;
        let llf = -nf / 2.0 * ((2.0 * PI).ln() + (ssr / nf).ln() + 1.0);
        let aic = -2.0 * llf + 2.0 * k as f64;
        let bic = -2.0 * llf + k as f64 * nf.ln();

        let diagnostics = Diagnostics::compute(&residuals, &self.x);

        tracing::debug!(
            formula = %self.formula,
            nobs = n,
            %cov_type,
            rsquared,
            "fitted OLS model"
        );

        Ok(OlsResults {
            formula: self.formula.clone(),
            names: self.formula.param_names(),
            params: params.to_vec(),
            bse: bse.to_vec(),
            tvalues: tvalues.to_vec(),
            pvalues: pvalues.to_vec(),
            conf_int,
            cov_params,
            nobs: n,
            df_model,
            df_resid,
            rsquared,
            rsquared_adj,
            fvalue,
            f_pvalue,
            llf,
            aic,
            bic,
            cov_type,
            diagnostics,
            residuals: residuals.to_vec(),
        })
    }
}

/// Reference distribution for coefficient tests.
enum Reference {
    Normal(Normal),
    StudentsT(StudentsT),
}

impl Reference {
    fn new(cov_type: CovType, df_resid: f64) -> Result<Self, RegressionError> {
        let no_dof = RegressionError::InsufficientData {
            required: 1,
            actual: 0,
        };
        if cov_type.is_robust() {
            Normal::new(0.0, 1.0).map(Self::Normal).map_err(|_| no_dof)
        } else {
            StudentsT::new(0.0, 1.0, df_resid)
                .map(Self::StudentsT)
                .map_err(|_| no_dof)
        }
    }

    fn sf(&self, x: f64) -> f64 {
        match self {
            Self::Normal(d) => d.sf(x),
            Self::StudentsT(d) => d.sf(x),
        }
    }

    fn two_sided(&self, statistic: f64) -> f64 {
        if statistic.is_nan() {
            return f64::NAN;
        }
        2.0 * self.sf(statistic.abs())
    }

    fn critical(&self, confidence: f64) -> f64 {
        let q = 1.0 - (1.0 - confidence) / 2.0;
        match self {
            Self::Normal(d) => d.inverse_cdf(q),
            Self::StudentsT(d) => d.inverse_cdf(q),
        }
    }
}

/// Wald test that every slope is zero, returned as (F, p-value).
fn wald_slopes(
    params: &Array1<f64>,
    cov_params: &Array2<f64>,
    df_resid: f64,
) -> Result<(f64, f64), RegressionError> {
    let k = params.len();
    if k < 2 {
        return Ok((f64::NAN, f64::NAN));
    }
    let q = k - 1;
    let slopes = params.slice(s![1..]);
    let v = cov_params.slice(s![1.., 1..]).to_owned();
    let statistic = match invert(&v) {
        Ok(v_inv) => slopes.dot(&v_inv.dot(&slopes)) / q as f64,
        Err(RegressionError::Singular) => return Ok((f64::NAN, f64::NAN)),
        Err(e) => return Err(e),
    };
    let pvalue = FisherSnedecor::new(q as f64, df_resid)
        .map_or(f64::NAN, |dist| dist.sf(statistic));
    Ok((statistic, pvalue))
}

/// One row of a coefficient table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    /// Parameter name
    pub name: String,
    /// Point estimate
    pub coef: f64,
    /// Standard error
    pub std_err: f64,
    /// z or t statistic
    pub statistic: f64,
    /// Two-sided p-value
    pub pvalue: f64,
    /// Lower 95% bound
    pub ci_lower: f64,
    /// Upper 95% bound
    pub ci_upper: f64,
}

/// Results of an OLS fit.
#[derive(Debug, Clone)]
pub struct OlsResults {
    /// Fitted formula
    pub formula: Formula,
    /// Parameter names, intercept first
    pub names: Vec<String>,
    /// Coefficient estimates
    pub params: Vec<f64>,
    /// Standard errors
    pub bse: Vec<f64>,
    /// z statistics for robust fits, t statistics otherwise
    pub tvalues: Vec<f64>,
    /// Two-sided p-values
    pub pvalues: Vec<f64>,
    /// 95% confidence intervals
    pub conf_int: Vec<(f64, f64)>,
    /// Coefficient covariance matrix
    pub cov_params: Array2<f64>,
    /// Number of observations
    pub nobs: usize,
    /// Number of slopes
    pub df_model: f64,
    /// Residual degrees of freedom
    pub df_resid: f64,
    /// Coefficient of determination
    pub rsquared: f64,
    /// Adjusted R²
    pub rsquared_adj: f64,
    /// Wald F statistic for all slopes
    pub fvalue: f64,
    /// p-value of the F statistic
    pub f_pvalue: f64,
    /// Gaussian log-likelihood
    pub llf: f64,
    /// Akaike information criterion
    pub aic: f64,
    /// Bayesian information criterion
    pub bic: f64,
    /// Covariance type used for inference
    pub cov_type: CovType,
    /// Residual diagnostics
    pub diagnostics: Diagnostics,
    /// Residuals in observation order
    pub residuals: Vec<f64>,
}

impl OlsResults {
    /// Coefficient table rows in parameter order.
    pub fn coefficients(&self) -> Vec<Coefficient> {
        (0..self.names.len())
            .map(|i| Coefficient {
                name: self.names[i].clone(),
                coef: self.params[i],
                std_err: self.bse[i],
                statistic: self.tvalues[i],
                pvalue: self.pvalues[i],
                ci_lower: self.conf_int[i].0,
                ci_upper: self.conf_int[i].1,
            })
            .collect()
    }

    /// Look up a coefficient by name.
    pub fn coefficient(&self, name: &str) -> Option<Coefficient> {
        self.coefficients().into_iter().find(|c| c.name == name)
    }

    /// Number of estimated parameters including the intercept.
    pub fn k(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn simple() -> Ols {
        // y = 1 + 2x with small perturbations
        let x = array![[0.0], [1.0], [2.0], [3.0], [4.0], [5.0]];
        let y = array![1.1, 2.9, 5.2, 6.8, 9.1, 11.0];
        Ols::new(Formula::new("y", &["x"]), y, x).unwrap()
    }

    #[test]
    fn test_simple_regression() {
        let results = simple().fit(CovType::NonRobust).unwrap();
        // x̄ = 2.5, Sxx = 17.5, Sxy = 34.85
        assert_relative_eq!(results.params[1], 34.85 / 17.5, epsilon = 1e-10);
        assert_relative_eq!(
            results.params[0],
            36.1 / 6.0 - 2.5 * 34.85 / 17.5,
            epsilon = 1e-10
        );
        assert_eq!(results.names, vec!["Intercept", "x"]);
        assert_eq!(results.nobs, 6);
        assert_relative_eq!(results.df_resid, 4.0);
        assert!(results.rsquared > 0.99);
    }

    #[test]
    fn test_single_slope_f_equals_t_squared() {
        let results = simple().fit(CovType::NonRobust).unwrap();
        assert_relative_eq!(results.fvalue, results.tvalues[1].powi(2), epsilon = 1e-8);
        assert_relative_eq!(results.f_pvalue, results.pvalues[1], epsilon = 1e-8);
    }

    #[test]
    fn test_robust_uses_normal_reference() {
        let results = simple().fit(CovType::HC1).unwrap();
        let normal = Normal::new(0.0, 1.0).unwrap();
        let expected = 2.0 * normal.sf(results.tvalues[1].abs());
        assert_relative_eq!(results.pvalues[1], expected, epsilon = 1e-12);
        let (lo, hi) = results.conf_int[1];
        assert_relative_eq!(hi - lo, 2.0 * 1.959_963_984_540_054 * results.bse[1], epsilon = 1e-8);
    }

    #[test]
    fn test_information_criteria() {
        let results = simple().fit(CovType::HC1).unwrap();
        assert_relative_eq!(results.aic, -2.0 * results.llf + 4.0, epsilon = 1e-12);
        assert_relative_eq!(
            results.bic,
            -2.0 * results.llf + 2.0 * 6.0_f64.ln(),
            epsilon = 1e-12
        );
        assert_eq!(results.k(), 2);
    }

    #[test]
    fn test_insufficient_observations() {
        let ols = Ols::new(
            Formula::new("y", &["a", "b"]),
            array![1.0, 2.0, 3.0],
            array![[1.0, 0.0], [2.0, 1.0], [3.0, 5.0]],
        )
        .unwrap();
        assert_eq!(
            ols.fit(CovType::HC1).unwrap_err(),
            RegressionError::InsufficientData {
                required: 3,
                actual: 3
            }
        );
    }

    #[test]
    fn test_collinear_design_is_singular() {
        let ols = Ols::new(
            Formula::new("y", &["a", "b"]),
            array![1.0, 2.0, 3.0, 5.0, 4.0],
            array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0], [4.0, 8.0], [5.0, 10.0]],
        )
        .unwrap();
        assert_eq!(ols.fit(CovType::HC1).unwrap_err(), RegressionError::Singular);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let err = Ols::from_rows(
            Formula::new("y", &["a", "b"]),
            &[1.0, 2.0],
            &[vec![1.0, 2.0], vec![3.0]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            RegressionError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_coefficient_lookup() {
        let results = simple().fit(CovType::HC1).unwrap();
        let slope = results.coefficient("x").unwrap();
        assert_relative_eq!(slope.coef, results.params[1]);
        assert!(results.coefficient("missing").is_none());
    }
}
