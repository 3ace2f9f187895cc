//! One-sample Student's t-test.

use crate::descriptive::{mean, sample_std};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of a one-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    /// t statistic
    pub statistic: f64,
    /// Two-sided p-value
    pub pvalue: f64,
    /// Degrees of freedom (`n - 1`)
    pub df: f64,
}

impl TTestResult {
    const fn undefined(df: f64) -> Self {
        Self {
            statistic: f64::NAN,
            pvalue: f64::NAN,
            df,
        }
    }
}

/// Two-sided test that the population mean equals `popmean`.
///
/// The statistic and p-value are NaN when fewer than two observations are
/// given or every value equals `popmean`. Any other constant sample gives an
/// infinite statistic and a p-value of zero.
pub fn ttest_1samp(values: &[f64], popmean: f64) -> TTestResult {
    let n = values.len();
    let df = n as f64 - 1.0;
    if n < 2 {
        return TTestResult::undefined(df);
    }

    let std = sample_std(values);
    let se = std / (n as f64).sqrt();
    let statistic = (mean(values) - popmean) / se;
    if statistic.is_nan() {
        return TTestResult::undefined(df);
    }

    let pvalue = if statistic.is_infinite() {
        0.0
    } else {
        match StudentsT::new(0.0, 1.0, df) {
            Ok(dist) => (2.0 * dist.sf(statistic.abs())).min(1.0),
            Err(_) => f64::NAN,
        }
    };

    TTestResult {
        statistic,
        pvalue,
        df,
    }
}
