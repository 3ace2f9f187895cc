//! Per-subsample summary statistics.

use crate::bootstrap::{BootstrapConfig, bootstrap_ci_sized};
use crate::descriptive::{mean, median, sample_std};
use crate::ttest::ttest_1samp;
use crate::wilcoxon::wilcoxon_signed_rank;
use serde::{Deserialize, Serialize};

/// One firm's value of a series together with its outlier flag.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Observation {
    /// Series value, `None` when missing.
    pub value: Option<f64>,
    /// Outlier flag; `Some(0.0)` marks a regular observation.
    pub outlier_flag: Option<f64>,
}

impl Observation {
    /// Create a new observation.
    pub const fn new(value: Option<f64>, outlier_flag: Option<f64>) -> Self {
        Self {
            value,
            outlier_flag,
        }
    }

    /// Pair values with their flags.
    pub fn zip(values: &[Option<f64>], flags: &[Option<f64>]) -> Vec<Self> {
        values
            .iter()
            .zip(flags)
            .map(|(&value, &flag)| Self::new(value, flag))
            .collect()
    }

    /// Whether the observation survives outlier exclusion.
    pub fn is_regular(&self) -> bool {
        self.outlier_flag == Some(0.0)
    }
}

/// Options for [`compute_subsample_stats_with`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Keep only observations flagged as regular.
    pub exclude_outliers: bool,
    /// Bootstrap settings; `None` leaves the interval undefined.
    pub bootstrap: Option<BootstrapConfig>,
}

/// Summary of one series within one subsample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Number of usable observations.
    pub n: usize,
    /// Sample mean.
    pub mean: f64,
    /// Sample standard deviation (`n - 1`).
    pub std: f64,
    /// Sample median.
    pub median: f64,
    /// Two-sided t-test p-value against zero.
    pub t_pvalue: f64,
    /// Two-sided Wilcoxon signed-rank p-value against zero.
    pub wilcoxon_pvalue: f64,
    /// Lower bootstrap confidence bound for the mean.
    pub ci_lower: f64,
    /// Upper bootstrap confidence bound for the mean.
    pub ci_upper: f64,
}

impl StatsSummary {
    /// Summary of an empty sample: every statistic is NaN.
    pub const fn empty() -> Self {
        Self {
            n: 0,
            mean: f64::NAN,
            std: f64::NAN,
            median: f64::NAN,
            t_pvalue: f64::NAN,
            wilcoxon_pvalue: f64::NAN,
            ci_lower: f64::NAN,
            ci_upper: f64::NAN,
        }
    }

    /// Check if no observations were usable.
    pub const fn is_empty(&self) -> bool {
        self.n == 0
    }
}

/// Summarise a sample, optionally excluding outliers and bootstrapping.
///
/// The bootstrap uses [`BootstrapConfig::default`] (999 resamples, seed 42).
pub fn compute_subsample_stats(
    sample: &[Observation],
    exclude_outliers: bool,
    bootstrap_enabled: bool,
) -> StatsSummary {
    let config = StatsConfig {
        exclude_outliers,
        bootstrap: bootstrap_enabled.then(BootstrapConfig::default),
    };
    compute_subsample_stats_with(sample, &config)
}

/// Summarise a sample with explicit configuration.
///
/// Bootstrap draws have one value per row that survives outlier exclusion,
/// missing values included, so gaps in a subsample lengthen each draw.
pub fn compute_subsample_stats_with(sample: &[Observation], config: &StatsConfig) -> StatsSummary {
    let rows: Vec<&Observation> = sample
        .iter()
        .filter(|obs| !config.exclude_outliers || obs.is_regular())
        .collect();
    let values: Vec<f64> = rows
        .iter()
        .filter_map(|obs| obs.value)
        .filter(|v| !v.is_nan())
        .collect();

    let n = values.len();
    if n == 0 {
        return StatsSummary::empty();
    }

    let t_pvalue = ttest_1samp(&values, 0.0).pvalue;

    let wilcoxon_pvalue = match wilcoxon_signed_rank(&values) {
        Ok(result) => result.pvalue,
        Err(err) => {
            tracing::debug!(n, %err, "signed-rank test undefined");
            f64::NAN
        }
    };

    let (ci_lower, ci_upper) = match &config.bootstrap {
        Some(bootstrap) => bootstrap_ci_sized(&values, rows.len(), bootstrap),
        None => (f64::NAN, f64::NAN),
    };

    StatsSummary {
        n,
        mean: mean(&values),
        std: sample_std(&values),
        median: median(&values),
        t_pvalue,
        wilcoxon_pvalue,
        ci_lower,
        ci_upper,
    }
}
