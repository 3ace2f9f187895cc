//! The fixed design of the rights issue study.
//!
//! Series and portfolios are defined in [`series`] and [`portfolios`]; the
//! functions here run one unit of the study: a series across the ten
//! subsamples, or the three nested models of one portfolio.

pub mod portfolios;
pub mod series;

pub use portfolios::{PortfolioSpec, portfolios};
pub use series::{SeriesKind, SeriesSpec, arbitrage_series, event_series};

use rightsarb_data::{DataError, EventPanel, PortfolioPanel, Subsample};
use rightsarb_output::SummaryTable;
use rightsarb_regress::{CovType, Ols, OlsResults, RegressionError};
use rightsarb_stats::{BootstrapConfig, Observation, compute_subsample_stats_with};
use thiserror::Error;

/// Errors raised while running the study.
#[derive(Debug, Error)]
pub enum StudyError {
    /// Input panel could not be read or lacks a column
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Model could not be fitted
    #[error("Regression error for {formula}: {source}")]
    Regression {
        /// Formula being fitted
        formula: String,
        /// Underlying failure
        source: RegressionError,
    },
}

/// Result type alias for the study.
pub type Result<T> = std::result::Result<T, StudyError>;

/// A series of the panel paired with its outlier flags.
pub fn observations(
    panel: &EventPanel,
    series: &str,
    outlier_column: Option<&str>,
) -> Result<Vec<Observation>> {
    let (values, flags) = panel.series_with_flags(series, outlier_column)?;
    Ok(Observation::zip(&values, &flags))
}

/// Summarise one series on every subsample, one table row per subsample.
pub fn summarize_series(
    panel: &EventPanel,
    series: &SeriesSpec,
    bootstrap: &BootstrapConfig,
) -> Result<SummaryTable> {
    let config = series.kind.stats_config(bootstrap);
    let mut table = SummaryTable::new(series.title(), series.name.as_str());

    for subsample in Subsample::all() {
        let subset = panel.filter(subsample)?;
        let sample = observations(&subset, &series.name, series.outlier_flag.as_deref())?;
        let stats = compute_subsample_stats_with(&sample, &config);
        tracing::debug!(
            series = %series.name,
            subsample = %subsample,
            n = stats.n,
            "summarised subsample"
        );
        table.push(subsample.label(), stats);
    }

    Ok(table)
}

/// A fitted model together with the months it was estimated on.
#[derive(Debug, Clone)]
pub struct ModelFit {
    /// Months kept after listwise deletion, in panel order.
    pub dates: Vec<String>,
    /// Estimates and inference.
    pub results: OlsResults,
}

impl ModelFit {
    /// First and last month of the estimation sample.
    pub fn period(&self) -> Option<(&str, &str)> {
        Some((self.dates.first()?.as_str(), self.dates.last()?.as_str()))
    }
}

/// Fit the three nested models of a portfolio.
pub fn fit_portfolio_models(
    panel: &PortfolioPanel,
    portfolio: &PortfolioSpec,
    cov_type: CovType,
) -> Result<Vec<ModelFit>> {
    portfolio
        .models()
        .into_iter()
        .map(|formula| {
            let design = panel.design(&formula.response, &formula.regressor_refs())?;
            let label = formula.to_string();
            let results = Ols::from_rows(formula, &design.y, &design.x)
                .and_then(|ols| ols.fit(cov_type))
                .map_err(|source| StudyError::Regression {
                    formula: label,
                    source,
                })?;
            Ok(ModelFit {
                dates: design.dates,
                results,
            })
        })
        .collect()
}
