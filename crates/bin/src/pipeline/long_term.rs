//! Long-term calendar-time regressions.

use super::progress_bar;
use crate::error::CliError;
use rightsarb::data::{DataError, PortfolioPanel};
use rightsarb::output::{RegressionExport, render_ols_summary};
use rightsarb::regress::CovType;
use rightsarb::{ModelFit, PortfolioSpec, StudyError, fit_portfolio_models};

/// Fitted models of one portfolio.
#[derive(Debug)]
pub(crate) struct PortfolioFit {
    /// Portfolio fitted
    pub portfolio: PortfolioSpec,
    /// The three nested models, in order
    pub models: Vec<ModelFit>,
}

/// Fit the nested models of every portfolio.
///
/// Portfolios whose columns are missing, or whose data leave no complete
/// months, are skipped with a warning.
pub(crate) fn run_long_term(
    panel: &PortfolioPanel,
    portfolios: &[PortfolioSpec],
    cov_type: CovType,
) -> Result<Vec<PortfolioFit>, CliError> {
    let pb = progress_bar(portfolios.len(), "Fitting portfolios...");
    let mut fits = Vec::with_capacity(portfolios.len());

    for portfolio in portfolios {
        pb.set_message(format!("Fitting {portfolio}"));
        match fit_portfolio_models(panel, portfolio, cov_type) {
            Ok(models) => fits.push(PortfolioFit {
                portfolio: portfolio.clone(),
                models,
            }),
            Err(StudyError::Data(
                e @ (DataError::MissingColumn(_) | DataError::NoCompleteRows { .. }),
            )) => {
                tracing::warn!(%portfolio, error = %e, "portfolio skipped");
            }
            Err(e) => {
                pb.finish_and_clear();
                return Err(e.into());
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message(format!("Fitted {} portfolios", fits.len()));
    Ok(fits)
}

/// Print each portfolio's banner followed by its model summaries.
pub(crate) fn print_fits(fits: &[PortfolioFit]) {
    let rule = "=".repeat(80);
    for fit in fits {
        println!("{rule}");
        println!("{}", fit.portfolio.title());
        println!("{rule}");
        for model in &fit.models {
            println!("\n OLS Model results for: {}\n", model.results.formula);
            println!("{}", render_ols_summary(&model.results));
            println!("\n{rule}");
        }
    }
}

/// Exportable coefficient tables of every fit.
pub(crate) fn to_exports(fits: &[PortfolioFit]) -> Vec<RegressionExport> {
    fits.iter()
        .flat_map(|fit| {
            fit.models
                .iter()
                .map(move |model| {
                    RegressionExport::from_results(fit.portfolio.name.as_str(), &model.results)
                        .with_period(&model.dates)
                })
        })
        .collect()
}
