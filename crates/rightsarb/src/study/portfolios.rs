//! Long-term calendar-time portfolios and their factor models.

use rightsarb_data::Subsample;
use rightsarb_regress::Formula;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size and value factors added in the second model.
const STYLE_FACTORS: [&str; 2] = ["SMB", "HML"];

/// Illiquidity factor added in the third model.
const LIQUIDITY_FACTOR: &str = "ILIQ";

/// A calendar-time portfolio of the long-term panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortfolioSpec {
    /// Portfolio column, e.g. `Total` or `nDIL`.
    pub name: String,
}

impl PortfolioSpec {
    /// Create a portfolio specification.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Market proxy: the small-cap index for alternative-market firms,
    /// the IBEX-35 otherwise.
    pub fn market_proxy(&self) -> &'static str {
        if self.name == "MAB" { "SmallCap" } else { "IBEX35" }
    }

    /// The three nested models: market, plus size and value, plus illiquidity.
    pub fn models(&self) -> [Formula; 3] {
        let market = self.market_proxy();
        let three = [market, STYLE_FACTORS[0], STYLE_FACTORS[1]];
        let four = [market, STYLE_FACTORS[0], STYLE_FACTORS[1], LIQUIDITY_FACTOR];
        [
            Formula::new(self.name.as_str(), &[market]),
            Formula::new(self.name.as_str(), &three),
            Formula::new(self.name.as_str(), &four),
        ]
    }

    /// Banner printed above the portfolio's regressions.
    pub fn title(&self) -> String {
        format!(
            "LONG-TERM EVENT STUDY - DESCRIPTIVE STATISTICS AND HYPOTHESIS TESTS for {}",
            self.name
        )
    }
}

impl fmt::Display for PortfolioSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One portfolio per subsample, in table order.
pub fn portfolios() -> Vec<PortfolioSpec> {
    Subsample::all()
        .iter()
        .map(|s| PortfolioSpec::new(s.portfolio()))
        .collect()
}
