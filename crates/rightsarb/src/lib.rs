#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rightsarb/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod study;

// Re-export main types from sub-crates
pub use rightsarb_data as data;
pub use rightsarb_output as output;
pub use rightsarb_regress as regress;
pub use rightsarb_stats as stats;

// Re-export the study design
pub use study::{
    ModelFit, PortfolioSpec, SeriesKind, SeriesSpec, StudyError, arbitrage_series, event_series,
    fit_portfolio_models, observations, portfolios, summarize_series,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
