#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rightsarb/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod covariance;
pub mod diagnostics;
pub mod error;
pub mod formula;
pub mod linalg;
pub mod ols;

pub use covariance::{CovType, CovarianceEstimator, SandwichEstimator};
pub use diagnostics::Diagnostics;
pub use error::RegressionError;
pub use formula::{Formula, INTERCEPT};
pub use ols::{Coefficient, Ols, OlsResults};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
