#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rightsarb/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod events;
pub mod portfolios;
pub mod reader;
pub mod subsample;

pub use error::{DataError, Result};
pub use events::EventPanel;
pub use portfolios::{DesignData, PortfolioPanel};
pub use reader::{CsvOptions, read_csv};
pub use subsample::Subsample;

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
