#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rightsarb/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod bootstrap;
pub mod descriptive;
pub mod error;
pub mod summary;
pub mod ttest;
pub mod wilcoxon;

pub use bootstrap::{BootstrapConfig, Centering, bootstrap_ci, bootstrap_ci_sized};
pub use descriptive::{mean, median, percentile, sample_std};
pub use error::StatsError;
pub use summary::{
    Observation, StatsConfig, StatsSummary, compute_subsample_stats, compute_subsample_stats_with,
};
pub use ttest::{TTestResult, ttest_1samp};
pub use wilcoxon::{WilcoxonMethod, WilcoxonResult, wilcoxon_signed_rank};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
