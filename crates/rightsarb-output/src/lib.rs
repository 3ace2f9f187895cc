#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rightsarb/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod regression;
pub mod report;
pub mod summary;

pub use export::{CoefficientRecord, ExportError, ExportFormat, Exporter, RegressionExport};
pub use regression::{render_ols_summary, render_ols_summary_at};
pub use report::{Report, ReportBuilder, ReportError};
pub use summary::{SummaryRecord, SummaryRow, SummaryTable};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
