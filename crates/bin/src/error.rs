//! Errors surfaced by the command-line interface.

use rightsarb::StudyError;
use rightsarb::data::DataError;
use rightsarb::output::{ExportError, ReportError};
use rightsarb::stats::StatsError;
use thiserror::Error;

/// Error type for CLI operations.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration value is out of range.
    #[error("Invalid setting: {0}")]
    Invalid(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input data error.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Study run error.
    #[error(transparent)]
    Study(#[from] StudyError),

    /// Export error.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Report error.
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl From<StatsError> for CliError {
    fn from(err: StatsError) -> Self {
        Self::Invalid(err.to_string())
    }
}
