//! Run configuration.
//!
//! Settings come from built-in defaults, optionally replaced by a TOML file
//! passed with `--config`, and finally overridden by command-line flags.

use crate::error::CliError;
use rightsarb::data::CsvOptions;
use rightsarb::output::ExportFormat;
use rightsarb::regress::CovType;
use rightsarb::stats::BootstrapConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Input files and their CSV dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DataConfig {
    /// Firm-level arbitrage and short-term event panel
    pub arbitrage_path: PathBuf,
    /// Monthly long-term portfolio panel
    pub long_term_path: PathBuf,
    /// Field delimiter
    pub delimiter: char,
    /// Whether decimals use a comma
    pub decimal_comma: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            arbitrage_path: PathBuf::from("Verdu_Carchano_Farinos_2024_Data_Arbitrage_STES.csv"),
            long_term_path: PathBuf::from("Verdu_Carchano_Farinos_2024_Data_LTES.csv"),
            delimiter: ';',
            decimal_comma: false,
        }
    }
}

impl DataConfig {
    /// CSV reader options.
    pub(crate) fn csv_options(&self) -> Result<CsvOptions, CliError> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                CliError::Invalid(format!("delimiter {:?} is not ASCII", self.delimiter))
            })?;
        Ok(CsvOptions {
            delimiter,
            decimal_comma: self.decimal_comma,
        })
    }
}

/// Regression settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RegressionConfig {
    /// Coefficient covariance estimator
    pub cov_type: CovType,
}

/// Export settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct OutputConfig {
    /// Directory receiving exported tables; nothing is written when unset
    pub dir: Option<PathBuf>,
    /// File format of exported tables
    pub format: ExportFormat,
}

/// Complete configuration of a study run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct StudyConfig {
    /// Input files
    pub data: DataConfig,
    /// Bootstrap interval settings
    pub bootstrap: BootstrapConfig,
    /// Regression settings
    pub regression: RegressionConfig,
    /// Export settings
    pub output: OutputConfig,
}

impl StudyConfig {
    /// Load configuration from a TOML file.
    pub(crate) fn from_file(path: &Path) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub(crate) fn from_toml_str(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    /// Check settings that serde cannot.
    pub(crate) fn validate(&self) -> Result<(), CliError> {
        self.bootstrap.validate()?;
        self.data.csv_options()?;
        Ok(())
    }
}
