//! Export of study tables.
//!
//! Summary tables and regression coefficient tables can be written as CSV
//! (one flat record per row) or as compact or pretty-printed JSON.

use crate::summary::SummaryTable;
use rightsarb_regress::{Coefficient, OlsResults};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized CSV was not valid UTF-8.
    #[error("Encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Comma-separated values format.
    #[default]
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" | "prettyjson" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Coefficients and fit statistics of one model on one portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegressionExport {
    /// Portfolio the model was fitted on.
    pub portfolio: String,

    /// Formula as written, e.g. `Total ~ IBEX35 + SMB + HML`.
    pub formula: String,

    /// Covariance type label.
    pub cov_type: String,

    /// Number of observations.
    pub nobs: usize,

    /// First month of the estimation sample.
    pub start: Option<String>,

    /// Last month of the estimation sample.
    pub end: Option<String>,

    /// R².
    pub rsquared: f64,

    /// Adjusted R².
    pub rsquared_adj: f64,

    /// Wald F statistic.
    pub fvalue: f64,

    /// p-value of the F statistic.
    pub f_pvalue: f64,

    /// Coefficient table.
    pub coefficients: Vec<Coefficient>,
}

impl RegressionExport {
    /// Capture the exportable part of a fit.
    pub fn from_results(portfolio: impl Into<String>, results: &OlsResults) -> Self {
        Self {
            portfolio: portfolio.into(),
            formula: results.formula.to_string(),
            cov_type: results.cov_type.to_string(),
            nobs: results.nobs,
            start: None,
            end: None,
            rsquared: results.rsquared,
            rsquared_adj: results.rsquared_adj,
            fvalue: results.fvalue,
            f_pvalue: results.f_pvalue,
            coefficients: results.coefficients(),
        }
    }

    /// Record the estimation sample from its first and last date.
    #[must_use]
    pub fn with_period(mut self, dates: &[String]) -> Self {
        self.start = dates.first().cloned();
        self.end = dates.last().cloned();
        self
    }

    /// Flatten into one CSV record per coefficient.
    pub fn to_records(&self) -> Vec<CoefficientRecord> {
        self.coefficients
            .iter()
            .map(|c| CoefficientRecord {
                portfolio: self.portfolio.clone(),
                formula: self.formula.clone(),
                cov_type: self.cov_type.clone(),
                nobs: self.nobs,
                start: self.start.clone(),
                end: self.end.clone(),
                rsquared: self.rsquared,
                term: c.name.clone(),
                coef: c.coef,
                std_err: c.std_err,
                statistic: c.statistic,
                pvalue: c.pvalue,
                ci_lower: c.ci_lower,
                ci_upper: c.ci_upper,
            })
            .collect()
    }
}

/// Flattened coefficient row for CSV export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoefficientRecord {
    /// Portfolio name.
    pub portfolio: String,
    /// Model formula.
    pub formula: String,
    /// Covariance type label.
    pub cov_type: String,
    /// Number of observations.
    pub nobs: usize,
    /// First month of the sample.
    pub start: Option<String>,
    /// Last month of the sample.
    pub end: Option<String>,
    /// R² of the model.
    pub rsquared: f64,
    /// Parameter name.
    pub term: String,
    /// Estimate.
    pub coef: f64,
    /// Standard error.
    pub std_err: f64,
    /// z or t statistic.
    pub statistic: f64,
    /// Two-sided p-value.
    pub pvalue: f64,
    /// Lower 95% bound.
    pub ci_lower: f64,
    /// Upper 95% bound.
    pub ci_upper: f64,
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Serialize records into a CSV document with a header row.
fn records_to_csv<T: Serialize>(records: &[T]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, ExportError> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

impl Exporter for SummaryTable {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => records_to_csv(&self.to_records()),
            ExportFormat::Json => to_json(self, false),
            ExportFormat::PrettyJson => to_json(self, true),
        }
    }
}

impl Exporter for Vec<SummaryTable> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let records: Vec<_> = self.iter().flat_map(SummaryTable::to_records).collect();
                records_to_csv(&records)
            }
            ExportFormat::Json => to_json(self, false),
            ExportFormat::PrettyJson => to_json(self, true),
        }
    }
}

impl Exporter for RegressionExport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => records_to_csv(&self.to_records()),
            ExportFormat::Json => to_json(self, false),
            ExportFormat::PrettyJson => to_json(self, true),
        }
    }
}

impl Exporter for Vec<RegressionExport> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let records: Vec<_> = self.iter().flat_map(RegressionExport::to_records).collect();
                records_to_csv(&records)
            }
            ExportFormat::Json => to_json(self, false),
            ExportFormat::PrettyJson => to_json(self, true),
        }
    }
}
