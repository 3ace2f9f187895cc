//! Run reports for the rights-issue study.

use crate::export::RegressionExport;
use crate::summary::SummaryTable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Every table produced by one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report title.
    pub title: String,

    /// Report generation timestamp.
    pub timestamp: DateTime<Utc>,

    /// Free-form run settings (seed, covariance type, input files).
    pub settings: BTreeMap<String, serde_json::Value>,

    /// Descriptive statistics tables.
    pub summary_tables: Vec<SummaryTable>,

    /// Regression coefficient tables.
    pub regressions: Vec<RegressionExport>,
}

impl Report {
    /// Create a new report.
    pub fn new(title: String) -> Self {
        Self {
            title,
            timestamp: Utc::now(),
            settings: BTreeMap::new(),
            summary_tables: Vec::new(),
            regressions: Vec::new(),
        }
    }

    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ReportError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    title: Option<String>,
    settings: BTreeMap<String, serde_json::Value>,
    summary_tables: Vec<SummaryTable>,
    regressions: Vec<RegressionExport>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Record a run setting.
    pub fn setting(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Add summary tables.
    pub fn summary_tables(mut self, tables: impl IntoIterator<Item = SummaryTable>) -> Self {
        self.summary_tables.extend(tables);
        self
    }

    /// Add regression tables.
    pub fn regressions(mut self, regressions: impl IntoIterator<Item = RegressionExport>) -> Self {
        self.regressions.extend(regressions);
        self
    }

    /// Build the report.
    pub fn build(self) -> Report {
        let mut report = Report::new(
            self.title
                .unwrap_or_else(|| "Rights issue arbitrage study".to_string()),
        );
        report.settings = self.settings;
        report.summary_tables = self.summary_tables;
        report.regressions = self.regressions;
        report
    }
}
