//! Long-term portfolio panel.
//!
//! One row per calendar month, indexed by the `Date` column. Columns hold
//! calendar-time portfolio returns (`Total`, `IBEX`, ...) and the factor
//! series used as regressors (`IBEX35`, `SmallCap`, `SMB`, `HML`, `ILIQ`).

use crate::error::{DataError, Result};
use crate::reader::{CsvOptions, float_column, read_csv, require_columns, string_column};
use polars::prelude::*;
use std::path::Path;

/// Name of the index column.
pub const DATE_COLUMN: &str = "Date";

/// Complete-case data for one regression.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignData {
    /// Response column name.
    pub response: String,
    /// Regressor column names, in design order.
    pub regressors: Vec<String>,
    /// Dates of the rows kept.
    pub dates: Vec<String>,
    /// Response values.
    pub y: Vec<f64>,
    /// Regressor rows (one inner vector per kept date, no intercept).
    pub x: Vec<Vec<f64>>,
    /// Rows dropped because a used column was missing.
    pub dropped: usize,
}

/// Monthly portfolio and factor returns.
#[derive(Debug, Clone)]
pub struct PortfolioPanel {
    frame: DataFrame,
    dates: Vec<String>,
}

impl PortfolioPanel {
    /// Wrap an existing frame with a `Date` column.
    pub fn new(frame: DataFrame) -> Result<Self> {
        let dates = string_column(&frame, DATE_COLUMN)?;
        Ok(Self { frame, dates })
    }

    /// Read the panel from a delimited file.
    pub fn load(path: &Path, options: &CsvOptions) -> Result<Self> {
        let frame = read_csv(path, options)?;
        let panel = Self::new(frame)?;
        tracing::info!(
            path = %path.display(),
            months = panel.len(),
            "loaded portfolio panel"
        );
        Ok(panel)
    }

    /// Number of months.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Check if the panel has no rows.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Values of a column, `None` where missing.
    pub fn series(&self, name: &str) -> Result<Vec<Option<f64>>> {
        float_column(&self.frame, name)
    }

    /// Build complete-case regression data with listwise deletion.
    pub fn design(&self, response: &str, regressors: &[&str]) -> Result<DesignData> {
        let mut used = Vec::with_capacity(regressors.len() + 1);
        used.push(response);
        used.extend_from_slice(regressors);
        require_columns(&self.frame, &used)?;

        let y_raw = self.series(response)?;
        let x_raw = regressors
            .iter()
            .map(|name| self.series(name))
            .collect::<Result<Vec<_>>>()?;

        let mut dates = Vec::new();
        let mut y = Vec::new();
        let mut x = Vec::new();
        let mut dropped = 0;

        for (row, response_value) in y_raw.iter().enumerate() {
            let row_values: Option<Vec<f64>> = x_raw.iter().map(|column| column[row]).collect();
            match (response_value, row_values) {
                (Some(value), Some(values)) => {
                    dates.push(self.dates[row].clone());
                    y.push(*value);
                    x.push(values);
                }
                _ => dropped += 1,
            }
        }

        if y.is_empty() {
            return Err(DataError::NoCompleteRows {
                response: response.to_string(),
                regressors: regressors.join(" + "),
            });
        }
        if dropped > 0 {
            tracing::debug!(response, dropped, "dropped incomplete months");
        }

        Ok(DesignData {
            response: response.to_string(),
            regressors: regressors.iter().map(|s| (*s).to_string()).collect(),
            dates,
            y,
            x,
            dropped,
        })
    }
}
