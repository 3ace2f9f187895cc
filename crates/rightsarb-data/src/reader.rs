//! CSV ingestion.
//!
//! Both study files are semicolon-delimited with a header row. The reader
//! infers the schema from the whole file since the panels are small.

use crate::error::{DataError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for reading a study CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Field delimiter (default: `;`)
    pub delimiter: u8,
    /// Whether numbers use a decimal comma, e.g. `0,015` (default: false)
    pub decimal_comma: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            decimal_comma: false,
        }
    }
}

/// Read a delimited file with a header row into a `DataFrame`.
pub fn read_csv(path: &Path, options: &CsvOptions) -> Result<DataFrame> {
    if !path.exists() {
        return Err(DataError::FileNotFound(path.display().to_string()));
    }

    let parse_options = CsvParseOptions::default()
        .with_separator(options.delimiter)
        .with_decimal_comma(options.decimal_comma);

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read csv"
    );

    Ok(df)
}

/// Extract a column as nullable floats.
///
/// Integer columns are cast; NaN is reported as missing.
pub(crate) fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))?;
    let cast = column.cast(&DataType::Float64)?;
    let values = cast
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values)
}

/// Extract a column as strings (missing values become empty strings).
pub(crate) fn string_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = df
        .column(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))?;
    let cast = column.cast(&DataType::String)?;
    let values = cast
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect();
    Ok(values)
}

/// Check that every named column is present.
pub(crate) fn require_columns(df: &DataFrame, names: &[&str]) -> Result<()> {
    for name in names {
        if df.get_column_index(name).is_none() {
            return Err(DataError::MissingColumn((*name).to_string()));
        }
    }
    Ok(())
}
