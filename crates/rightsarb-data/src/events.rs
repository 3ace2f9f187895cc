//! Firm-level event panel (arbitrage and short-term event returns).

use crate::error::{DataError, Result};
use crate::reader::{CsvOptions, float_column, read_csv, require_columns};
use crate::subsample::Subsample;
use polars::prelude::*;
use std::path::Path;

/// Leading row-number column written by the spreadsheet export.
const ROW_NUMBER_COLUMN: &str = "#";

/// One row per rights offering.
#[derive(Debug, Clone)]
pub struct EventPanel {
    frame: DataFrame,
}

impl EventPanel {
    /// Wrap an existing frame.
    pub fn new(mut frame: DataFrame) -> Result<Self> {
        if frame.get_column_index(ROW_NUMBER_COLUMN).is_some() {
            frame = frame.drop(ROW_NUMBER_COLUMN)?;
        }
        Ok(Self { frame })
    }

    /// Read the panel from a delimited file.
    pub fn load(path: &Path, options: &CsvOptions) -> Result<Self> {
        let frame = read_csv(path, options)?;
        let panel = Self::new(frame)?;
        tracing::info!(
            path = %path.display(),
            offerings = panel.len(),
            "loaded event panel"
        );
        Ok(panel)
    }

    /// Number of offerings.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Check if the panel has no rows.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Restrict the panel to a subsample.
    pub fn filter(&self, subsample: Subsample) -> Result<Self> {
        let Some(mask) = subsample.mask() else {
            return Ok(self.clone());
        };
        if let Some(column) = subsample.column() {
            require_columns(&self.frame, &[column])?;
        }
        let frame = self.frame.clone().lazy().filter(mask).collect()?;
        tracing::debug!(subsample = %subsample, rows = frame.height(), "filtered panel");
        Ok(Self { frame })
    }

    /// Values of a numeric series, `None` where missing.
    pub fn series(&self, name: &str) -> Result<Vec<Option<f64>>> {
        float_column(&self.frame, name)
    }

    /// A series together with its outlier flags.
    ///
    /// Without an outlier column every flag is `None`.
    pub fn series_with_flags(
        &self,
        name: &str,
        outlier_column: Option<&str>,
    ) -> Result<(Vec<Option<f64>>, Vec<Option<f64>>)> {
        let values = self.series(name)?;
        let flags = match outlier_column {
            Some(flag) => float_column(&self.frame, flag)?,
            None => vec![None; values.len()],
        };
        if flags.len() != values.len() {
            return Err(DataError::Parse(format!(
                "series {name} has {} rows but its flags have {}",
                values.len(),
                flags.len()
            )));
        }
        Ok((values, flags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_panel() -> EventPanel {
        let frame = df! {
            "#" => [1i64, 2, 3, 4, 5],
            "RET1" => [Some(0.01), Some(-0.02), None, Some(0.03), Some(0.00)],
            "OUT1" => [0i64, 0, 0, 1, 0],
            "IBEX" => [1i64, 0, 1, 0, 0],
            "MAB" => [0i64, 0, 0, 1, 1],
            "DIL" => [0.2, 0.7, 0.5, 0.1, 0.9],
            "PRC" => [Some(1i64), Some(0), None, Some(0), Some(1)],
            "INS" => [1i64, 1, 0, 0, 1],
        }
        .unwrap();
        EventPanel::new(frame).unwrap()
    }

    #[test]
    fn test_row_number_column_dropped() {
        let panel = sample_panel();
        assert!(matches!(
            panel.series("#"),
            Err(DataError::MissingColumn(name)) if name == "#"
        ));
        assert_eq!(panel.len(), 5);
    }

    #[test]
    fn test_filter_counts() {
        let panel = sample_panel();
        let expected = [
            (Subsample::Total, 5),
            (Subsample::Ibex, 2),
            (Subsample::MainMarket, 3),
            (Subsample::Alternative, 2),
            (Subsample::Dilutive, 3),
            (Subsample::NonDilutive, 2),
            (Subsample::Released, 2),
            (Subsample::Insured, 3),
            (Subsample::NonInsured, 2),
        ];
        for (subsample, rows) in expected {
            assert_eq!(panel.filter(subsample).unwrap().len(), rows, "{subsample}");
        }
    }

    #[test]
    fn test_monetary_keeps_missing_pricing() {
        let panel = sample_panel();
        // PRC = [1, 0, missing, 0, 1]: the missing row compares unequal to 1.
        assert_eq!(panel.filter(Subsample::Monetary).unwrap().len(), 3);
    }

    #[test]
    fn test_series_with_flags() {
        let panel = sample_panel();
        let (values, flags) = panel.series_with_flags("RET1", Some("OUT1")).unwrap();
        assert_eq!(values[2], None);
        assert_eq!(flags, vec![Some(0.0), Some(0.0), Some(0.0), Some(1.0), Some(0.0)]);

        let (_, flags) = panel.series_with_flags("RET1", None).unwrap();
        assert!(flags.iter().all(Option::is_none));
    }

    #[test]
    fn test_missing_series() {
        let panel = sample_panel();
        assert!(matches!(panel.series("ANN"), Err(DataError::MissingColumn(_))));
    }
}
