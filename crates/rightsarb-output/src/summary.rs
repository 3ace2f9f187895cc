//! Subsample summary tables.
//!
//! A [`SummaryTable`] collects the statistics of one series across the
//! subsamples of the study, one row per subsample, and renders them for the
//! terminal or for documentation.

use rightsarb_stats::StatsSummary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column headers shared by every rendering.
const HEADERS: [&str; 8] = [
    "N",
    "Mean",
    "Std",
    "Median",
    "T-test p-value",
    "Wilcoxon p-value",
    "Bootstrap CI Lower",
    "Bootstrap CI Upper",
];

const LABEL_WIDTH: usize = 14;

/// One subsample's statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryRow {
    /// Subsample label, e.g. `Total Sample`.
    pub label: String,

    /// Statistics computed on the subsample.
    pub stats: StatsSummary,
}

impl SummaryRow {
    /// Create a new row.
    pub fn new(label: impl Into<String>, stats: StatsSummary) -> Self {
        Self {
            label: label.into(),
            stats,
        }
    }
}

/// Statistics of one series across subsamples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryTable {
    /// Banner printed above the table.
    pub title: String,

    /// Series the statistics were computed on.
    pub series: String,

    /// Rows in subsample order.
    pub rows: Vec<SummaryRow>,
}

/// Flat row used for CSV export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryRecord {
    /// Series name.
    pub series: String,
    /// Subsample label.
    pub subsample: String,
    /// Number of observations.
    pub n: usize,
    /// Mean.
    pub mean: f64,
    /// Standard deviation.
    pub std: f64,
    /// Median.
    pub median: f64,
    /// t-test p-value.
    pub t_pvalue: f64,
    /// Wilcoxon p-value.
    pub wilcoxon_pvalue: f64,
    /// Lower bootstrap bound.
    pub ci_lower: f64,
    /// Upper bootstrap bound.
    pub ci_upper: f64,
}

impl SummaryTable {
    /// Create an empty table.
    pub fn new(title: impl Into<String>, series: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            series: series.into(),
            rows: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push(&mut self, label: impl Into<String>, stats: StatsSummary) {
        self.rows.push(SummaryRow::new(label, stats));
    }

    /// Look up a row by subsample label.
    pub fn row(&self, label: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Flatten into CSV records.
    pub fn to_records(&self) -> Vec<SummaryRecord> {
        self.rows
            .iter()
            .map(|row| SummaryRecord {
                series: self.series.clone(),
                subsample: row.label.clone(),
                n: row.stats.n,
                mean: row.stats.mean,
                std: row.stats.std,
                median: row.stats.median,
                t_pvalue: row.stats.t_pvalue,
                wilcoxon_pvalue: row.stats.wilcoxon_pvalue,
                ci_lower: row.stats.ci_lower,
                ci_upper: row.stats.ci_upper,
            })
            .collect()
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let widths: Vec<usize> = HEADERS.iter().map(|h| h.len().max(10)).collect();
        let total_width = LABEL_WIDTH + widths.iter().map(|w| w + 1).sum::<usize>();

        let mut output = String::new();
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&self.title);
        output.push('\n');
        output.push_str(&"=".repeat(80));
        output.push_str("\n\nSummary Table:\n");

        output.push_str(&format!("{:<LABEL_WIDTH$}", ""));
        for (header, width) in HEADERS.iter().zip(widths.iter().copied()) {
            output.push_str(&format!(" {header:>width$}"));
        }
        output.push('\n');
        output.push_str(&"-".repeat(total_width));
        output.push('\n');

        for row in &self.rows {
            let s = &row.stats;
            output.push_str(&format!("{:<LABEL_WIDTH$}", row.label));
            output.push_str(&format!(" {:>w$}", s.n, w = widths[0]));
            let values = [
                s.mean,
                s.std,
                s.median,
                s.t_pvalue,
                s.wilcoxon_pvalue,
                s.ci_lower,
                s.ci_upper,
            ];
            for (value, width) in values.iter().zip(widths[1..].iter().copied()) {
                output.push_str(&format!(" {:>width$}", format_value(*value)));
            }
            output.push('\n');
        }

        output.push('\n');
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output
    }
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii_table())
    }
}

/// Six decimals, `NaN` for undefined statistics.
fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.6}")
    }
}
