//! Drivers for the three parts of the study.
//!
//! Each driver computes its tables behind a progress bar, then prints them to
//! stdout. Tables are collected so they can be exported once the run ends.

pub(crate) mod batch;
pub(crate) mod long_term;

use crate::config::StudyConfig;
use crate::error::CliError;
use indicatif::{ProgressBar, ProgressStyle};
use rightsarb::output::{Exporter, RegressionExport, ReportBuilder, SummaryTable};
use std::fs;
use std::time::Duration;

/// Tables produced by a run.
#[derive(Debug, Default)]
pub(crate) struct RunOutputs {
    /// Arbitrage summary tables
    pub arbitrage: Vec<SummaryTable>,
    /// Short-term event summary tables
    pub events: Vec<SummaryTable>,
    /// Long-term regression tables
    pub regressions: Vec<RegressionExport>,
}

impl RunOutputs {
    fn is_empty(&self) -> bool {
        self.arbitrage.is_empty() && self.events.is_empty() && self.regressions.is_empty()
    }
}

/// Progress bar drawn on stderr; hidden when `len` is zero.
pub(crate) fn progress_bar(len: usize, message: &str) -> ProgressBar {
    if len == 0 {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}

/// Write every table and a JSON report to the configured directory.
pub(crate) fn export(config: &StudyConfig, outputs: RunOutputs) -> Result<(), CliError> {
    let Some(dir) = &config.output.dir else {
        return Ok(());
    };
    if outputs.is_empty() {
        tracing::warn!("nothing to export");
        return Ok(());
    }
    fs::create_dir_all(dir)?;

    let format = config.output.format;
    let ext = format.extension();
    let mut written = Vec::new();

    if !outputs.arbitrage.is_empty() {
        let path = dir.join(format!("arbitrage.{ext}"));
        outputs.arbitrage.export_to_file(&path, format)?;
        written.push(path);
    }
    if !outputs.events.is_empty() {
        let path = dir.join(format!("short_term_events.{ext}"));
        outputs.events.export_to_file(&path, format)?;
        written.push(path);
    }
    if !outputs.regressions.is_empty() {
        let path = dir.join(format!("long_term_regressions.{ext}"));
        outputs.regressions.export_to_file(&path, format)?;
        written.push(path);
    }

    let report = ReportBuilder::new()
        .setting("arbitrage_path", config.data.arbitrage_path.display().to_string())
        .setting("long_term_path", config.data.long_term_path.display().to_string())
        .setting("bootstrap_resamples", config.bootstrap.resamples)
        .setting("bootstrap_seed", config.bootstrap.seed)
        .setting("bootstrap_confidence", config.bootstrap.confidence)
        .setting("cov_type", config.regression.cov_type.to_string())
        .summary_tables(outputs.arbitrage.into_iter().chain(outputs.events))
        .regressions(outputs.regressions)
        .build();
    let report_path = dir.join("report.json");
    report.write_to_file(&report_path)?;
    written.push(report_path);

    for path in &written {
        tracing::info!(path = %path.display(), "exported");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rightsarb::stats::StatsSummary;

    #[test]
    fn test_export_writes_tables_and_report() {
        let dir = std::env::temp_dir().join(format!("rightsarb-bin-export-{}", std::process::id()));
        let mut config = StudyConfig::default();
        config.output.dir = Some(dir.clone());

        let mut table = SummaryTable::new("banner", "ANN");
        table.push("Total Sample", StatsSummary::empty());
        let outputs = RunOutputs {
            events: vec![table],
            ..RunOutputs::default()
        };

        export(&config, outputs).unwrap();
        assert!(dir.join("short_term_events.csv").exists());
        assert!(dir.join("report.json").exists());
        assert!(!dir.join("arbitrage.csv").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_export_without_dir_is_noop() {
        let config = StudyConfig::default();
        assert!(export(&config, RunOutputs::default()).is_ok());
    }
}
