//! Batch driver over event-panel series.

use super::progress_bar;
use crate::error::CliError;
use rightsarb::data::{DataError, EventPanel};
use rightsarb::output::SummaryTable;
use rightsarb::stats::BootstrapConfig;
use rightsarb::{SeriesSpec, StudyError, summarize_series};

/// Summarise each series across the subsamples.
///
/// A series whose column is absent from the panel is skipped with a warning.
pub(crate) fn run_batch(
    panel: &EventPanel,
    series: &[SeriesSpec],
    bootstrap: &BootstrapConfig,
) -> Result<Vec<SummaryTable>, CliError> {
    let pb = progress_bar(series.len(), "Summarising series...");
    let mut tables = Vec::with_capacity(series.len());

    for spec in series {
        pb.set_message(format!("Summarising {}", spec.name));
        match summarize_series(panel, spec, bootstrap) {
            Ok(table) => tables.push(table),
            Err(StudyError::Data(DataError::MissingColumn(column))) => {
                tracing::warn!(series = %spec, %column, "column missing, series skipped");
            }
            Err(e) => {
                pb.finish_and_clear();
                return Err(e.into());
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message(format!("Summarised {} series", tables.len()));
    Ok(tables)
}

/// Print tables in order.
pub(crate) fn print_tables(tables: &[SummaryTable]) {
    for table in tables {
        println!("{}", table.to_ascii_table());
    }
}
