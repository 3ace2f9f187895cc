//! Rights issue arbitrage study CLI binary.
//!
//! Runs the arbitrage, short-term event and long-term regression parts of
//! the study on the two input panels and prints every table to stdout.

mod config;
mod error;
mod pipeline;

use clap::{Parser, Subcommand};
use config::StudyConfig;
use error::CliError;
use pipeline::RunOutputs;
use pipeline::batch::{print_tables, run_batch};
use pipeline::long_term::{print_fits, run_long_term, to_exports};
use rightsarb::data::{EventPanel, PortfolioPanel};
use rightsarb::output::ExportFormat;
use rightsarb::regress::CovType;
use rightsarb::{arbitrage_series, event_series, portfolios};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rightsarb")]
#[command(about = "Rights issue arbitrage and event study", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Export tables and a JSON report to this directory
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Export format (csv, json, pretty-json)
    #[arg(long, global = true)]
    format: Option<ExportFormat>,

    /// Bootstrap seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of bootstrap resamples
    #[arg(long, global = true)]
    resamples: Option<usize>,

    /// Regression covariance type (nonrobust, hc0, hc1, hc2, hc3)
    #[arg(long, global = true)]
    cov_type: Option<CovType>,

    /// Arbitrage and short-term event panel
    #[arg(long, global = true)]
    stes: Option<PathBuf>,

    /// Long-term portfolio panel
    #[arg(long, global = true)]
    ltes: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Arbitrage returns by subsample
    Arbitrage,

    /// Short-term event windows by subsample
    Events,

    /// Long-term factor regressions by portfolio
    LongTerm,

    /// Every part of the study (default)
    All,
}

impl Commands {
    const fn runs_arbitrage(self) -> bool {
        matches!(self, Self::Arbitrage | Self::All)
    }

    const fn runs_events(self) -> bool {
        matches!(self, Self::Events | Self::All)
    }

    const fn runs_long_term(self) -> bool {
        matches!(self, Self::LongTerm | Self::All)
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Initialise the stderr subscriber; `RUST_LOG` takes precedence.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<StudyConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading configuration");
            StudyConfig::from_file(path)?
        }
        None => StudyConfig::default(),
    };

    if let Some(dir) = &cli.output_dir {
        config.output.dir = Some(dir.clone());
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(seed) = cli.seed {
        config.bootstrap.seed = seed;
    }
    if let Some(resamples) = cli.resamples {
        config.bootstrap.resamples = resamples;
    }
    if let Some(cov_type) = cli.cov_type {
        config.regression.cov_type = cov_type;
    }
    if let Some(path) = &cli.stes {
        config.data.arbitrage_path = path.clone();
    }
    if let Some(path) = &cli.ltes {
        config.data.long_term_path = path.clone();
    }

    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let command = cli.command.unwrap_or(Commands::All);
    let csv = config.data.csv_options()?;
    let mut outputs = RunOutputs::default();

    if command.runs_arbitrage() || command.runs_events() {
        let panel = EventPanel::load(&config.data.arbitrage_path, &csv)?;

        if command.runs_arbitrage() {
            outputs.arbitrage = run_batch(&panel, &arbitrage_series(), &config.bootstrap)?;
            print_tables(&outputs.arbitrage);
        }
        if command.runs_events() {
            outputs.events = run_batch(&panel, &event_series(), &config.bootstrap)?;
            print_tables(&outputs.events);
        }
    }

    if command.runs_long_term() {
        let panel = PortfolioPanel::load(&config.data.long_term_path, &csv)?;
        let fits = run_long_term(&panel, &portfolios(), config.regression.cov_type)?;
        print_fits(&fits);
        outputs.regressions = to_exports(&fits);
    }

    pipeline::export(&config, outputs)
}
