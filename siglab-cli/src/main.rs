//! SigLab CLI — run the indicator/signal pipeline over a batch of assets.
//!
//! Commands:
//! - `run` — scan a directory of CSV price files (or a synthetic
//!   universe) and write per-asset indicator/signal tables plus a
//!   valuation report per strategy.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use siglab_core::signals::StrategyKind;
use siglab_runner::{
    AssetListProvider, BatchRunner, CsvDataDir, CsvExportSink, RunConfig, SeriesProvider,
    StdoutReport, SyntheticProvider,
};

#[derive(Parser)]
#[command(name = "siglab", about = "SigLab — indicator/signal batch scanner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: indicators, strategy scans, valuation.
    Run {
        /// Path to a TOML run config. Flags below override its fields.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory of <SYMBOL>.csv price files.
        #[arg(long, conflicts_with = "synthetic")]
        data_dir: Option<PathBuf>,

        /// Use a seeded synthetic universe instead of CSV data.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Symbols for the synthetic universe.
        #[arg(long, value_delimiter = ',', requires = "synthetic")]
        symbols: Vec<String>,

        /// Seed for the synthetic universe.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output directory for per-asset CSV tables.
        #[arg(long, default_value = "results")]
        out_dir: PathBuf,

        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD).
        #[arg(long)]
        end: Option<String>,

        /// Cap on how many symbols are processed.
        #[arg(long)]
        max_assets: Option<usize>,

        /// Strategies to run. Defaults to all three.
        #[arg(long, value_delimiter = ',')]
        strategies: Vec<StrategyArg>,
    },
}

/// CLI-facing strategy names.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Ma,
    Bollinger,
    Rsi,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Ma => StrategyKind::MovingAverage,
            StrategyArg::Bollinger => StrategyKind::BandBreakout,
            StrategyArg::Rsi => StrategyKind::Oscillator,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            data_dir,
            synthetic,
            symbols,
            seed,
            out_dir,
            start,
            end,
            max_assets,
            strategies,
        } => run_cmd(
            config, data_dir, synthetic, symbols, seed, out_dir, start, end, max_assets,
            strategies,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_cmd(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    synthetic: bool,
    symbols: Vec<String>,
    seed: u64,
    out_dir: PathBuf,
    start: Option<String>,
    end: Option<String>,
    max_assets: Option<usize>,
    strategies: Vec<StrategyArg>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => RunConfig::from_file(&path)?,
        None => RunConfig::default(),
    };

    if let Some(start) = start.as_deref() {
        config.start_date = NaiveDate::parse_from_str(start, "%Y-%m-%d")?;
    }
    if let Some(end) = end.as_deref() {
        config.end_date = NaiveDate::parse_from_str(end, "%Y-%m-%d")?;
    }
    if max_assets.is_some() {
        config.max_assets = max_assets;
    }
    if !strategies.is_empty() {
        config.strategies = strategies.into_iter().map(StrategyKind::from).collect();
    }
    config.validate()?;

    let (assets, series): (Box<dyn AssetListProvider>, Box<dyn SeriesProvider>) = if synthetic {
        if symbols.is_empty() {
            bail!("--synthetic requires --symbols");
        }
        let provider = SyntheticProvider::new(symbols, seed);
        (Box::new(provider.clone()), Box::new(provider))
    } else if let Some(dir) = data_dir {
        let provider = CsvDataDir::new(dir);
        (Box::new(provider.clone()), Box::new(provider))
    } else {
        bail!("one of --data-dir or --synthetic is required");
    };

    println!("run id: {}", config.run_id());

    let runner = BatchRunner::new(config, assets, series);
    let export = CsvExportSink::new(&out_dir);
    let summary = runner.run(&export, &StdoutReport)?;

    println!();
    println!(
        "Batch complete: {}/{} assets succeeded, {} failed",
        summary.succeeded(),
        summary.total(),
        summary.failed()
    );
    for failure in &summary.failures {
        eprintln!("  FAIL {}: {}", failure.symbol, failure.error);
    }
    println!("Tables written to: {}", out_dir.display());

    Ok(())
}
