//! SigLab Runner — batch orchestration around the core pipeline.
//!
//! Drives `siglab-core` over a list of assets: fetch series via a
//! provider, compute indicators, scan strategies, value the results, and
//! hand everything to export/report sinks. A failed asset never aborts
//! the batch; failures are recorded per symbol.

pub mod config;
pub mod export;
pub mod provider;
pub mod report;
pub mod result;
pub mod runner;

pub use config::{ConfigError, RunConfig};
pub use export::{CsvExportSink, ExportSink, NullExport};
pub use provider::{
    AssetListProvider, CsvDataDir, DataError, SeriesProvider, SyntheticProvider,
};
pub use report::{Outcome, ReportSink, StdoutReport, VecReport};
pub use result::{AssetFailure, AssetResult, BatchSummary, StrategyValuation};
pub use runner::{BatchRunner, RunError};
