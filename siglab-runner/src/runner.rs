//! Batch runner — drives the core pipeline across many assets.
//!
//! Per asset: fetch series → indicators → strategy scans → valuation →
//! export + report. The compute phase runs assets in parallel on the
//! rayon pool (each asset owns its series/frame/signals outright); the
//! sink phase replays outcomes sequentially in provider order, so export
//! files and report lines come out deterministically ordered.
//!
//! Within one asset the scans stay strictly sequential — they carry an
//! armed state across bars and must never be split.

use rayon::prelude::*;
use thiserror::Error;

use siglab_core::domain::TimeSeries;
use siglab_core::indicators::{IndicatorEngine, IndicatorFrame};
use siglab_core::signals::{SignalSeries, Strategy};
use siglab_core::valuation::valuate;

use crate::config::RunConfig;
use crate::export::ExportSink;
use crate::provider::{AssetListProvider, DataError, SeriesProvider};
use crate::report::ReportSink;
use crate::result::{AssetFailure, AssetResult, BatchSummary, StrategyValuation};

#[derive(Debug, Error)]
pub enum RunError {
    /// The candidate list itself was unavailable; nothing could run.
    #[error("asset list unavailable: {0}")]
    AssetList(#[from] DataError),

    /// Every asset in the batch failed. Individual failures are inside.
    #[error("all {} assets failed", failures.len())]
    AllAssetsFailed { failures: Vec<AssetFailure> },
}

/// Everything one asset's pipeline produced, held until the sink phase.
struct PipelineOutput {
    symbol: String,
    series: TimeSeries,
    frame: IndicatorFrame,
    signals: Vec<SignalSeries>,
    valuations: Vec<StrategyValuation>,
}

pub struct BatchRunner {
    config: RunConfig,
    assets: Box<dyn AssetListProvider>,
    series: Box<dyn SeriesProvider>,
}

impl BatchRunner {
    pub fn new(
        config: RunConfig,
        assets: Box<dyn AssetListProvider>,
        series: Box<dyn SeriesProvider>,
    ) -> Self {
        Self {
            config,
            assets,
            series,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn run(
        &self,
        export: &dyn ExportSink,
        report: &dyn ReportSink,
    ) -> Result<BatchSummary, RunError> {
        let mut symbols = self.assets.list_assets()?;
        if let Some(max) = self.config.max_assets {
            symbols.truncate(max);
        }

        let engine = IndicatorEngine::new(self.config.indicators.clone());
        let strategies: Vec<Box<dyn Strategy>> = self
            .config
            .strategies
            .iter()
            .map(|kind| kind.strategy())
            .collect();

        let outcomes: Vec<Result<PipelineOutput, AssetFailure>> = symbols
            .par_iter()
            .map(|symbol| self.run_asset(symbol, &engine, &strategies))
            .collect();

        let mut summary = BatchSummary::default();
        for outcome in outcomes {
            match outcome {
                Ok(output) => {
                    if let Err(e) =
                        export.export(&output.symbol, &output.series, &output.frame, &output.signals)
                    {
                        summary.failures.push(AssetFailure {
                            symbol: output.symbol,
                            error: format!("export failed: {e}"),
                        });
                        continue;
                    }
                    for sv in &output.valuations {
                        report.report(&output.symbol, sv.strategy, &sv.valuation);
                    }
                    summary.results.push(AssetResult {
                        symbol: output.symbol,
                        bar_count: output.series.len(),
                        valuations: output.valuations,
                    });
                }
                Err(failure) => summary.failures.push(failure),
            }
        }

        if summary.results.is_empty() && !summary.failures.is_empty() {
            return Err(RunError::AllAssetsFailed {
                failures: summary.failures,
            });
        }
        Ok(summary)
    }

    fn run_asset(
        &self,
        symbol: &str,
        engine: &IndicatorEngine,
        strategies: &[Box<dyn Strategy>],
    ) -> Result<PipelineOutput, AssetFailure> {
        let series = self
            .series
            .fetch(symbol, self.config.start_date, self.config.end_date)
            .map_err(|e| AssetFailure {
                symbol: symbol.to_string(),
                error: e.to_string(),
            })?;

        let frame = engine.compute(&series);
        let signals: Vec<SignalSeries> = strategies
            .iter()
            .map(|strategy| strategy.scan(&series, &frame))
            .collect();
        let valuations = signals
            .iter()
            .map(|signal_series| StrategyValuation {
                strategy: signal_series.kind,
                valuation: valuate(&series, signal_series),
            })
            .collect();

        Ok(PipelineOutput {
            symbol: symbol.to_string(),
            series,
            frame,
            signals,
            valuations,
        })
    }
}
