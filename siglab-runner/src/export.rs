//! Per-asset table export (CSV).
//!
//! One row per date with every indicator and signal column, aligned by
//! index with the bars. Undefined values export as empty cells, never as
//! zeros, so a spreadsheet reader sees the same "no value" the strategies
//! saw.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use siglab_core::domain::TimeSeries;
use siglab_core::indicators::IndicatorFrame;
use siglab_core::signals::SignalSeries;

/// Sink for the full per-asset table (series + indicators + signals).
pub trait ExportSink: Send + Sync {
    fn export(
        &self,
        symbol: &str,
        series: &TimeSeries,
        frame: &IndicatorFrame,
        signals: &[SignalSeries],
    ) -> Result<()>;
}

/// Writes `<out_dir>/<SYMBOL>.csv` per asset.
#[derive(Debug, Clone)]
pub struct CsvExportSink {
    out_dir: PathBuf,
}

impl CsvExportSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.6}")).unwrap_or_default()
}

impl ExportSink for CsvExportSink {
    fn export(
        &self,
        symbol: &str,
        series: &TimeSeries,
        frame: &IndicatorFrame,
        signals: &[SignalSeries],
    ) -> Result<()> {
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("Failed to create export dir {}", self.out_dir.display()))?;
        let path = self.out_dir.join(format!("{symbol}.csv"));
        let mut file = File::create(&path)
            .with_context(|| format!("Failed to create export CSV {}", path.display()))?;

        let mut header = String::from(
            "date,open,high,low,close,sma20,sma50,sma200,boll_low,boll_high,\
             daily_return,monthly_return,annual_return,rsi",
        );
        for signal_series in signals {
            header.push(',');
            header.push_str(signal_series.kind.column());
        }
        writeln!(file, "{header}")?;

        for (i, bar) in series.bars().iter().enumerate() {
            write!(
                file,
                "{},{:.4},{:.4},{:.4},{:.4},{},{},{},{},{},{},{},{},{}",
                bar.date,
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                fmt_opt(frame.sma20[i]),
                fmt_opt(frame.sma50[i]),
                fmt_opt(frame.sma200[i]),
                fmt_opt(frame.boll_low[i]),
                fmt_opt(frame.boll_high[i]),
                fmt_opt(frame.daily_return[i]),
                fmt_opt(frame.monthly_return[i]),
                fmt_opt(frame.annual_return[i]),
                fmt_opt(frame.rsi[i]),
            )?;
            for signal_series in signals {
                let cell = signal_series.signals[i].map(|s| s.as_str()).unwrap_or("");
                write!(file, ",{cell}")?;
            }
            writeln!(file)?;
        }

        Ok(())
    }
}

/// Discards everything. For tests and report-only runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullExport;

impl ExportSink for NullExport {
    fn export(
        &self,
        _symbol: &str,
        _series: &TimeSeries,
        _frame: &IndicatorFrame,
        _signals: &[SignalSeries],
    ) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use siglab_core::domain::PriceBar;
    use siglab_core::indicators::{IndicatorConfig, IndicatorEngine};
    use siglab_core::signals::{Strategy as _, StrategyKind};

    fn sample_series(n: usize) -> TimeSeries {
        let base = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let bars = (0..n)
            .map(|i| {
                let close = 100.0 + i as f64;
                PriceBar {
                    date: base + chrono::Duration::days(i as i64),
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                }
            })
            .collect();
        TimeSeries::new("TEST", bars).unwrap()
    }

    #[test]
    fn writes_header_and_one_row_per_bar() {
        let dir = tempfile::tempdir().unwrap();
        let series = sample_series(30);
        let engine = IndicatorEngine::new(IndicatorConfig {
            sma_windows: [3, 7, 15],
            rsi_period: 5,
            bollinger_multiplier: 0.5,
        });
        let frame = engine.compute(&series);
        let signals: Vec<_> = StrategyKind::ALL
            .iter()
            .map(|k| k.strategy().scan(&series, &frame))
            .collect();

        let sink = CsvExportSink::new(dir.path());
        sink.export("TEST", &series, &frame, &signals).unwrap();

        let text = std::fs::read_to_string(dir.path().join("TEST.csv")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 31); // header + 30 rows
        assert_eq!(
            lines[0],
            "date,open,high,low,close,sma20,sma50,sma200,boll_low,boll_high,\
             daily_return,monthly_return,annual_return,rsi,signal_ma,signal_bo,signal_rsi"
        );
        assert!(lines[1].starts_with("2022-01-01,"));
    }

    #[test]
    fn undefined_values_export_as_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let series = sample_series(5);
        // 20/50/200 windows over 5 bars: every indicator is undefined.
        let frame = IndicatorEngine::new(IndicatorConfig::default()).compute(&series);

        let sink = CsvExportSink::new(dir.path());
        sink.export("TEST", &series, &frame, &[]).unwrap();

        let text = std::fs::read_to_string(dir.path().join("TEST.csv")).unwrap();
        let first_row = text.lines().nth(1).unwrap();
        assert!(first_row.ends_with(",,,,,,,,,"), "row was: {first_row}");
    }
}
