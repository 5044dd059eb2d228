//! Data provider traits and structured error types.
//!
//! Providers abstract over where price history comes from (a directory of
//! CSV files, a synthetic generator, a mock in tests) so the batch runner
//! never touches I/O details. Fetching from remote sources is out of
//! scope; anything that can yield a complete `TimeSeries` fits here.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use siglab_core::domain::{PriceBar, SeriesError, TimeSeries};

/// Structured error types for data operations.
///
/// All of these are recoverable at the batch level: the runner records
/// the failure for the offending symbol and continues.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no data for '{symbol}' in requested range")]
    NoData { symbol: String },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error(transparent)]
    InvalidSeries(#[from] SeriesError),
}

/// Source of the ordered candidate symbol list.
pub trait AssetListProvider: Send + Sync {
    fn list_assets(&self) -> Result<Vec<String>, DataError>;
}

/// Source of per-asset OHLC history.
///
/// A fetch returns a complete, validated series or fails; there is no
/// partial/streaming mode.
pub trait SeriesProvider: Send + Sync {
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TimeSeries, DataError>;
}

// ── CSV directory provider ───────────────────────────────────────────

/// Row shape of an input CSV file: `date,open,high,low,close`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

/// Serves both traits from a directory of `<SYMBOL>.csv` files.
#[derive(Debug, Clone)]
pub struct CsvDataDir {
    dir: PathBuf,
}

impl CsvDataDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }
}

impl AssetListProvider for CsvDataDir {
    fn list_assets(&self) -> Result<Vec<String>, DataError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|source| DataError::Io {
            path: self.dir.display().to_string(),
            source,
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| DataError::Io {
                path: self.dir.display().to_string(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    symbols.push(stem.to_string());
                }
            }
        }
        symbols.sort();
        Ok(symbols)
    }
}

impl SeriesProvider for CsvDataDir {
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TimeSeries, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let mut reader = csv::Reader::from_path(&path).map_err(|e| DataError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut bars = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row.map_err(|e| DataError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            if row.date < start || row.date > end {
                continue;
            }
            bars.push(PriceBar {
                date: row.date,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
            });
        }

        if bars.is_empty() {
            return Err(DataError::NoData {
                symbol: symbol.to_string(),
            });
        }

        Ok(TimeSeries::new(symbol, bars)?)
    }
}

// ── Synthetic provider ───────────────────────────────────────────────

/// Seeded random-walk generator for offline runs and tests.
///
/// Each symbol gets its own deterministic stream derived from the base
/// seed, so a fixed (seed, symbol, range) always reproduces the same
/// series.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    symbols: Vec<String>,
    seed: u64,
}

impl SyntheticProvider {
    pub fn new(symbols: Vec<String>, seed: u64) -> Self {
        Self { symbols, seed }
    }

    fn symbol_seed(&self, symbol: &str) -> u64 {
        // FNV-1a folded into the base seed.
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        for b in symbol.bytes() {
            h ^= b as u64;
            h = h.wrapping_mul(0x1000_0000_01b3);
        }
        self.seed ^ h
    }
}

impl AssetListProvider for SyntheticProvider {
    fn list_assets(&self) -> Result<Vec<String>, DataError> {
        Ok(self.symbols.clone())
    }
}

impl SeriesProvider for SyntheticProvider {
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TimeSeries, DataError> {
        if !self.symbols.iter().any(|s| s == symbol) {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if end < start {
            return Err(DataError::NoData {
                symbol: symbol.to_string(),
            });
        }

        let mut rng = StdRng::seed_from_u64(self.symbol_seed(symbol));
        let mut close = rng.gen_range(50.0..150.0_f64);
        let mut bars = Vec::new();
        let mut date = start;
        while date <= end {
            let open = close;
            close = (open * (1.0 + rng.gen_range(-0.03..0.03_f64))).max(0.01);
            let spread = rng.gen_range(0.0..0.02_f64);
            let high = open.max(close) * (1.0 + spread);
            let low = (open.min(close) * (1.0 - spread)).max(0.01);
            bars.push(PriceBar {
                date,
                open,
                high,
                low,
                close,
            });
            date += chrono::Duration::days(1);
        }

        Ok(TimeSeries::new(symbol, bars)?)
    }
}
