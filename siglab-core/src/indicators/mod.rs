//! Indicator engine — derived columns over a validated time series.
//!
//! All columns are computed once, up front, as parallel `Vec<Option<f64>>`
//! aligned 1:1 with the bars. `None` marks positions where the rolling
//! window lacks trailing history; strategies treat those bars as
//! no-signal, never as a comparison against zero.

pub mod returns;
pub mod rsi;
pub mod sma;

pub use returns::pct_change;
pub use rsi::second_difference_rsi;
pub use sma::{population_std, rolling_mean};

use serde::{Deserialize, Serialize};

use crate::domain::TimeSeries;

/// Window and multiplier constants for the engine.
///
/// Replaces the source program's construction-time globals; a run carries
/// exactly one of these, serialized as part of the run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// SMA windows, short to long. Column names stay `sma20/sma50/sma200`
    /// regardless of the configured widths.
    #[serde(default = "default_sma_windows")]
    pub sma_windows: [usize; 3],

    /// Smoothing window for the oscillator.
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// Band half-width multiplier.
    #[serde(default = "default_bollinger_multiplier")]
    pub bollinger_multiplier: f64,
}

fn default_sma_windows() -> [usize; 3] {
    [20, 50, 200]
}

fn default_rsi_period() -> usize {
    14
}

fn default_bollinger_multiplier() -> f64 {
    0.5
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_windows: default_sma_windows(),
            rsi_period: default_rsi_period(),
            bollinger_multiplier: default_bollinger_multiplier(),
        }
    }
}

/// Return lags in bars: daily, monthly, annual.
pub const RETURN_LAGS: [usize; 3] = [1, 31, 365];

/// One derived record per bar, stored column-wise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorFrame {
    pub sma20: Vec<Option<f64>>,
    pub sma50: Vec<Option<f64>>,
    pub sma200: Vec<Option<f64>>,
    pub boll_low: Vec<Option<f64>>,
    pub boll_high: Vec<Option<f64>>,
    pub daily_return: Vec<Option<f64>>,
    pub monthly_return: Vec<Option<f64>>,
    pub annual_return: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
}

impl IndicatorFrame {
    pub fn len(&self) -> usize {
        self.sma20.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sma20.is_empty()
    }
}

/// Pure function of its input series: windows fixed at construction,
/// identical input produces an identical frame.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Self {
        let [short, mid, long] = config.sma_windows;
        assert!(
            short >= 1 && short < mid && mid < long,
            "SMA windows must be increasing and >= 1"
        );
        assert!(config.rsi_period >= 1, "RSI period must be >= 1");
        Self { config }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn compute(&self, series: &TimeSeries) -> IndicatorFrame {
        let closes = series.closes();
        let [short, mid, long] = self.config.sma_windows;

        let sma20 = rolling_mean(&closes, short);
        let sma50 = rolling_mean(&closes, mid);
        let sma200 = rolling_mean(&closes, long);

        // Band half-width: a single scalar — the population stdev of the
        // long SMA series itself, not of price. Preserved source behavior;
        // see DESIGN.md for the open question.
        let half_width = population_std(&sma200).map(|s| s * self.config.bollinger_multiplier);
        let boll_low: Vec<Option<f64>> = sma50
            .iter()
            .map(|v| match (v, half_width) {
                (Some(v), Some(hw)) => Some(v - hw),
                _ => None,
            })
            .collect();
        let boll_high: Vec<Option<f64>> = sma50
            .iter()
            .map(|v| match (v, half_width) {
                (Some(v), Some(hw)) => Some(v + hw),
                _ => None,
            })
            .collect();

        let [daily, monthly, annual] = RETURN_LAGS;

        IndicatorFrame {
            sma20,
            sma50,
            sma200,
            boll_low,
            boll_high,
            daily_return: pct_change(&closes, daily),
            monthly_return: pct_change(&closes, monthly),
            annual_return: pct_change(&closes, annual),
            rsi: second_difference_rsi(&closes, self.config.rsi_period),
        }
    }
}

/// Create synthetic bars from close prices for testing.
///
/// Open = previous close (or close for the first bar), high/low pad the
/// open/close envelope by 1.0.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::PriceBar> {
    use crate::domain::PriceBar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: (open.min(close) - 1.0).max(0.01),
                close,
            }
        })
        .collect()
}

#[cfg(test)]
pub fn make_series(symbol: &str, closes: &[f64]) -> TimeSeries {
    TimeSeries::new(symbol, make_bars(closes)).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
