//! Signal strategies — armed-flag scans over the indicator frame.
//!
//! Each strategy is a two-state machine {armed-to-buy, armed-to-sell}
//! folded once, forward, over the bars. The armed state enforces strict
//! buy/sell alternation starting from a buy; there is no post-hoc
//! filtering. A bar whose required indicator is undefined emits nothing
//! and does not advance the state.
//!
//! Scans never mutate their input and carry no state across calls, so
//! re-running one on the same frame reproduces the same signal sequence.

pub mod band_breakout;
pub mod ma_crossover;
pub mod oscillator;

pub use band_breakout::BandBreakout;
pub use ma_crossover::MaCrossover;
pub use oscillator::OscillatorThreshold;

use serde::{Deserialize, Serialize};

use crate::domain::TimeSeries;
use crate::indicators::IndicatorFrame;

/// Discrete trade signal. A bar without a signal is `None` in the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
        }
    }
}

/// Serializable strategy selector, used by run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyKind {
    MovingAverage,
    BandBreakout,
    Oscillator,
}

impl StrategyKind {
    /// All strategies, in canonical order.
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::MovingAverage,
        StrategyKind::BandBreakout,
        StrategyKind::Oscillator,
    ];

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::MovingAverage => "moving average",
            StrategyKind::BandBreakout => "bollinger",
            StrategyKind::Oscillator => "rsi",
        }
    }

    /// Column name in the export table.
    pub fn column(&self) -> &'static str {
        match self {
            StrategyKind::MovingAverage => "signal_ma",
            StrategyKind::BandBreakout => "signal_bo",
            StrategyKind::Oscillator => "signal_rsi",
        }
    }

    /// Build the strategy with its default parameters.
    pub fn strategy(&self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::MovingAverage => Box::new(MaCrossover),
            StrategyKind::BandBreakout => Box::new(BandBreakout),
            StrategyKind::Oscillator => Box::new(OscillatorThreshold::default()),
        }
    }
}

/// Signal sequence for one asset/strategy pair, aligned 1:1 with the bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSeries {
    pub kind: StrategyKind,
    pub signals: Vec<Option<Signal>>,
}

impl SignalSeries {
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Defined signals with their bar indices, in order.
    pub fn iter_defined(&self) -> impl Iterator<Item = (usize, Signal)> + '_ {
        self.signals
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|s| (i, s)))
    }

    /// The last defined signal, if any.
    pub fn last_defined(&self) -> Option<Signal> {
        self.signals.iter().rev().find_map(|s| *s)
    }
}

/// Per-strategy flag: which action the scanner is waiting to take next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Armed {
    Buy,
    Sell,
}

/// A rule-based strategy: a single-pass scan from series + frame to a
/// signal sequence. Implementations hold parameters only, never scan
/// state, which lives on the fold's stack.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn kind(&self) -> StrategyKind;

    fn scan(&self, series: &TimeSeries, frame: &IndicatorFrame) -> SignalSeries;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Assert the defined signals strictly alternate starting with a buy.
    pub fn assert_alternates(series: &SignalSeries) {
        let mut expected = Signal::Buy;
        for (i, signal) in series.iter_defined() {
            assert_eq!(
                signal, expected,
                "signal at bar {i} breaks alternation for {:?}",
                series.kind
            );
            expected = match expected {
                Signal::Buy => Signal::Sell,
                Signal::Sell => Signal::Buy,
            };
        }
    }
}
