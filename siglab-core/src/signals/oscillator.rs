//! Oscillator threshold strategy.
//!
//! Buys when the oscillator drops under the buy threshold, sells when it
//! rises over the sell threshold. Defaults 40/60, strict inequalities.

use crate::domain::TimeSeries;
use crate::indicators::IndicatorFrame;

use super::{Armed, Signal, SignalSeries, Strategy, StrategyKind};

#[derive(Debug, Clone, Copy)]
pub struct OscillatorThreshold {
    pub buy_below: f64,
    pub sell_above: f64,
}

impl Default for OscillatorThreshold {
    fn default() -> Self {
        Self {
            buy_below: 40.0,
            sell_above: 60.0,
        }
    }
}

impl Strategy for OscillatorThreshold {
    fn name(&self) -> &'static str {
        "oscillator_threshold"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Oscillator
    }

    fn scan(&self, series: &TimeSeries, frame: &IndicatorFrame) -> SignalSeries {
        let mut signals = vec![None; series.len()];
        let mut armed = Armed::Buy;

        for i in 0..series.len() {
            let Some(rsi) = frame.rsi[i] else {
                continue;
            };
            match armed {
                Armed::Buy if rsi < self.buy_below => {
                    signals[i] = Some(Signal::Buy);
                    armed = Armed::Sell;
                }
                Armed::Sell if rsi > self.sell_above => {
                    signals[i] = Some(Signal::Sell);
                    armed = Armed::Buy;
                }
                _ => {}
            }
        }

        SignalSeries {
            kind: self.kind(),
            signals,
        }
    }
}
