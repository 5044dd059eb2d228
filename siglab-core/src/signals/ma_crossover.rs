//! Moving-average crossover strategy.
//!
//! Buys the first bar where the short SMA sits above the mid SMA while
//! armed to buy, sells the first bar where it sits below while armed to
//! sell. Equality does nothing. Note this keys on the *level* relation at
//! each bar, not on the crossing event itself — preserved source behavior.

use crate::domain::TimeSeries;
use crate::indicators::IndicatorFrame;

use super::{Armed, Signal, SignalSeries, Strategy, StrategyKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct MaCrossover;

impl Strategy for MaCrossover {
    fn name(&self) -> &'static str {
        "ma_crossover"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::MovingAverage
    }

    fn scan(&self, series: &TimeSeries, frame: &IndicatorFrame) -> SignalSeries {
        let mut signals = vec![None; series.len()];
        let mut armed = Armed::Buy;

        for i in 0..series.len() {
            let (Some(short), Some(mid)) = (frame.sma20[i], frame.sma50[i]) else {
                continue;
            };
            match armed {
                Armed::Buy if short > mid => {
                    signals[i] = Some(Signal::Buy);
                    armed = Armed::Sell;
                }
                Armed::Sell if short < mid => {
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
