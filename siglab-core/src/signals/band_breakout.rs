//! Band breakout strategy.
//!
//! A close below the lower band signals a buy (price looks oversold
//! relative to the envelope); a close above the upper band signals a
//! sell. Bars where the bands are undefined emit nothing.

use crate::domain::TimeSeries;
use crate::indicators::IndicatorFrame;

use super::{Armed, Signal, SignalSeries, Strategy, StrategyKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct BandBreakout;

impl Strategy for BandBreakout {
    fn name(&self) -> &'static str {
        "band_breakout"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::BandBreakout
    }

    fn scan(&self, series: &TimeSeries, frame: &IndicatorFrame) -> SignalSeries {
        let mut signals = vec![None; series.len()];
        let mut armed = Armed::Buy;

        for (i, bar) in series.bars().iter().enumerate() {
            match armed {
                Armed::Buy => {
                    if let Some(low_band) = frame.boll_low[i] {
                        if low_band > bar.close {
                            signals[i] = Some(Signal::Buy);
                            armed = Armed::Sell;
                        }
                    }
                }
                Armed::Sell => {
                    if let Some(high_band) = frame.boll_high[i] {
                        if high_band < bar.close {
                            signals[i] = Some(Signal::Sell);
                            armed = Armed::Buy;
                        }
                    }
                }
            }
        }

        SignalSeries {
            kind: self.kind(),
            signals,
        }
    }
}
