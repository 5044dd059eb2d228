//! Valuation — signal sequence to realized + open portfolio value.
//!
//! Fill policy: a buy pays the bar's low, a sell collects the bar's high.
//! That is an optimistic simplification kept from the source model, not a
//! real execution price — there is no slippage or fee modeling here.

use serde::{Deserialize, Serialize};

use crate::domain::TimeSeries;
use crate::signals::{Signal, SignalSeries};

/// Realized-plus-open value for one asset/strategy pair.
///
/// Computed once after the signal series is finalized; immutable after.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    /// Sum of signed cash flows: `-low` per buy, `+high` per sell.
    pub cash: f64,
    /// Mark-to-market of an unclosed buy at the series' final close, 0 if
    /// the position was closed (or never opened).
    pub open_position: f64,
}

impl Valuation {
    pub const ZERO: Valuation = Valuation {
        cash: 0.0,
        open_position: 0.0,
    };

    pub fn total(&self) -> f64 {
        self.cash + self.open_position
    }
}

/// Value a signal sequence against its underlying series.
///
/// Iterates only bars with a defined signal; a series with no signals
/// values to zero.
pub fn valuate(series: &TimeSeries, signals: &SignalSeries) -> Valuation {
    debug_assert_eq!(series.len(), signals.len());

    let mut cash = 0.0;
    let mut last = None;
    for (i, signal) in signals.iter_defined() {
        let bar = &series.bars()[i];
        cash += match signal {
            Signal::Buy => -bar.low,
            Signal::Sell => bar.high,
        };
        last = Some(signal);
    }

    let open_position = if last == Some(Signal::Buy) {
        series.final_close().unwrap_or(0.0)
    } else {
        0.0
    };

    Valuation {
        cash,
        open_position,
    }
}
