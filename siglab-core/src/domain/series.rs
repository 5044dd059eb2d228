//! TimeSeries — ordered, validated per-asset price history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PriceBar;

/// Invariant violations detected at series construction.
///
/// These are fatal for the offending asset's pipeline only; the batch
/// runner records them and moves on to the next asset.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("{symbol}: dates not strictly increasing at {date}")]
    NonMonotonicDates { symbol: String, date: NaiveDate },

    #[error("{symbol}: malformed bar at {date} (OHLC bounds or non-positive price)")]
    MalformedBar { symbol: String, date: NaiveDate },
}

/// Ordered sequence of daily bars for one asset symbol.
///
/// Construction validates the invariants (strictly increasing dates, sane
/// OHLC bounds); after that the series is immutable. Indicator output is a
/// parallel derived structure, never an in-place mutation, so a series can
/// be scanned any number of times with identical results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl TimeSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        let symbol = symbol.into();
        for bar in &bars {
            if !bar.is_sane() {
                return Err(SeriesError::MalformedBar {
                    symbol,
                    date: bar.date,
                });
            }
        }
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::NonMonotonicDates {
                    symbol,
                    date: pair[1].date,
                });
            }
        }
        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close price of the last bar, if any.
    pub fn final_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// Close prices as a contiguous column, in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}
