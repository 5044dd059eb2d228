//! Domain types: price bars and validated time series.

pub mod bar;
pub mod series;

pub use bar::PriceBar;
pub use series::{SeriesError, TimeSeries};
