//! Percent change over a fixed lag.
//!
//! `(value_t / value_{t-lag}) - 1`, undefined for the first `lag` entries.
//! Lags of 1/31/365 bars give the daily/monthly/annual return columns.

pub fn pct_change(values: &[f64], lag: usize) -> Vec<Option<f64>> {
    assert!(lag >= 1, "pct_change lag must be >= 1");
    let n = values.len();
    let mut result = vec![None; n];

    for i in lag..n {
        result[i] = Some(values[i] / values[i - lag] - 1.0);
    }

    result
}
