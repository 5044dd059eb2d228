//! Simple moving average over a value column.
//!
//! Rolling mean with a fixed window; first defined value at index
//! `window - 1`. Positions without enough trailing history are `None` —
//! undefined is an explicit tagged value here, never NaN, so downstream
//! comparisons cannot silently misbehave.

/// Rolling mean of `values` over `window` consecutive entries.
///
/// Output is aligned 1:1 with the input.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    assert!(window >= 1, "rolling window must be >= 1");
    let n = values.len();
    let mut result = vec![None; n];

    if n < window {
        return result;
    }

    let mut sum: f64 = values[..window].iter().sum();
    result[window - 1] = Some(sum / window as f64);

    for i in window..n {
        sum += values[i] - values[i - window];
        result[i] = Some(sum / window as f64);
    }

    result
}

/// Population standard deviation of the defined entries of a column.
///
/// Returns `None` when the column has no defined entries. Used for the
/// band half-width, which is a single scalar over the full history of the
/// long moving average.
pub fn population_std(column: &[Option<f64>]) -> Option<f64> {
    let defined: Vec<f64> = column.iter().filter_map(|v| *v).collect();
    if defined.is_empty() {
        return None;
    }
    let n = defined.len() as f64;
    let mean = defined.iter().sum::<f64>() / n;
    let var = defined.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some(var.sqrt())
}
