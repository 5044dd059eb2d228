//! Momentum oscillator (RSI variant).
//!
//! Computed from the **second difference** of close price — the difference
//! of differences, not the raw one-bar move. This is preserved source
//! behavior, not the textbook RSI. Up-moves and |down-moves| of that
//! column are each smoothed by a simple rolling mean over `period` bars,
//! then combined as `100 - 100 / (1 + up/down)`.
//!
//! Division-by-zero policy: when the smoothed down average is exactly 0
//! the ratio is undefined, so the oscillator resolves to a constant
//! instead of propagating NaN — 100 when the up average is positive
//! (pure upward pressure), 50 when both averages are 0 (flat window).

/// RSI over the second difference of `closes`.
///
/// Output is aligned 1:1 with the input; the first `period + 1` entries
/// are `None` (two bars consumed by the double differencing, `period - 1`
/// by the smoothing window).
pub fn second_difference_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    assert!(period >= 1, "RSI period must be >= 1");
    let n = closes.len();
    let mut result = vec![None; n];

    if n < period + 2 {
        return result;
    }

    // Second difference, split into up-moves and |down-moves|.
    // Entries 0 and 1 stay zero and are never read.
    let mut up = vec![0.0; n];
    let mut down = vec![0.0; n];
    for i in 2..n {
        let d2 = (closes[i] - closes[i - 1]) - (closes[i - 1] - closes[i - 2]);
        if d2 > 0.0 {
            up[i] = d2;
        } else {
            down[i] = -d2;
        }
    }

    // Roll both windows forward together; first full window ends at
    // index period + 1.
    let mut up_sum: f64 = up[2..2 + period].iter().sum();
    let mut down_sum: f64 = down[2..2 + period].iter().sum();
    result[period + 1] = Some(combine(up_sum, down_sum, period));

    for i in (period + 2)..n {
        up_sum += up[i] - up[i - period];
        down_sum += down[i] - down[i - period];
        result[i] = Some(combine(up_sum, down_sum, period));
    }

    result
}

fn combine(up_sum: f64, down_sum: f64, period: usize) -> f64 {
    let up_avg = up_sum / period as f64;
    let down_avg = down_sum / period as f64;

    if down_avg <= 0.0 {
        if up_avg > 0.0 {
            100.0
        } else {
            50.0
        }
    } else {
        100.0 - 100.0 / (1.0 + up_avg / down_avg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn undefined_until_window_filled() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let result = second_difference_rsi(&closes, 3);

        // Two bars of differencing plus a 3-bar window: first value at 4.
        for (i, v) in result.iter().take(4).enumerate() {
            assert!(v.is_none(), "expected None at index {i}");
        }
        assert!(result[4].is_some());
    }

    #[test]
    fn linear_series_is_flat_policy() {
        // A linear ramp has zero second difference everywhere: both
        // smoothed averages are 0, so the flat-window constant applies.
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + 2.0 * i as f64).collect();
        let result = second_difference_rsi(&closes, 3);
        for v in result.iter().flatten() {
            assert_approx(*v, 50.0, 1e-12);
        }
    }

    #[test]
    fn accelerating_series_saturates_at_100() {
        // Strictly convex closes: every second difference is positive, so
        // the down average is 0 while the up average is not.
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + (i as f64).powi(2)).collect();
        let result = second_difference_rsi(&closes, 3);
        for v in result.iter().flatten() {
            assert_approx(*v, 100.0, 1e-12);
        }
    }

    #[test]
    fn decelerating_series_pins_at_zero() {
        // Strictly concave closes: every second difference is negative.
        let closes: Vec<f64> = (0..20)
            .map(|i| 1000.0 - (i as f64).powi(2))
            .collect();
        let result = second_difference_rsi(&closes, 3);
        for v in result.iter().flatten() {
            assert_approx(*v, 0.0, 1e-12);
        }
    }

    #[test]
    fn mixed_series_stays_in_bounds() {
        let closes = [
            100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0, 85.0, 125.0, 100.0, 103.0,
        ];
        let result = second_difference_rsi(&closes, 3);
        for (i, v) in result.iter().enumerate() {
            if let Some(v) = v {
                assert!((0.0..=100.0).contains(v), "RSI out of bounds at bar {i}: {v}");
            }
        }
    }

    #[test]
    fn known_window_value() {
        // closes: 10, 12, 11, 14 → first diffs: +2, -1, +3 → second
        // diffs: -3 (at i=2), +4 (at i=3). period=2 window at i=3:
        // up_avg = 4/2 = 2, down_avg = 3/2 = 1.5,
        // rsi = 100 - 100/(1 + 2/1.5) = 100 - 100/(7/3) = 400/7.
        let closes = [10.0, 12.0, 11.0, 14.0];
        let result = second_difference_rsi(&closes, 2);
        assert!(result[2].is_none());
        assert_approx(result[3].unwrap(), 400.0 / 7.0, 1e-12);
    }

    #[test]
    fn too_short_series_is_all_none() {
        let result = second_difference_rsi(&[100.0, 101.0, 102.0], 14);
        assert!(result.iter().all(|v| v.is_none()));
    }
}
