//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Strict buy/sell alternation for every strategy on random series
//! 2. RSI bounds — defined values always within [0, 100]
//! 3. Determinism — identical input yields identical output end to end
//! 4. SMA definition boundary and trailing-mean equality

use proptest::prelude::*;

use siglab_core::domain::{PriceBar, TimeSeries};
use siglab_core::indicators::{IndicatorConfig, IndicatorEngine};
// Anonymous import: proptest's prelude exports its own `Strategy` trait.
use siglab_core::signals::Strategy as _;
use siglab_core::signals::{Signal, StrategyKind};
use siglab_core::valuation::valuate;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(10.0..500.0_f64, 0..120)
}

fn make_series(closes: &[f64]) -> TimeSeries {
    let base = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let bars: Vec<PriceBar> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: (open.min(close) - 1.0).max(0.01),
                close,
            }
        })
        .collect();
    TimeSeries::new("PROP", bars).unwrap()
}

/// Small windows so random series short enough to be fast still produce
/// defined indicator values.
fn small_window_engine() -> IndicatorEngine {
    IndicatorEngine::new(IndicatorConfig {
        sma_windows: [3, 7, 15],
        rsi_period: 5,
        bollinger_multiplier: 0.5,
    })
}

fn assert_alternation(signals: &[Option<Signal>]) {
    let mut expected = Signal::Buy;
    for signal in signals.iter().flatten() {
        assert_eq!(*signal, expected, "alternation broken");
        expected = match expected {
            Signal::Buy => Signal::Sell,
            Signal::Sell => Signal::Buy,
        };
    }
}

// ── 1. Alternation ───────────────────────────────────────────────────

proptest! {
    /// Every strategy's defined signals strictly alternate, starting
    /// with a buy, on arbitrary series.
    #[test]
    fn signals_strictly_alternate(closes in arb_closes()) {
        let series = make_series(&closes);
        let frame = small_window_engine().compute(&series);

        for kind in StrategyKind::ALL {
            let out = kind.strategy().scan(&series, &frame);
            prop_assert_eq!(out.len(), series.len());
            assert_alternation(&out.signals);
        }
    }
}

// ── 2. RSI bounds ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_defined_values_within_bounds(closes in arb_closes()) {
        let series = make_series(&closes);
        let frame = small_window_engine().compute(&series);

        for v in frame.rsi.iter().flatten() {
            prop_assert!((0.0..=100.0).contains(v), "RSI out of bounds: {}", v);
        }
    }
}

// ── 3. Determinism ───────────────────────────────────────────────────

proptest! {
    /// Re-running the whole pipeline on identical input reproduces the
    /// identical frame, signals, and valuation.
    #[test]
    fn pipeline_is_deterministic(closes in arb_closes()) {
        let series = make_series(&closes);
        let engine = small_window_engine();

        let frame_a = engine.compute(&series);
        let frame_b = engine.compute(&series);
        prop_assert_eq!(&frame_a, &frame_b);

        for kind in StrategyKind::ALL {
            let strategy = kind.strategy();
            let sig_a = strategy.scan(&series, &frame_a);
            let sig_b = strategy.scan(&series, &frame_b);
            prop_assert_eq!(&sig_a, &sig_b);
            prop_assert_eq!(valuate(&series, &sig_a), valuate(&series, &sig_b));
        }
    }
}

// ── 4. SMA boundary ──────────────────────────────────────────────────

proptest! {
    /// sma20 is undefined for every bar of a series shorter than 20 and
    /// defined from index 19 onward otherwise, equal to the trailing
    /// arithmetic mean.
    #[test]
    fn sma20_definition_boundary(closes in prop::collection::vec(10.0..500.0_f64, 0..60)) {
        let series = make_series(&closes);
        let frame = IndicatorEngine::new(IndicatorConfig::default()).compute(&series);

        if closes.len() < 20 {
            prop_assert!(frame.sma20.iter().all(|v| v.is_none()));
        } else {
            for (i, v) in frame.sma20.iter().enumerate() {
                if i < 19 {
                    prop_assert!(v.is_none());
                } else {
                    let mean = closes[i + 1 - 20..=i].iter().sum::<f64>() / 20.0;
                    let got = v.expect("sma20 defined from index 19");
                    prop_assert!((got - mean).abs() < 1e-9);
                }
            }
        }
    }
}

// ── Fixed end-to-end example ─────────────────────────────────────────

/// 20 bars of 10 then 20 bars of 20: too short for the 50-bar mid SMA,
/// so the crossover never triggers and the valuation is exactly zero.
#[test]
fn step_series_too_short_for_crossover() {
    let closes: Vec<f64> = std::iter::repeat(10.0)
        .take(20)
        .chain(std::iter::repeat(20.0).take(20))
        .collect();
    let series = make_series(&closes);
    let frame = IndicatorEngine::new(IndicatorConfig::default()).compute(&series);

    assert!(frame.sma50.iter().all(|v| v.is_none()));

    let out = StrategyKind::MovingAverage.strategy().scan(&series, &frame);
    assert!(out.signals.iter().all(|s| s.is_none()));
    assert_eq!(valuate(&series, &out).total(), 0.0);
}
