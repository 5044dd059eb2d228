//! Valuation report sinks.
//!
//! A report sink receives one valuation per (asset, strategy) pair as
//! soon as it is final. `StdoutReport` mirrors the source program's
//! per-currency summary; `VecReport` collects for assertions in tests.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use siglab_core::signals::StrategyKind;
use siglab_core::valuation::Valuation;

/// Gain/loss classification of a total portfolio value.
///
/// A total of exactly zero classifies as `Gain`: the run broke even, and
/// break-even is reported on the non-loss side. (The source had both `>`
/// and `>=` variants of this comparison; zero-as-gain is the deliberate
/// resolution, see DESIGN.md.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Gain,
    Loss,
}

impl Outcome {
    pub fn of(total: f64) -> Self {
        if total < 0.0 {
            Outcome::Loss
        } else {
            Outcome::Gain
        }
    }
}

pub trait ReportSink: Send + Sync {
    fn report(&self, symbol: &str, strategy: StrategyKind, valuation: &Valuation);
}

/// Prints one block per (asset, strategy), in the source program's shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutReport;

impl ReportSink for StdoutReport {
    fn report(&self, symbol: &str, strategy: StrategyKind, valuation: &Valuation) {
        let total = valuation.total();
        let outcome = match Outcome::of(total) {
            Outcome::Gain => "gain",
            Outcome::Loss => "loss",
        };
        println!(
            "{symbol} / {}: cash {:.4}, open position {:.4}, total {:.4} ({outcome})",
            strategy.label(),
            valuation.cash,
            valuation.open_position,
            total,
        );
    }
}

/// Collects reports for test assertions.
#[derive(Debug, Default)]
pub struct VecReport {
    entries: Mutex<Vec<(String, StrategyKind, Valuation)>>,
}

impl VecReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(String, StrategyKind, Valuation)> {
        self.entries.lock().expect("report lock poisoned").clone()
    }
}

impl ReportSink for VecReport {
    fn report(&self, symbol: &str, strategy: StrategyKind, valuation: &Valuation) {
        self.entries
            .lock()
            .expect("report lock poisoned")
            .push((symbol.to_string(), strategy, *valuation));
    }
}
