//! Batch result types.

use serde::{Deserialize, Serialize};

use siglab_core::signals::StrategyKind;
use siglab_core::valuation::Valuation;

/// One strategy's valuation for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyValuation {
    pub strategy: StrategyKind,
    pub valuation: Valuation,
}

/// Successful pipeline outcome for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetResult {
    pub symbol: String,
    pub bar_count: usize,
    pub valuations: Vec<StrategyValuation>,
}

/// A recorded per-asset failure; the batch continued past it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetFailure {
    pub symbol: String,
    pub error: String,
}

/// Aggregate outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub results: Vec<AssetResult>,
    pub failures: Vec<AssetFailure>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.results.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.succeeded() + self.failed()
    }
}
