//! Serializable run configuration.
//!
//! Replaces the source program's process-wide defaults (hardcoded date
//! range, working directory, fixed ticker count) with an explicit
//! structure handed to the batch runner at construction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use siglab_core::indicators::IndicatorConfig;
use siglab_core::signals::StrategyKind;

/// Unique identifier for a run (content-addressable hash).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("start date {start} is not before end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("sma_windows {windows:?} must be strictly increasing, each >= 1")]
    InvalidSmaWindows { windows: [usize; 3] },

    #[error("rsi_period must be >= 1")]
    InvalidRsiPeriod,
}

/// Configuration for one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// First date requested from the series provider (inclusive).
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Last date requested from the series provider (inclusive).
    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,

    /// Cap on how many symbols are processed, in provider order.
    #[serde(default)]
    pub max_assets: Option<usize>,

    /// Strategies to run, canonical order. Defaults to all three.
    #[serde(default = "default_strategies")]
    pub strategies: Vec<StrategyKind>,

    /// Indicator windows and multipliers.
    #[serde(default)]
    pub indicators: IndicatorConfig,
}

fn default_start_date() -> NaiveDate {
    // The source program's fixed lower bound.
    NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid constant date")
}

fn default_end_date() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn default_strategies() -> Vec<StrategyKind> {
    StrategyKind::ALL.to_vec()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            end_date: default_end_date(),
            max_assets: None,
            strategies: default_strategies(),
            indicators: IndicatorConfig::default(),
        }
    }
}

impl RunConfig {
    /// Load from a TOML file and validate it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: RunConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine would refuse at construction, so
    /// a bad TOML surfaces here as an error rather than mid-run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_date >= self.end_date {
            return Err(ConfigError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        let [short, mid, long] = self.indicators.sma_windows;
        if short < 1 || short >= mid || mid >= long {
            return Err(ConfigError::InvalidSmaWindows {
                windows: self.indicators.sma_windows,
            });
        }
        if self.indicators.rsi_period < 1 {
            return Err(ConfigError::InvalidRsiPeriod);
        }
        Ok(())
    }

    /// Deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs share a RunId, which makes result
    /// directories and comparisons content-addressable.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        let hash = blake3::hash(json.as_bytes());
        format!("{}", hash.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_config() -> RunConfig {
        RunConfig {
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            max_assets: Some(10),
            strategies: default_strategies(),
            indicators: IndicatorConfig::default(),
        }
    }

    #[test]
    fn run_id_deterministic() {
        let config = fixed_config();
        assert_eq!(config.run_id(), config.run_id());
        assert!(!config.run_id().is_empty());
    }

    #[test]
    fn run_id_changes_with_params() {
        let config1 = fixed_config();
        let mut config2 = config1.clone();
        config2.max_assets = Some(5);
        assert_ne!(config1.run_id(), config2.run_id());
    }

    #[test]
    fn toml_roundtrip() {
        let config = fixed_config();
        let text = toml::to_string(&config).unwrap();
        let back: RunConfig = toml::from_str(&text).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config: RunConfig = toml::from_str(
            r#"
            start_date = "2021-06-01"
            end_date = "2022-06-01"
            strategies = ["MOVING_AVERAGE", "OSCILLATOR"]
            "#,
        )
        .unwrap();

        assert_eq!(config.max_assets, None);
        assert_eq!(
            config.strategies,
            vec![StrategyKind::MovingAverage, StrategyKind::Oscillator]
        );
        assert_eq!(config.indicators, IndicatorConfig::default());
    }

    #[test]
    fn rejects_inverted_date_range() {
        let mut config = fixed_config();
        config.end_date = config.start_date;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn rejects_non_increasing_sma_windows() {
        let mut config = fixed_config();
        config.indicators.sma_windows = [50, 20, 200];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSmaWindows { .. })
        ));
    }

    #[test]
    fn rejects_zero_rsi_period() {
        let mut config = fixed_config();
        config.indicators.rsi_period = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRsiPeriod)));
    }

    #[test]
    fn from_file_rejects_bad_indicator_windows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        std::fs::write(
            &path,
            r#"
            start_date = "2021-01-01"
            end_date = "2022-01-01"

            [indicators]
            sma_windows = [50, 20, 200]
            rsi_period = 14
            bollinger_multiplier = 0.5
            "#,
        )
        .unwrap();

        assert!(matches!(
            RunConfig::from_file(&path),
            Err(ConfigError::InvalidSmaWindows { .. })
        ));
    }
}
