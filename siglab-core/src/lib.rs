//! SigLab Core — the indicator/signal engine.
//!
//! This crate contains the deterministic heart of the pipeline:
//! - Domain types (price bars, validated time series)
//! - Indicator engine (moving averages, volatility bands, returns, RSI)
//! - Signal strategies (armed-flag scans producing buy/sell sequences)
//! - Valuation (signal sequence → realized + open portfolio value)
//!
//! Everything here is pure: no I/O, no clocks, no global state. Data flows
//! strictly left to right — series → indicators → signals → valuation —
//! and derived output is always a freshly allocated structure, never an
//! in-place mutation of the input.

pub mod domain;
pub mod indicators;
pub mod signals;
pub mod valuation;
