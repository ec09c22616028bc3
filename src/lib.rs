//! signalscore: technical-indicator buy scores for OHLCV bar series.
//!
//! Hexagonal architecture: indicators, strategies and scoring in [`domain`],
//! port traits in [`ports`], concrete implementations in [`adapters`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod ports;
