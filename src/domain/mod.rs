//! Core domain types and logic.

pub mod aggregator;
pub mod analysis;
pub mod asset;
pub mod bar_series;
pub mod error;
pub mod indicator;
pub mod levels;
pub mod ohlcv;
pub mod scan;
pub mod scoring;
pub mod settings;
pub mod signal;
pub mod strategy;
pub mod timeframe;
pub mod universe;
