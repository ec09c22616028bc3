//! Universe scan: evaluate one strategy over many symbols in parallel.
//!
//! Each symbol is fetched, validated and scored independently. Symbols the
//! data port cannot serve are collected in [`ScanReport::skipped`] instead of
//! aborting the scan. Hits are sorted by score descending, then by symbol,
//! so the report does not depend on evaluation order.

use crate::domain::bar_series::BarSeries;
use crate::domain::error::SignalError;
use crate::domain::levels::PriceLevels;
use crate::domain::scoring::EvaluationResult;
use crate::domain::strategy::{Evaluator, Strategy, StrategyKind};
use crate::domain::timeframe::FetchRequest;
use crate::ports::data_port::DataPort;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanOptions {
    /// Hits need a score strictly above this.
    pub threshold: u8,
    pub target_pct: f64,
    pub stop_pct: f64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            threshold: 0,
            target_pct: 0.05,
            stop_pct: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanHit {
    pub symbol: String,
    pub result: EvaluationResult,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Fetch failed or returned no bars.
    Unavailable(String),
    /// Bars were returned but failed validation.
    Invalid(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unavailable(reason) => write!(f, "unavailable: {reason}"),
            SkipReason::Invalid(reason) => write!(f, "invalid data: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub strategy: StrategyKind,
    pub scanned: usize,
    pub hits: Vec<ScanHit>,
    pub skipped: Vec<SkippedSymbol>,
}

impl ScanReport {
    pub fn symbols(&self) -> Vec<&str> {
        self.hits.iter().map(|h| h.symbol.as_str()).collect()
    }
}

enum Outcome {
    Scored(ScanHit),
    Skipped(SkippedSymbol),
}

/// Loads and validates one symbol's series.
pub fn load_series(
    port: &dyn DataPort,
    symbol: &str,
    request: &FetchRequest,
) -> Result<BarSeries, SignalError> {
    let bars = port.fetch_bars(symbol, request)?;
    if bars.is_empty() {
        return Err(SignalError::UnavailableInstrument {
            symbol: symbol.to_string(),
        });
    }
    BarSeries::new(symbol, request.interval, bars)
}

fn scan_one(
    port: &(dyn DataPort + Sync),
    symbol: &str,
    request: &FetchRequest,
    strategy: &Strategy,
    options: &ScanOptions,
) -> Outcome {
    let series = match load_series(port, symbol, request) {
        Ok(series) => series,
        Err(e) => {
            let reason = match &e {
                SignalError::EmptySeries
                | SignalError::InvalidBar { .. }
                | SignalError::NonMonotonicTimestamps { .. } => SkipReason::Invalid(e.to_string()),
                _ => SkipReason::Unavailable(e.to_string()),
            };
            log::warn!("skipping {symbol} ({reason})");
            return Outcome::Skipped(SkippedSymbol {
                symbol: symbol.to_string(),
                reason,
            });
        }
    };

    let result = strategy.evaluate(&series);
    let levels =
        PriceLevels::from_percent(series.last_close(), options.target_pct, options.stop_pct);
    Outcome::Scored(ScanHit {
        symbol: symbol.to_string(),
        result: result.with_levels(levels),
    })
}

pub fn scan(
    port: &(dyn DataPort + Sync),
    symbols: &[String],
    request: &FetchRequest,
    strategy: &Strategy,
    options: &ScanOptions,
) -> ScanReport {
    let outcomes: Vec<Outcome> = symbols
        .par_iter()
        .map(|symbol| scan_one(port, symbol, request, strategy, options))
        .collect();

    let mut hits = Vec::new();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            Outcome::Scored(hit) if hit.result.score() > options.threshold => hits.push(hit),
            Outcome::Scored(hit) => {
                log::debug!("{}: score {} not above threshold", hit.symbol, hit.result.score())
            }
            Outcome::Skipped(s) => skipped.push(s),
        }
    }

    hits.sort_by(compare_hits);
    skipped.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    log::debug!(
        "scan {}: {} symbols, {} hits, {} skipped",
        strategy.kind(),
        symbols.len(),
        hits.len(),
        skipped.len()
    );

    ScanReport {
        strategy: strategy.kind(),
        scanned: symbols.len(),
        hits,
        skipped,
    }
}

fn compare_hits(a: &ScanHit, b: &ScanHit) -> Ordering {
    b.result
        .score()
        .cmp(&a.result.score())
        .then_with(|| a.symbol.cmp(&b.symbol))
}
