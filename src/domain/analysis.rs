//! Single-symbol analysis: every requested strategy, the combined score and
//! its recommendation tier, the buy signal and the asset class.

use crate::domain::aggregator::{Recommendation, TierThresholds, combine};
use crate::domain::asset::AssetClass;
use crate::domain::bar_series::BarSeries;
use crate::domain::error::SignalError;
use crate::domain::scoring::EvaluationResult;
use crate::domain::signal::buy_signal;
use crate::domain::strategy::{Evaluator, Strategy, StrategyKind, StrategySettings};
use crate::domain::timeframe::Interval;
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// Which strategies an analysis runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategySelection {
    One(StrategyKind),
    All,
}

impl StrategySelection {
    pub fn kinds(&self) -> Vec<StrategyKind> {
        match self {
            StrategySelection::One(kind) => vec![*kind],
            StrategySelection::All => StrategyKind::ALL.to_vec(),
        }
    }

    pub fn build(&self, settings: &StrategySettings) -> Vec<Strategy> {
        self.kinds().iter().map(|k| k.build(settings)).collect()
    }
}

impl Default for StrategySelection {
    fn default() -> Self {
        StrategySelection::One(StrategyKind::Composite)
    }
}

impl fmt::Display for StrategySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategySelection::One(kind) => write!(f, "{kind}"),
            StrategySelection::All => f.write_str("all"),
        }
    }
}

impl FromStr for StrategySelection {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StrategySelection::All)
        } else {
            s.parse().map(StrategySelection::One)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub symbol: String,
    pub interval: Interval,
    pub asset_class: AssetClass,
    pub bars: usize,
    pub last_timestamp: NaiveDateTime,
    pub last_close: f64,
    pub results: Vec<EvaluationResult>,
    /// Mean of the strategy scores, rounded.
    pub score: u8,
    pub recommendation: Recommendation,
    pub buy_signal: bool,
}

impl Analysis {
    /// The result carrying price levels when exactly one strategy ran.
    pub fn primary(&self) -> Option<&EvaluationResult> {
        match self.results.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

pub fn analyze(
    series: &BarSeries,
    strategies: &[Strategy],
    thresholds: &TierThresholds,
) -> Analysis {
    let results: Vec<EvaluationResult> = strategies.iter().map(|s| s.evaluate(series)).collect();
    let score = combine(&results);
    let last = series.last();

    Analysis {
        symbol: series.symbol().to_string(),
        interval: series.interval(),
        asset_class: AssetClass::classify(series.symbol()),
        bars: series.len(),
        last_timestamp: last.timestamp,
        last_close: last.close,
        score,
        recommendation: thresholds.classify(score),
        buy_signal: buy_signal(series),
        results,
    }
}
