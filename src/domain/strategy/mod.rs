//! Scoring strategies.
//!
//! Each strategy reads indicator values on the most recent bar(s), adds points
//! for every condition that holds, and derives entry/target/stop levels from
//! the last close. The set of strategies is closed: [`StrategyKind`] names
//! them, [`Strategy`] holds a configured instance of one.

pub mod composite;
pub mod day;
pub mod position;
pub mod swing;

pub use composite::{CompositeParams, CompositeStrategy, CompositeWeights};
pub use day::{DayParams, DayStrategy, DayWeights};
pub use position::{PositionParams, PositionStrategy, PositionWeights};
pub use swing::{SwingParams, SwingStrategy, SwingWeights};

use crate::domain::bar_series::BarSeries;
use crate::domain::error::SignalError;
use crate::domain::scoring::EvaluationResult;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrategyKind {
    Day,
    Swing,
    Position,
    Composite,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Day,
        StrategyKind::Swing,
        StrategyKind::Position,
        StrategyKind::Composite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Day => "day",
            StrategyKind::Swing => "swing",
            StrategyKind::Position => "position",
            StrategyKind::Composite => "composite",
        }
    }

    /// Instantiates this strategy with the configured weight tables.
    pub fn build(&self, settings: &StrategySettings) -> Strategy {
        match self {
            StrategyKind::Day => Strategy::Day(DayStrategy::new(
                DayParams::default(),
                settings.day.clone(),
            )),
            StrategyKind::Swing => Strategy::Swing(SwingStrategy::new(
                SwingParams::default(),
                settings.swing.clone(),
            )),
            StrategyKind::Position => Strategy::Position(PositionStrategy::new(
                PositionParams::default(),
                settings.position.clone(),
            )),
            StrategyKind::Composite => Strategy::Composite(CompositeStrategy::new(
                CompositeParams::default(),
                settings.composite.clone(),
            )),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daytrade" | "turtle" => Ok(StrategyKind::Day),
            "swing" => Ok(StrategyKind::Swing),
            "position" => Ok(StrategyKind::Position),
            "composite" | "score" => Ok(StrategyKind::Composite),
            _ => Err(SignalError::UnknownStrategy(s.to_string())),
        }
    }
}

/// A named table of integer points, one entry per scoring condition.
pub trait WeightTable {
    /// Condition names accepted by [`WeightTable::set`].
    fn keys() -> &'static [&'static str];

    /// Overrides one condition's points. Returns false for an unknown key.
    fn set(&mut self, key: &str, points: i32) -> bool;
}

/// Weight tables for every strategy, as loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategySettings {
    pub day: DayWeights,
    pub swing: SwingWeights,
    pub position: PositionWeights,
    pub composite: CompositeWeights,
}

pub trait Evaluator {
    fn kind(&self) -> StrategyKind;

    /// Bars needed before every indicator the strategy reads is settled.
    fn min_bars(&self) -> usize;

    /// Scores a series already known to hold at least `min_bars()` bars.
    fn score(&self, series: &BarSeries) -> EvaluationResult;

    fn evaluate(&self, series: &BarSeries) -> EvaluationResult {
        let need = self.min_bars();
        if series.len() < need {
            log::debug!(
                "{}: {} has {} bars, {} strategy needs {}",
                series.symbol(),
                series.interval(),
                series.len(),
                self.kind(),
                need
            );
            return EvaluationResult::insufficient_data(self.kind(), series.len(), need);
        }

        let result = self.score(series);
        log::debug!(
            "{}: {} score {} ({} reasons)",
            series.symbol(),
            self.kind(),
            result.score(),
            result.rationale().len()
        );
        result
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    Day(DayStrategy),
    Swing(SwingStrategy),
    Position(PositionStrategy),
    Composite(CompositeStrategy),
}

impl Strategy {
    fn inner(&self) -> &dyn Evaluator {
        match self {
            Strategy::Day(s) => s,
            Strategy::Swing(s) => s,
            Strategy::Position(s) => s,
            Strategy::Composite(s) => s,
        }
    }
}

impl Evaluator for Strategy {
    fn kind(&self) -> StrategyKind {
        self.inner().kind()
    }

    fn min_bars(&self) -> usize {
        self.inner().min_bars()
    }

    fn score(&self, series: &BarSeries) -> EvaluationResult {
        self.inner().score(series)
    }
}

/// `Some(a > b)` when the reference value exists.
pub(crate) fn above(a: f64, b: Option<f64>) -> Option<bool> {
    b.map(|b| a > b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("turtle".parse::<StrategyKind>().unwrap(), StrategyKind::Day);
        assert_eq!("Day".parse::<StrategyKind>().unwrap(), StrategyKind::Day);
        assert_eq!(" swing ".parse::<StrategyKind>().unwrap(), StrategyKind::Swing);
        assert_eq!(
            "position".parse::<StrategyKind>().unwrap(),
            StrategyKind::Position
        );
        assert_eq!(
            "composite".parse::<StrategyKind>().unwrap(),
            StrategyKind::Composite
        );
    }

    #[test]
    fn kind_rejects_unknown() {
        let err = "elliott".parse::<StrategyKind>().unwrap_err();
        assert!(matches!(err, SignalError::UnknownStrategy(s) if s == "elliott"));
    }

    #[test]
    fn kind_display_round_trips() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.to_string().parse::<StrategyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn build_maps_every_kind() {
        let settings = StrategySettings::default();
        for kind in StrategyKind::ALL {
            assert_eq!(kind.build(&settings).kind(), kind);
        }
    }

    #[test]
    fn default_minimum_lengths() {
        let settings = StrategySettings::default();
        assert_eq!(StrategyKind::Day.build(&settings).min_bars(), 30);
        assert_eq!(StrategyKind::Swing.build(&settings).min_bars(), 39);
        assert_eq!(StrategyKind::Position.build(&settings).min_bars(), 220);
        assert_eq!(StrategyKind::Composite.build(&settings).min_bars(), 35);
    }

    #[test]
    fn built_strategy_uses_configured_weights() {
        let mut settings = StrategySettings::default();
        assert!(settings.swing.set("adx_trend", 40));
        match StrategyKind::Swing.build(&settings) {
            Strategy::Swing(s) => assert_eq!(s.weights.adx_trend, 40),
            other => panic!("unexpected strategy {other:?}"),
        }
    }

    #[test]
    fn above_treats_missing_as_none() {
        assert_eq!(above(2.0, Some(1.0)), Some(true));
        assert_eq!(above(1.0, Some(2.0)), Some(false));
        assert_eq!(above(1.0, None), None);
    }
}
