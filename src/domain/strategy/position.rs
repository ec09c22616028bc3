//! Position (long-horizon trend) strategy.

use crate::domain::bar_series::BarSeries;
use crate::domain::indicator::{calculate_sma, calculate_volume_ma};
use crate::domain::levels::PriceLevels;
use crate::domain::scoring::{EvaluationResult, ScoreCard};
use crate::domain::strategy::{Evaluator, StrategyKind, WeightTable};

#[derive(Debug, Clone, PartialEq)]
pub struct PositionParams {
    pub fast_window: usize,
    pub slow_window: usize,
    /// Bars back used to decide whether the slow average is rising.
    pub slope_lookback: usize,
    pub volume_window: usize,
    pub target_pct: f64,
    pub stop_pct: f64,
}

impl Default for PositionParams {
    fn default() -> Self {
        Self {
            fast_window: 150,
            slow_window: 200,
            slope_lookback: 20,
            volume_window: 50,
            target_pct: 0.20,
            stop_pct: 0.08,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionWeights {
    pub golden_alignment: i32,
    pub slow_rising: i32,
    pub above_averages: i32,
    pub volume_support: i32,
}

impl Default for PositionWeights {
    fn default() -> Self {
        Self {
            golden_alignment: 25,
            slow_rising: 25,
            above_averages: 25,
            volume_support: 25,
        }
    }
}

impl WeightTable for PositionWeights {
    fn keys() -> &'static [&'static str] {
        &[
            "golden_alignment",
            "slow_rising",
            "above_averages",
            "volume_support",
        ]
    }

    fn set(&mut self, key: &str, points: i32) -> bool {
        let slot = match key {
            "golden_alignment" => &mut self.golden_alignment,
            "slow_rising" => &mut self.slow_rising,
            "above_averages" => &mut self.above_averages,
            "volume_support" => &mut self.volume_support,
            _ => return false,
        };
        *slot = points;
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionStrategy {
    pub params: PositionParams,
    pub weights: PositionWeights,
}

impl PositionStrategy {
    pub fn new(params: PositionParams, weights: PositionWeights) -> Self {
        Self { params, weights }
    }
}

impl Default for PositionStrategy {
    fn default() -> Self {
        Self::new(PositionParams::default(), PositionWeights::default())
    }
}

impl Evaluator for PositionStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Position
    }

    fn min_bars(&self) -> usize {
        let p = &self.params;
        (p.slow_window + p.slope_lookback)
            .max(p.fast_window)
            .max(p.volume_window)
    }

    fn score(&self, series: &BarSeries) -> EvaluationResult {
        let p = &self.params;
        let w = &self.weights;
        let closes = series.closes();
        let close = series.last_close();
        let volume = series.last().volume as f64;

        let fast = calculate_sma(&closes, p.fast_window);
        let slow = calculate_sma(&closes, p.slow_window);
        let slow_then = closes
            .len()
            .checked_sub(1 + p.slope_lookback)
            .and_then(|i| slow.at(i));
        let volume_ma = calculate_volume_ma(series, p.volume_window);

        let mut card = ScoreCard::new();
        card.add(
            matches!((fast.last(), slow.last()), (Some(f), Some(s)) if f > s),
            w.golden_alignment,
            format!("SMA{} above SMA{}", p.fast_window, p.slow_window),
        );
        card.add(
            matches!((slow.last(), slow_then), (Some(now), Some(then)) if now > then),
            w.slow_rising,
            format!("SMA{} rising over {} bars", p.slow_window, p.slope_lookback),
        );
        card.add(
            matches!((fast.last(), slow.last()), (Some(f), Some(s)) if close > f && close > s),
            w.above_averages,
            "close above long-term averages",
        );
        card.add(
            volume_ma.last().is_some_and(|ma| volume > ma),
            w.volume_support,
            format!("volume above {}-bar average", p.volume_window),
        );

        let levels = PriceLevels::from_percent(close, p.target_pct, p.stop_pct);
        card.finish(StrategyKind::Position, levels)
    }
}
