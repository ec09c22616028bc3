//! Additive condition scoring and the evaluation result model.
//!
//! A [`ScoreCard`] accumulates signed points from independent conditions.
//! The total is clamped to 0..=100 only when the card is finished, so a
//! penalty can pull the running sum below zero without affecting the bound.

use crate::domain::levels::PriceLevels;
use crate::domain::strategy::StrategyKind;

pub const NO_SIGNAL: &str = "no signal";
pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    strategy: StrategyKind,
    score: u8,
    rationale: Vec<String>,
    levels: Option<PriceLevels>,
}

impl EvaluationResult {
    pub fn insufficient_data(strategy: StrategyKind, have: usize, need: usize) -> Self {
        Self {
            strategy,
            score: 0,
            rationale: vec![format!("insufficient data: have {have} bars, need {need}")],
            levels: None,
        }
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn rationale(&self) -> &[String] {
        &self.rationale
    }

    pub fn levels(&self) -> Option<&PriceLevels> {
        self.levels.as_ref()
    }

    pub fn entry_price(&self) -> Option<f64> {
        self.levels.map(|l| l.entry())
    }

    pub fn target_price(&self) -> Option<f64> {
        self.levels.map(|l| l.target())
    }

    pub fn stop_price(&self) -> Option<f64> {
        self.levels.map(|l| l.stop())
    }

    pub fn is_insufficient_data(&self) -> bool {
        self.score == 0
            && self.levels.is_none()
            && self
                .rationale
                .first()
                .is_some_and(|r| r.starts_with("insufficient data"))
    }

    /// Replaces the price levels, keeping score and rationale.
    pub fn with_levels(self, levels: Option<PriceLevels>) -> Self {
        Self { levels, ..self }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoreCard {
    total: i32,
    rationale: Vec<String>,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `points` (saturating) and records `reason` when `fired`. Returns `fired`.
    pub fn add(&mut self, fired: bool, points: i32, reason: impl Into<String>) -> bool {
        if fired {
            self.total = self.total.saturating_add(points);
            self.rationale
                .push(format!("{} ({:+})", reason.into(), points));
        }
        fired
    }

    /// Running total before clamping.
    pub fn raw_total(&self) -> i32 {
        self.total
    }

    pub fn finish(self, strategy: StrategyKind, levels: Option<PriceLevels>) -> EvaluationResult {
        let score = self.total.clamp(0, MAX_SCORE as i32) as u8;
        let rationale = if self.rationale.is_empty() {
            vec![NO_SIGNAL.to_string()]
        } else {
            self.rationale
        };
        EvaluationResult {
            strategy,
            score,
            rationale,
            levels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extreme_weights_saturate_before_clamping() {
        let mut card = ScoreCard::new();
        card.add(true, i32::MAX, "a");
        card.add(true, i32::MAX, "b");
        assert_eq!(card.raw_total(), i32::MAX);
        assert_eq!(card.finish(StrategyKind::Day, None).score(), MAX_SCORE);

        let mut card = ScoreCard::new();
        card.add(true, i32::MIN, "a");
        card.add(true, -1, "b");
        assert_eq!(card.finish(StrategyKind::Day, None).score(), 0);
    }

    #[test]
    fn empty_card_defaults_to_no_signal() {
        let result = ScoreCard::new().finish(StrategyKind::Swing, None);
        assert_eq!(result.score(), 0);
        assert_eq!(result.rationale(), &[NO_SIGNAL.to_string()]);
    }

    #[test]
    fn only_fired_conditions_count() {
        let mut card = ScoreCard::new();
        assert!(card.add(true, 20, "trend"));
        assert!(!card.add(false, 50, "ignored"));
        card.add(true, 15, "volume");
        let result = card.finish(StrategyKind::Day, None);
        assert_eq!(result.score(), 35);
        assert_eq!(result.rationale(), &["trend (+20)", "volume (+15)"]);
    }

    #[test]
    fn total_is_clamped_both_ways() {
        let mut card = ScoreCard::new();
        card.add(true, -30, "breakdown");
        assert_eq!(card.raw_total(), -30);
        assert_eq!(card.finish(StrategyKind::Day, None).score(), 0);

        let mut card = ScoreCard::new();
        card.add(true, 80, "a");
        card.add(true, 80, "b");
        assert_eq!(card.finish(StrategyKind::Day, None).score(), 100);
    }

    #[test]
    fn penalty_rationale_is_kept_even_when_score_is_zero() {
        let mut card = ScoreCard::new();
        card.add(true, -30, "breakdown");
        let result = card.finish(StrategyKind::Day, None);
        assert_eq!(result.rationale(), &["breakdown (-30)"]);
    }

    #[test]
    fn order_does_not_change_total() {
        let mut a = ScoreCard::new();
        a.add(true, 30, "x");
        a.add(true, -30, "y");
        a.add(true, 15, "z");
        let mut b = ScoreCard::new();
        b.add(true, 15, "z");
        b.add(true, 30, "x");
        b.add(true, -30, "y");
        assert_eq!(a.raw_total(), b.raw_total());
    }

    #[test]
    fn insufficient_data_result() {
        let result = EvaluationResult::insufficient_data(StrategyKind::Position, 5, 220);
        assert_eq!(result.score(), 0);
        assert!(result.is_insufficient_data());
        assert_eq!(result.rationale(), &["insufficient data: have 5 bars, need 220"]);
        assert_eq!(result.entry_price(), None);
        assert_eq!(result.target_price(), None);
        assert_eq!(result.stop_price(), None);
    }

    #[test]
    fn levels_are_all_or_nothing() {
        let levels = PriceLevels::new(10.0, 11.0, 9.5);
        let result = ScoreCard::new().finish(StrategyKind::Swing, levels);
        assert_eq!(result.entry_price(), Some(10.0));
        assert_eq!(result.target_price(), Some(11.0));
        assert_eq!(result.stop_price(), Some(9.5));

        let cleared = result.with_levels(None);
        assert!(cleared.entry_price().is_none() && cleared.stop_price().is_none());
    }
}
