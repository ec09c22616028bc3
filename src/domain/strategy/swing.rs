//! Swing strategy: neutral momentum inside a trending, squeezed market.
//!
//! Target and stop are fixed fractions of the close, tiered by trend strength.

use crate::domain::bar_series::BarSeries;
use crate::domain::indicator::window::rolling_mean;
use crate::domain::indicator::{calculate_adx, calculate_bollinger, calculate_rsi, calculate_volume_ma};
use crate::domain::levels::PriceLevels;
use crate::domain::scoring::{EvaluationResult, ScoreCard};
use crate::domain::strategy::{Evaluator, StrategyKind, WeightTable};

/// One row of the ADX-tiered target/stop table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelTier {
    pub min_adx: f64,
    pub target_pct: f64,
    pub stop_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwingParams {
    pub rsi_period: usize,
    pub rsi_low: f64,
    pub rsi_high: f64,
    pub adx_period: usize,
    pub adx_threshold: f64,
    pub bb_period: usize,
    pub bb_stddev_mult: f64,
    pub squeeze_window: usize,
    pub volume_window: usize,
    pub volume_mult: f64,
    /// Checked top-down; the first tier whose `min_adx` the ADX reaches wins.
    pub tiers: Vec<LevelTier>,
    pub base_target_pct: f64,
    pub base_stop_pct: f64,
}

impl Default for SwingParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            rsi_low: 40.0,
            rsi_high: 60.0,
            adx_period: 14,
            adx_threshold: 25.0,
            bb_period: 20,
            bb_stddev_mult: 2.0,
            squeeze_window: 20,
            volume_window: 20,
            volume_mult: 1.5,
            tiers: vec![
                LevelTier {
                    min_adx: 40.0,
                    target_pct: 0.08,
                    stop_pct: 0.04,
                },
                // strictly above 25, see `tier_for`
                LevelTier {
                    min_adx: 25.0,
                    target_pct: 0.06,
                    stop_pct: 0.03,
                },
            ],
            base_target_pct: 0.04,
            base_stop_pct: 0.02,
        }
    }
}

impl SwingParams {
    /// Target/stop fractions for a given ADX reading. The strongest tier is
    /// inclusive, the rest require ADX strictly above their floor.
    pub fn tier_for(&self, adx: Option<f64>) -> (f64, f64) {
        let Some(adx) = adx else {
            return (self.base_target_pct, self.base_stop_pct);
        };
        for (i, tier) in self.tiers.iter().enumerate() {
            let reached = if i == 0 {
                adx >= tier.min_adx
            } else {
                adx > tier.min_adx
            };
            if reached {
                return (tier.target_pct, tier.stop_pct);
            }
        }
        (self.base_target_pct, self.base_stop_pct)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwingWeights {
    pub rsi_neutral: i32,
    pub adx_trend: i32,
    pub squeeze: i32,
    pub volume_spike: i32,
}

impl Default for SwingWeights {
    fn default() -> Self {
        Self {
            rsi_neutral: 25,
            adx_trend: 25,
            squeeze: 25,
            volume_spike: 25,
        }
    }
}

impl WeightTable for SwingWeights {
    fn keys() -> &'static [&'static str] {
        &["rsi_neutral", "adx_trend", "squeeze", "volume_spike"]
    }

    fn set(&mut self, key: &str, points: i32) -> bool {
        let slot = match key {
            "rsi_neutral" => &mut self.rsi_neutral,
            "adx_trend" => &mut self.adx_trend,
            "squeeze" => &mut self.squeeze,
            "volume_spike" => &mut self.volume_spike,
            _ => return false,
        };
        *slot = points;
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwingStrategy {
    pub params: SwingParams,
    pub weights: SwingWeights,
}

impl SwingStrategy {
    pub fn new(params: SwingParams, weights: SwingWeights) -> Self {
        Self { params, weights }
    }
}

impl Default for SwingStrategy {
    fn default() -> Self {
        Self::new(SwingParams::default(), SwingWeights::default())
    }
}

impl Evaluator for SwingStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Swing
    }

    fn min_bars(&self) -> usize {
        let p = &self.params;
        [
            p.rsi_period + 1,
            // first ADX value lands on index 2n - 1
            2 * p.adx_period,
            p.bb_period + p.squeeze_window - 1,
            p.volume_window,
        ]
        .into_iter()
        .max()
        .unwrap_or(1)
    }

    fn score(&self, series: &BarSeries) -> EvaluationResult {
        let p = &self.params;
        let w = &self.weights;
        let closes = series.closes();
        let close = series.last_close();
        let volume = series.last().volume as f64;

        let rsi = calculate_rsi(&closes, p.rsi_period).last();
        let adx = calculate_adx(series, p.adx_period).adx.last();
        let bands = calculate_bollinger(&closes, p.bb_period, p.bb_stddev_mult);
        let width_avg = rolling_mean(&bands.width.values, p.squeeze_window)
            .last()
            .copied()
            .flatten();
        let volume_ma = calculate_volume_ma(series, p.volume_window).last();

        let mut card = ScoreCard::new();
        card.add(
            rsi.is_some_and(|r| (p.rsi_low..=p.rsi_high).contains(&r)),
            w.rsi_neutral,
            format!("RSI neutral ({}-{})", p.rsi_low, p.rsi_high),
        );
        card.add(
            adx.is_some_and(|a| a > p.adx_threshold),
            w.adx_trend,
            format!("ADX above {}", p.adx_threshold),
        );
        card.add(
            matches!((bands.width.last(), width_avg), (Some(cur), Some(avg)) if cur < avg),
            w.squeeze,
            "Bollinger squeeze",
        );
        card.add(
            volume_ma.is_some_and(|ma| volume > p.volume_mult * ma),
            w.volume_spike,
            format!("volume above {}x average", p.volume_mult),
        );

        let (target_pct, stop_pct) = p.tier_for(adx);
        let levels = PriceLevels::from_percent(close, target_pct, stop_pct);
        card.finish(StrategyKind::Swing, levels)
    }
}
