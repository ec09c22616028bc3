//! Day / turtle-style breakout strategy.
//!
//! Reads the last bar against rolling channels built from prior bars. The
//! breakout and breakdown channels exclude the current bar, so a close above
//! every earlier close in the window counts as a breakout.

use crate::domain::bar_series::BarSeries;
use crate::domain::indicator::window::rolling_mean;
use crate::domain::indicator::{
    IndicatorSeries, IndicatorType, calculate_atr, calculate_bollinger, calculate_rolling_max,
    calculate_rolling_min, calculate_rsi, calculate_volume_ma,
};
use crate::domain::levels::PriceLevels;
use crate::domain::scoring::{EvaluationResult, ScoreCard};
use crate::domain::strategy::{Evaluator, StrategyKind, WeightTable, above};

#[derive(Debug, Clone, PartialEq)]
pub struct DayParams {
    pub breakout_window: usize,
    pub breakdown_window: usize,
    pub rsi_period: usize,
    pub rsi_threshold: f64,
    pub bb_period: usize,
    pub bb_stddev_mult: f64,
    pub squeeze_window: usize,
    pub volume_window: usize,
    pub volume_mult: f64,
    pub atr_period: usize,
    pub atr_avg_window: usize,
    pub target_atr_mult: f64,
    pub stop_atr_mult: f64,
}

impl Default for DayParams {
    fn default() -> Self {
        Self {
            breakout_window: 20,
            breakdown_window: 10,
            rsi_period: 14,
            rsi_threshold: 50.0,
            bb_period: 20,
            bb_stddev_mult: 2.0,
            squeeze_window: 20,
            volume_window: 20,
            volume_mult: 1.2,
            atr_period: 14,
            atr_avg_window: 30,
            target_atr_mult: 2.0,
            stop_atr_mult: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayWeights {
    pub breakout: i32,
    pub rsi_below: i32,
    pub squeeze_breakout: i32,
    pub volume_spike: i32,
    pub atr_expansion: i32,
    pub breakdown: i32,
}

impl Default for DayWeights {
    fn default() -> Self {
        Self {
            breakout: 30,
            rsi_below: 15,
            squeeze_breakout: 20,
            volume_spike: 15,
            atr_expansion: 20,
            breakdown: -30,
        }
    }
}

impl WeightTable for DayWeights {
    fn keys() -> &'static [&'static str] {
        &[
            "breakout",
            "rsi_below",
            "squeeze_breakout",
            "volume_spike",
            "atr_expansion",
            "breakdown",
        ]
    }

    fn set(&mut self, key: &str, points: i32) -> bool {
        let slot = match key {
            "breakout" => &mut self.breakout,
            "rsi_below" => &mut self.rsi_below,
            "squeeze_breakout" => &mut self.squeeze_breakout,
            "volume_spike" => &mut self.volume_spike,
            "atr_expansion" => &mut self.atr_expansion,
            "breakdown" => &mut self.breakdown,
            _ => return false,
        };
        *slot = points;
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayStrategy {
    pub params: DayParams,
    pub weights: DayWeights,
}

impl DayStrategy {
    pub fn new(params: DayParams, weights: DayWeights) -> Self {
        Self { params, weights }
    }
}

impl Default for DayStrategy {
    fn default() -> Self {
        Self::new(DayParams::default(), DayWeights::default())
    }
}

impl Evaluator for DayStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Day
    }

    /// The longest single window. Conditions built on stacked windows (the
    /// squeeze average, the ATR average) read false until they settle.
    fn min_bars(&self) -> usize {
        let p = &self.params;
        [
            // channels are read on the previous bar
            p.breakout_window + 1,
            p.breakdown_window + 1,
            p.rsi_period + 1,
            p.bb_period,
            p.squeeze_window,
            p.volume_window,
            p.atr_period,
            p.atr_avg_window,
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

        let channel_high = calculate_rolling_max(&closes, p.breakout_window);
        let channel_low = calculate_rolling_min(&closes, p.breakdown_window);
        let rsi = calculate_rsi(&closes, p.rsi_period);
        let bands = calculate_bollinger(&closes, p.bb_period, p.bb_stddev_mult);
        let width_avg = IndicatorSeries::new(
            IndicatorType::Sma(p.squeeze_window),
            rolling_mean(&bands.width.values, p.squeeze_window),
        );
        let volume_ma = calculate_volume_ma(series, p.volume_window);
        let atr = calculate_atr(series, p.atr_period);
        let atr_avg = rolling_mean(&atr.values, p.atr_avg_window);

        let mut card = ScoreCard::new();

        card.add(
            above(close, channel_high.previous()).unwrap_or(false),
            w.breakout,
            format!("breakout above {}-bar high", p.breakout_window),
        );

        card.add(
            rsi.last().is_some_and(|r| r < p.rsi_threshold),
            w.rsi_below,
            format!("RSI below {}", p.rsi_threshold),
        );

        let squeezed = match (bands.width.previous(), width_avg.previous()) {
            (Some(width), Some(avg)) => width < avg,
            _ => false,
        };
        let over_band = above(close, bands.upper.previous()).unwrap_or(false);
        card.add(
            squeezed && over_band,
            w.squeeze_breakout,
            "squeeze breakout above upper band",
        );

        card.add(
            volume_ma
                .last()
                .is_some_and(|ma| volume > p.volume_mult * ma),
            w.volume_spike,
            format!("volume above {}x average", p.volume_mult),
        );

        let expanding = match (atr.last(), atr_avg.last().copied().flatten()) {
            (Some(a), Some(avg)) => a > avg,
            _ => false,
        };
        card.add(expanding, w.atr_expansion, "ATR expanding");

        card.add(
            channel_low.previous().is_some_and(|low| close < low),
            w.breakdown,
            format!("breakdown below {}-bar low", p.breakdown_window),
        );

        let levels = atr
            .last()
            .and_then(|a| PriceLevels::from_atr(close, a, p.target_atr_mult, p.stop_atr_mult));
        card.finish(StrategyKind::Day, levels)
    }
}
