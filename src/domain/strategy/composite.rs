//! Composite oscillator score.
//!
//! Sums points from seven independent readings on the last bar: oversold
//! oscillators (RSI, stochastic, CCI, Bollinger %B), trend strength (ADX),
//! momentum turning up (MACD histogram) and volatility (ATR relative to the
//! close).

use crate::domain::bar_series::BarSeries;
use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::domain::indicator::{
    calculate_adx, calculate_atr, calculate_bollinger, calculate_cci, calculate_macd,
    calculate_rsi, calculate_stochastic,
};
use crate::domain::levels::PriceLevels;
use crate::domain::scoring::{EvaluationResult, ScoreCard};
use crate::domain::strategy::{Evaluator, StrategyKind, WeightTable};

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeParams {
    pub rsi_period: usize,
    pub rsi_low: f64,
    pub rsi_high: f64,
    pub stoch_k: usize,
    pub stoch_d: usize,
    pub stoch_oversold: f64,
    pub cci_period: usize,
    pub cci_oversold: f64,
    pub adx_period: usize,
    pub adx_threshold: f64,
    pub bb_period: usize,
    pub bb_stddev_mult: f64,
    pub percent_b_max: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub atr_period: usize,
    /// ATR as a fraction of the close.
    pub atr_ratio_min: f64,
    pub target_atr_mult: f64,
    pub stop_atr_mult: f64,
}

impl Default for CompositeParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            rsi_low: 30.0,
            rsi_high: 50.0,
            stoch_k: 14,
            stoch_d: 3,
            stoch_oversold: 20.0,
            cci_period: 20,
            cci_oversold: -100.0,
            adx_period: 14,
            adx_threshold: 25.0,
            bb_period: 20,
            bb_stddev_mult: 2.0,
            percent_b_max: 30.0,
            macd_fast: DEFAULT_FAST,
            macd_slow: DEFAULT_SLOW,
            macd_signal: DEFAULT_SIGNAL,
            atr_period: 14,
            atr_ratio_min: 0.03,
            target_atr_mult: 2.0,
            stop_atr_mult: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeWeights {
    pub rsi_zone: i32,
    pub stoch_oversold: i32,
    pub cci_oversold: i32,
    pub adx_trend: i32,
    pub percent_b_low: i32,
    pub macd_positive: i32,
    pub atr_volatile: i32,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            rsi_zone: 15,
            stoch_oversold: 15,
            cci_oversold: 15,
            adx_trend: 10,
            percent_b_low: 15,
            macd_positive: 10,
            atr_volatile: 10,
        }
    }
}

impl WeightTable for CompositeWeights {
    fn keys() -> &'static [&'static str] {
        &[
            "rsi_zone",
            "stoch_oversold",
            "cci_oversold",
            "adx_trend",
            "percent_b_low",
            "macd_positive",
            "atr_volatile",
        ]
    }

    fn set(&mut self, key: &str, points: i32) -> bool {
        let slot = match key {
            "rsi_zone" => &mut self.rsi_zone,
            "stoch_oversold" => &mut self.stoch_oversold,
            "cci_oversold" => &mut self.cci_oversold,
            "adx_trend" => &mut self.adx_trend,
            "percent_b_low" => &mut self.percent_b_low,
            "macd_positive" => &mut self.macd_positive,
            "atr_volatile" => &mut self.atr_volatile,
            _ => return false,
        };
        *slot = points;
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeStrategy {
    pub params: CompositeParams,
    pub weights: CompositeWeights,
}

impl CompositeStrategy {
    pub fn new(params: CompositeParams, weights: CompositeWeights) -> Self {
        Self { params, weights }
    }
}

impl Default for CompositeStrategy {
    fn default() -> Self {
        Self::new(CompositeParams::default(), CompositeWeights::default())
    }
}

impl Evaluator for CompositeStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Composite
    }

    fn min_bars(&self) -> usize {
        let p = &self.params;
        [
            p.rsi_period + 1,
            p.stoch_k + p.stoch_d - 1,
            p.cci_period,
            2 * p.adx_period,
            p.bb_period,
            p.macd_slow + p.macd_signal,
            p.atr_period,
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

        let rsi = calculate_rsi(&closes, p.rsi_period).last();
        let stoch_k = calculate_stochastic(series, p.stoch_k, p.stoch_d).k.last();
        let cci = calculate_cci(series, p.cci_period).last();
        let adx = calculate_adx(series, p.adx_period).adx.last();
        let percent_b = calculate_bollinger(&closes, p.bb_period, p.bb_stddev_mult)
            .percent_b
            .last();
        let histogram = calculate_macd(&closes, p.macd_fast, p.macd_slow, p.macd_signal)
            .histogram
            .last();
        let atr = calculate_atr(series, p.atr_period).last();

        let mut card = ScoreCard::new();
        card.add(
            rsi.is_some_and(|r| p.rsi_low < r && r < p.rsi_high),
            w.rsi_zone,
            format!("RSI between {} and {}", p.rsi_low, p.rsi_high),
        );
        card.add(
            stoch_k.is_some_and(|k| k < p.stoch_oversold),
            w.stoch_oversold,
            format!("stochastic %K below {}", p.stoch_oversold),
        );
        card.add(
            cci.is_some_and(|c| c < p.cci_oversold),
            w.cci_oversold,
            format!("CCI below {}", p.cci_oversold),
        );
        card.add(
            adx.is_some_and(|a| a > p.adx_threshold),
            w.adx_trend,
            format!("ADX above {}", p.adx_threshold),
        );
        card.add(
            percent_b.is_some_and(|b| b < p.percent_b_max),
            w.percent_b_low,
            format!("Bollinger %B below {}", p.percent_b_max),
        );
        card.add(
            histogram.is_some_and(|h| h > 0.0),
            w.macd_positive,
            "MACD histogram positive",
        );
        card.add(
            atr.is_some_and(|a| a / close > p.atr_ratio_min),
            w.atr_volatile,
            format!("ATR above {:.0}% of close", p.atr_ratio_min * 100.0),
        );

        let levels =
            atr.and_then(|a| PriceLevels::from_atr(close, a, p.target_atr_mult, p.stop_atr_mult));
        card.finish(StrategyKind::Composite, levels)
    }
}
