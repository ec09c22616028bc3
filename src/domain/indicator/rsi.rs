//! RSI (Relative Strength Index).
//!
//! Price deltas are split into gains and losses, each smoothed over n deltas
//! (see [`Smoothing`]), and RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//!
//! Zero denominators:
//! - avg_loss == 0, avg_gain > 0: RSI = 100
//! - avg_gain == 0, avg_loss > 0: RSI = 0
//! - both zero (flat window): RSI = 50
//!
//! Warmup: the first n positions are missing (n deltas need n + 1 prices).

use crate::domain::indicator::window::smooth;
use crate::domain::indicator::{IndicatorSeries, IndicatorType, Smoothing};

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_rsi(closes: &[f64], period: usize) -> IndicatorSeries {
    calculate_rsi_with(closes, period, Smoothing::default())
}

pub fn calculate_rsi_with(closes: &[f64], period: usize, smoothing: Smoothing) -> IndicatorSeries {
    if period == 0 || closes.len() < 2 {
        return IndicatorSeries::missing(IndicatorType::Rsi(period), closes.len());
    }

    // Deltas aligned with closes; there is none for the first bar.
    let mut gains: Vec<Option<f64>> = Vec::with_capacity(closes.len());
    let mut losses: Vec<Option<f64>> = Vec::with_capacity(closes.len());
    gains.push(None);
    losses.push(None);
    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(Some(change.max(0.0)));
        losses.push(Some((-change).max(0.0)));
    }

    let avg_gain = smooth(&gains, period, smoothing);
    let avg_loss = smooth(&losses, period, smoothing);

    let values = avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(g, l)| match (*g, *l) {
            (Some(g), Some(l)) => Some(rsi_from_averages(g, l)),
            _ => None,
        })
        .collect();

    IndicatorSeries::new(IndicatorType::Rsi(period), values)
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 { 50.0 } else { 100.0 }
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}
