//! Exponential Moving Average.
//!
//! k = 2/(span+1), EMA[0] = values[0], EMA[i] = values[i]*k + EMA[i-1]*(1-k).
//! No warm-up gap: every position is defined. A span of 0 yields an
//! all-missing series.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_ema(values: &[f64], span: usize) -> IndicatorSeries {
    if span == 0 {
        return IndicatorSeries::missing(IndicatorType::Ema(span), values.len());
    }

    let k = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema: Option<f64> = None;

    for &v in values {
        let next = match ema {
            None => v,
            Some(prev) => step(prev, v, k),
        };
        ema = Some(next);
        out.push(Some(next));
    }

    IndicatorSeries::new(IndicatorType::Ema(span), out)
}

/// One recursion step. An unchanged input leaves the average untouched.
fn step(prev: f64, x: f64, k: f64) -> f64 {
    if x == prev { prev } else { x * k + prev * (1.0 - k) }
}

/// EMA over an already-aligned series; positions before the first present
/// value stay missing and the recursion restarts after a gap.
pub(crate) fn ema_of(values: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    if span == 0 {
        return vec![None; values.len()];
    }

    let k = 2.0 / (span as f64 + 1.0);
    let mut ema: Option<f64> = None;
    values
        .iter()
        .map(|v| {
            ema = match (*v, ema) {
                (None, _) => None,
                (Some(x), None) => Some(x),
                (Some(x), Some(prev)) => Some(step(prev, x, k)),
            };
            ema
        })
        .collect()
}
