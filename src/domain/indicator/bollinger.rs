//! Bollinger Bands.
//!
//! - Middle: SMA over n closes
//! - Upper / Lower: Middle ± (multiplier × population StdDev)
//! - Width: Upper - Lower
//! - Width %: Width / Middle × 100
//! - %B: (Close - Lower) / (Upper - Lower) × 100, missing when the bands touch
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) positions are missing.

use crate::domain::indicator::window::{mean, population_stddev, present, ratio, rolling};
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_STDDEV_MULT: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerOutput {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
    pub width: IndicatorSeries,
    pub width_pct: IndicatorSeries,
    pub percent_b: IndicatorSeries,
}

pub fn calculate_bollinger(closes: &[f64], period: usize, stddev_mult: f64) -> BollingerOutput {
    let indicator_type = IndicatorType::Bollinger {
        period,
        stddev_mult_x100: (stddev_mult * 100.0).round() as u32,
    };

    let values = present(closes);
    let middle = rolling(&values, period, |w| Some(mean(w)));
    let sigma = rolling(&values, period, |w| Some(population_stddev(w)));

    let mut upper = Vec::with_capacity(closes.len());
    let mut lower = Vec::with_capacity(closes.len());
    let mut width = Vec::with_capacity(closes.len());
    let mut width_pct = Vec::with_capacity(closes.len());
    let mut percent_b = Vec::with_capacity(closes.len());

    for (i, (m, s)) in middle.iter().zip(&sigma).enumerate() {
        match (*m, *s) {
            (Some(m), Some(s)) => {
                let up = m + stddev_mult * s;
                let lo = m - stddev_mult * s;
                upper.push(Some(up));
                lower.push(Some(lo));
                width.push(Some(up - lo));
                width_pct.push(ratio(up - lo, m).map(|r| r * 100.0));
                percent_b.push(ratio(closes[i] - lo, up - lo).map(|r| r * 100.0));
            }
            _ => {
                upper.push(None);
                lower.push(None);
                width.push(None);
                width_pct.push(None);
                percent_b.push(None);
            }
        }
    }

    let series = |values| IndicatorSeries::new(indicator_type.clone(), values);
    BollingerOutput {
        upper: series(upper),
        middle: series(middle),
        lower: series(lower),
        width: series(width),
        width_pct: series(width_pct),
        percent_b: series(percent_b),
    }
}
