//! Rolling highest / lowest value over a trailing window.

use crate::domain::indicator::window::{present, rolling};
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_rolling_max(values: &[f64], window: usize) -> IndicatorSeries {
    IndicatorSeries::new(
        IndicatorType::RollingMax(window),
        rolling(&present(values), window, |w| {
            w.iter().copied().reduce(f64::max)
        }),
    )
}

pub fn calculate_rolling_min(values: &[f64], window: usize) -> IndicatorSeries {
    IndicatorSeries::new(
        IndicatorType::RollingMin(window),
        rolling(&present(values), window, |w| {
            w.iter().copied().reduce(f64::min)
        }),
    )
}
