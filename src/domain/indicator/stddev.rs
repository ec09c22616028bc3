//! Rolling standard deviation.
//!
//! Population standard deviation (divides by n) over the trailing n values.
//! Warmup: first (n-1) positions are missing.

use crate::domain::indicator::window::{population_stddev, present, rolling};
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_stddev(values: &[f64], window: usize) -> IndicatorSeries {
    IndicatorSeries::new(
        IndicatorType::Stddev(window),
        rolling(&present(values), window, |w| Some(population_stddev(w))),
    )
}
