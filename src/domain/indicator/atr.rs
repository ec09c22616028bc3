//! ATR (Average True Range).
//!
//! True range per bar is max(high-low, |high-prev_close|, |low-prev_close|);
//! the first bar has no previous close and uses high-low. ATR smooths the
//! true range over n bars. Warmup: first (n-1) positions are missing.

use crate::domain::bar_series::BarSeries;
use crate::domain::indicator::window::smooth;
use crate::domain::indicator::{IndicatorSeries, IndicatorType, Smoothing};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_atr(series: &BarSeries, period: usize) -> IndicatorSeries {
    calculate_atr_with(series, period, Smoothing::default())
}

pub fn calculate_atr_with(series: &BarSeries, period: usize, smoothing: Smoothing) -> IndicatorSeries {
    let tr: Vec<Option<f64>> = true_ranges(series.bars()).into_iter().map(Some).collect();
    IndicatorSeries::new(IndicatorType::Atr(period), smooth(&tr, period, smoothing))
}

pub(crate) fn true_ranges(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| match i {
            0 => bar.high - bar.low,
            _ => bar.true_range(bars[i - 1].close),
        })
        .collect()
}
