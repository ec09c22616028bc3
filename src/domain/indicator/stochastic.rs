//! Stochastic oscillator.
//!
//! %K = 100 × (close - lowest_low(k)) / (highest_high(k) - lowest_low(k))
//! %D = SMA(%K, d)
//!
//! %K is missing when the window's high and low coincide.

use crate::domain::bar_series::{BarSeries, PriceColumn};
use crate::domain::indicator::window::{present, ratio, rolling, rolling_mean};
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub const DEFAULT_K_PERIOD: usize = 14;
pub const DEFAULT_D_PERIOD: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct StochasticOutput {
    pub k: IndicatorSeries,
    pub d: IndicatorSeries,
}

pub fn calculate_stochastic(series: &BarSeries, k_period: usize, d_period: usize) -> StochasticOutput {
    let highs = series.column(PriceColumn::High);
    let lows = series.column(PriceColumn::Low);
    let closes = series.closes();

    let highest = rolling(&present(&highs), k_period, |w| w.iter().copied().reduce(f64::max));
    let lowest = rolling(&present(&lows), k_period, |w| w.iter().copied().reduce(f64::min));

    let k: Vec<Option<f64>> = (0..closes.len())
        .map(|i| match (highest[i], lowest[i]) {
            (Some(hh), Some(ll)) => ratio(closes[i] - ll, hh - ll).map(|r| r * 100.0),
            _ => None,
        })
        .collect();
    let d = rolling_mean(&k, d_period);

    let indicator_type = IndicatorType::Stochastic { k_period, d_period };
    StochasticOutput {
        k: IndicatorSeries::new(indicator_type.clone(), k),
        d: IndicatorSeries::new(indicator_type, d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::OhlcvBar;
    use crate::domain::timeframe::Interval;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_series(rows: &[(f64, f64, f64)]) -> BarSeries {
        let bars = rows
            .iter()
            .enumerate()
            .map(|(i, &(high, low, close))| OhlcvBar {
                timestamp: NaiveDate::from_ymd_opt(2024, 2, i as u32 + 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                open: close,
                high,
                low,
                close,
                volume: 1000,
            })
            .collect();
        BarSeries::new("TEST", Interval::Day1, bars).unwrap()
    }

    #[test]
    fn stochastic_close_at_high_is_100() {
        let out = calculate_stochastic(
            &make_series(&[(10.0, 8.0, 9.0), (12.0, 9.0, 11.0), (13.0, 10.0, 13.0)]),
            3,
            1,
        );
        assert_relative_eq!(out.k.at(2).unwrap(), 100.0);
        assert_relative_eq!(out.d.at(2).unwrap(), 100.0);
    }

    #[test]
    fn stochastic_close_at_low_is_0() {
        let out = calculate_stochastic(
            &make_series(&[(10.0, 8.0, 9.0), (12.0, 9.0, 11.0), (11.0, 7.0, 7.0)]),
            3,
            1,
        );
        assert_relative_eq!(out.k.at(2).unwrap(), 0.0);
    }

    #[test]
    fn stochastic_d_warmup() {
        let rows: Vec<(f64, f64, f64)> = (0..10)
            .map(|i| {
                let c = 20.0 + (i % 3) as f64;
                (c + 1.0, c - 1.0, c)
            })
            .collect();
        let out = calculate_stochastic(&make_series(&rows), 4, 3);
        assert_eq!(out.k.first_valid_index(), Some(3));
        assert_eq!(out.d.first_valid_index(), Some(5));
        for v in out.k.values.iter().flatten() {
            assert!((0.0..=100.0).contains(v));
        }
    }

    #[test]
    fn stochastic_flat_is_missing() {
        let out = calculate_stochastic(&make_series(&[(5.0, 5.0, 5.0); 20]), 14, 3);
        assert_eq!(out.k.valid_count(), 0);
        assert_eq!(out.d.valid_count(), 0);
    }
}
