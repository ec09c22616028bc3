//! CCI (Commodity Channel Index).
//!
//! TP = (high + low + close) / 3
//! CCI = (TP - SMA(TP, n)) / (0.015 × MeanAbsDev(TP, n))
//!
//! Missing during the (n-1) warm-up and wherever the mean absolute deviation
//! is zero (a perfectly flat window).

use crate::domain::bar_series::{BarSeries, PriceColumn};
use crate::domain::indicator::window::{mean, present, ratio, rolling};
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub const DEFAULT_PERIOD: usize = 20;
const LAMBERT_CONSTANT: f64 = 0.015;

pub fn calculate_cci(series: &BarSeries, period: usize) -> IndicatorSeries {
    let typical = series.column(PriceColumn::Typical);
    let values = rolling(&present(&typical), period, |w| {
        let m = mean(w);
        let mad = w.iter().map(|v| (v - m).abs()).sum::<f64>() / w.len() as f64;
        let last = w[w.len() - 1];
        ratio(last - m, LAMBERT_CONSTANT * mad)
    });
    IndicatorSeries::new(IndicatorType::Cci(period), values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::OhlcvBar;
    use crate::domain::timeframe::Interval;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn closes_series(closes: &[f64]) -> BarSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                timestamp: NaiveDate::from_ymd_opt(2024, 1, i as u32 + 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect();
        BarSeries::new("TEST", Interval::Day1, bars).unwrap()
    }

    #[test]
    fn cci_warmup() {
        let cci = calculate_cci(&closes_series(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3);
        assert_eq!(cci.first_valid_index(), Some(2));
        assert_eq!(cci.indicator_type, IndicatorType::Cci(3));
    }

    #[test]
    fn cci_known_value() {
        // TP = 1,2,3 -> mean 2, MAD 2/3, CCI = (3-2) / (0.015 * 2/3) = 100
        let cci = calculate_cci(&closes_series(&[1.0, 2.0, 3.0]), 3);
        assert_relative_eq!(cci.at(2).unwrap(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn cci_falling_prices_negative() {
        let cci = calculate_cci(&closes_series(&[5.0, 4.0, 3.0]), 3);
        assert_relative_eq!(cci.at(2).unwrap(), -100.0, epsilon = 1e-9);
    }

    #[test]
    fn cci_flat_window_is_missing() {
        let cci = calculate_cci(&closes_series(&[7.0; 25]), 20);
        assert_eq!(cci.valid_count(), 0);
    }
}
