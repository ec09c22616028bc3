//! Binary buy signal: oversold momentum turning up inside a trend.
//!
//! Fires when, on the last bar, RSI(14) < 40, CCI(20) < -100, the MACD
//! histogram is positive and ADX(14) > 20. Any missing reading means no
//! signal.

use crate::domain::bar_series::BarSeries;
use crate::domain::indicator::{calculate_adx, calculate_cci, calculate_macd_default, calculate_rsi};

pub const RSI_MAX: f64 = 40.0;
pub const CCI_MAX: f64 = -100.0;
pub const ADX_MIN: f64 = 20.0;

pub fn buy_signal(series: &BarSeries) -> bool {
    let closes = series.closes();

    let rsi = calculate_rsi(&closes, 14).last();
    let cci = calculate_cci(series, 20).last();
    let histogram = calculate_macd_default(&closes).histogram.last();
    let adx = calculate_adx(series, 14).adx.last();

    match (rsi, cci, histogram, adx) {
        (Some(rsi), Some(cci), Some(histogram), Some(adx)) => {
            rsi < RSI_MAX && cci < CCI_MAX && histogram > 0.0 && adx > ADX_MIN
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::OhlcvBar;
    use crate::domain::timeframe::Interval;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> BarSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                timestamp: start + chrono::Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1000,
            })
            .collect();
        BarSeries::new("SIG", Interval::Day1, bars).unwrap()
    }

    #[test]
    fn short_series_never_signals() {
        assert!(!buy_signal(&series(&[10.0, 11.0, 12.0])));
    }

    #[test]
    fn flat_series_never_signals() {
        assert!(!buy_signal(&series(&[50.0; 80])));
    }

    #[test]
    fn steady_decline_has_negative_histogram() {
        let closes: Vec<f64> = (0..80).map(|i| 200.0 - 2.0 * i as f64).collect();
        assert!(!buy_signal(&series(&closes)));
    }

    #[test]
    fn rally_is_not_oversold() {
        let closes: Vec<f64> = (0..80).map(|i| 50.0 + 2.0 * i as f64).collect();
        assert!(!buy_signal(&series(&closes)));
    }
}
