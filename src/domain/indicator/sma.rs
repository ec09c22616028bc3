//! Simple Moving Average.
//!
//! SMA(n)[i] = mean(values[i-n+1..=i]); the first (n-1) positions are missing.

use crate::domain::bar_series::{BarSeries, PriceColumn};
use crate::domain::indicator::window::{present, rolling_mean};
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_sma(values: &[f64], window: usize) -> IndicatorSeries {
    IndicatorSeries::new(
        IndicatorType::Sma(window),
        rolling_mean(&present(values), window),
    )
}

/// SMA over raw traded volume.
pub fn calculate_volume_ma(series: &BarSeries, window: usize) -> IndicatorSeries {
    let volumes = series.column(PriceColumn::Volume);
    IndicatorSeries::new(
        IndicatorType::VolumeMa(window),
        rolling_mean(&present(&volumes), window),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::OhlcvBar;
    use crate::domain::timeframe::Interval;
    use chrono::NaiveDate;

    #[test]
    fn sma_warmup() {
        let series = calculate_sma(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);
        assert_eq!(series.values[0], None);
        assert_eq!(series.values[1], None);
        assert_eq!(series.values[2], Some(20.0));
        assert_eq!(series.values[3], Some(30.0));
        assert_eq!(series.values[4], Some(40.0));
    }

    #[test]
    fn sma_period_1_is_identity() {
        let series = calculate_sma(&[3.0, 7.0], 1);
        assert_eq!(series.values, vec![Some(3.0), Some(7.0)]);
    }

    #[test]
    fn sma_short_input_is_missing() {
        let series = calculate_sma(&[1.0, 2.0], 5);
        assert_eq!(series.values, vec![None, None]);
    }

    #[test]
    fn sma_indicator_type() {
        assert_eq!(calculate_sma(&[1.0], 9).indicator_type, IndicatorType::Sma(9));
    }

    #[test]
    fn volume_ma_uses_volume_column() {
        let bars: Vec<OhlcvBar> = [100u64, 200, 600]
            .iter()
            .enumerate()
            .map(|(i, &volume)| OhlcvBar {
                timestamp: NaiveDate::from_ymd_opt(2024, 1, i as u32 + 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                open: 10.0,
                high: 10.0,
                low: 10.0,
                close: 10.0,
                volume,
            })
            .collect();
        let series = BarSeries::new("T", Interval::Day1, bars).unwrap();

        let vma = calculate_volume_ma(&series, 3);
        assert_eq!(vma.indicator_type, IndicatorType::VolumeMa(3));
        assert_eq!(vma.values, vec![None, None, Some(300.0)]);
    }
}
