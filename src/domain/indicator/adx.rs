//! ADX (Average Directional Index) with +DI / -DI.
//!
//! Per bar (from the second one):
//! - up = high - prev_high, down = prev_low - low
//! - +DM = up if up > down and up > 0, else 0
//! - -DM = down if down > up and down > 0, else 0
//!
//! +DI = 100 × smoothed(+DM) / smoothed(TR), likewise -DI.
//! DX = 100 × |+DI - -DI| / (+DI + -DI); missing when the sum is zero.
//! ADX = smoothed(DX).
//!
//! With period n the first valid +DI/-DI is at index n and the first ADX at
//! index 2n - 1 (when DX is defined throughout).

use crate::domain::bar_series::BarSeries;
use crate::domain::indicator::atr::true_ranges;
use crate::domain::indicator::window::{ratio, smooth};
use crate::domain::indicator::{IndicatorSeries, IndicatorType, Smoothing};

pub const DEFAULT_PERIOD: usize = 14;

#[derive(Debug, Clone, PartialEq)]
pub struct AdxOutput {
    pub adx: IndicatorSeries,
    pub plus_di: IndicatorSeries,
    pub minus_di: IndicatorSeries,
}

pub fn calculate_adx(series: &BarSeries, period: usize) -> AdxOutput {
    calculate_adx_with(series, period, Smoothing::default())
}

pub fn calculate_adx_with(series: &BarSeries, period: usize, smoothing: Smoothing) -> AdxOutput {
    let bars = series.bars();
    let n = bars.len();

    let mut plus_dm: Vec<Option<f64>> = Vec::with_capacity(n);
    let mut minus_dm: Vec<Option<f64>> = Vec::with_capacity(n);
    let mut tr: Vec<Option<f64>> = Vec::with_capacity(n);

    let ranges = true_ranges(bars);
    for i in 0..n {
        if i == 0 {
            plus_dm.push(None);
            minus_dm.push(None);
            tr.push(None);
            continue;
        }
        let up = bars[i].high - bars[i - 1].high;
        let down = bars[i - 1].low - bars[i].low;
        plus_dm.push(Some(if up > down && up > 0.0 { up } else { 0.0 }));
        minus_dm.push(Some(if down > up && down > 0.0 { down } else { 0.0 }));
        tr.push(Some(ranges[i]));
    }

    let smoothed_plus = smooth(&plus_dm, period, smoothing);
    let smoothed_minus = smooth(&minus_dm, period, smoothing);
    let smoothed_tr = smooth(&tr, period, smoothing);

    let mut plus_di = Vec::with_capacity(n);
    let mut minus_di = Vec::with_capacity(n);
    let mut dx = Vec::with_capacity(n);

    for i in 0..n {
        let (p, m) = match (smoothed_plus[i], smoothed_minus[i], smoothed_tr[i]) {
            (Some(p), Some(m), Some(t)) => (
                ratio(p, t).map(|r| r * 100.0),
                ratio(m, t).map(|r| r * 100.0),
            ),
            _ => (None, None),
        };
        plus_di.push(p);
        minus_di.push(m);
        dx.push(match (p, m) {
            (Some(p), Some(m)) => ratio((p - m).abs(), p + m).map(|r| r * 100.0),
            _ => None,
        });
    }

    let indicator_type = IndicatorType::Adx(period);
    AdxOutput {
        adx: IndicatorSeries::new(indicator_type.clone(), smooth(&dx, period, smoothing)),
        plus_di: IndicatorSeries::new(indicator_type.clone(), plus_di),
        minus_di: IndicatorSeries::new(indicator_type, minus_di),
    }
}
