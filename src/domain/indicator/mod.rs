//! Technical indicator implementations.
//!
//! Every indicator returns values aligned 1:1 with its input. Positions where
//! the window is not yet full, or where the arithmetic degenerates (a zero
//! denominator), hold `None` rather than a placeholder number.
//!
//! - `IndicatorType`: indicator identity + parameters (hashable, displayable)
//! - `IndicatorSeries`: an aligned sequence of optional values
//! - `Smoothing`: averaging convention for RSI, ATR and ADX

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod cci;
pub mod ema;
pub mod extremes;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stddev;
pub mod stochastic;
pub(crate) mod window;

pub use adx::{AdxOutput, calculate_adx, calculate_adx_with};
pub use atr::{calculate_atr, calculate_atr_with};
pub use bollinger::{BollingerOutput, calculate_bollinger};
pub use cci::calculate_cci;
pub use ema::calculate_ema;
pub use extremes::{calculate_rolling_max, calculate_rolling_min};
pub use macd::{MacdOutput, calculate_macd, calculate_macd_default};
pub use rsi::{calculate_rsi, calculate_rsi_with};
pub use sma::{calculate_sma, calculate_volume_ma};
pub use stddev::calculate_stddev;
pub use stochastic::{StochasticOutput, calculate_stochastic};

use std::fmt;

/// Averaging applied to gains/losses, true range and directional movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Smoothing {
    /// Trailing-window arithmetic mean.
    #[default]
    Simple,
    /// Seeded with the mean of the first full window, then
    /// `avg = (prev * (n - 1) + x) / n`.
    Wilder,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Stddev(usize),
    Atr(usize),
    Adx(usize),
    Cci(usize),
    VolumeMa(usize),
    RollingMax(usize),
    RollingMin(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
    Stochastic {
        k_period: usize,
        d_period: usize,
    },
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Stddev(period) => write!(f, "STDDEV({})", period),
            IndicatorType::Atr(period) => write!(f, "ATR({})", period),
            IndicatorType::Adx(period) => write!(f, "ADX({})", period),
            IndicatorType::Cci(period) => write!(f, "CCI({})", period),
            IndicatorType::VolumeMa(period) => write!(f, "VOLUME_MA({})", period),
            IndicatorType::RollingMax(period) => write!(f, "MAX({})", period),
            IndicatorType::RollingMin(period) => write!(f, "MIN({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
            IndicatorType::Stochastic { k_period, d_period } => {
                write!(f, "STOCHASTIC({},{})", k_period, d_period)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn new(indicator_type: IndicatorType, values: Vec<Option<f64>>) -> Self {
        Self {
            indicator_type,
            values,
        }
    }

    /// A series of `len` missing values.
    pub fn missing(indicator_type: IndicatorType, len: usize) -> Self {
        Self::new(indicator_type, vec![None; len])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`; out-of-range reads as missing.
    pub fn at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// Second-to-last value, used by crossover-style checks.
    pub fn previous(&self) -> Option<f64> {
        self.values
            .len()
            .checked_sub(2)
            .and_then(|index| self.at(index))
    }

    pub fn first_valid_index(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_type_display_sma() {
        assert_eq!(IndicatorType::Sma(20).to_string(), "SMA(20)");
    }

    #[test]
    fn indicator_type_display_macd() {
        let macd = IndicatorType::Macd {
            fast: 12,
            slow: 26,
            signal: 9,
        };
        assert_eq!(macd.to_string(), "MACD(12,26,9)");
    }

    #[test]
    fn indicator_type_display_bollinger() {
        let boll = IndicatorType::Bollinger {
            period: 20,
            stddev_mult_x100: 250,
        };
        assert_eq!(boll.to_string(), "BOLLINGER(20,2.5)");
    }

    #[test]
    fn indicator_type_display_stochastic() {
        let stoch = IndicatorType::Stochastic {
            k_period: 14,
            d_period: 3,
        };
        assert_eq!(stoch.to_string(), "STOCHASTIC(14,3)");
    }

    #[test]
    fn indicator_type_hash_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(IndicatorType::Rsi(14), "rsi14");
        map.insert(IndicatorType::Adx(14), "adx14");

        assert_eq!(map.get(&IndicatorType::Rsi(14)), Some(&"rsi14"));
        assert_eq!(map.get(&IndicatorType::Adx(14)), Some(&"adx14"));
        assert_eq!(map.get(&IndicatorType::Rsi(7)), None);
    }

    #[test]
    fn series_accessors() {
        let series = IndicatorSeries::new(
            IndicatorType::Sma(2),
            vec![None, Some(1.5), Some(2.5), Some(3.5)],
        );
        assert_eq!(series.len(), 4);
        assert_eq!(series.at(0), None);
        assert_eq!(series.at(1), Some(1.5));
        assert_eq!(series.at(99), None);
        assert_eq!(series.last(), Some(3.5));
        assert_eq!(series.previous(), Some(2.5));
        assert_eq!(series.first_valid_index(), Some(1));
        assert_eq!(series.valid_count(), 3);
    }

    #[test]
    fn missing_series_has_no_values() {
        let series = IndicatorSeries::missing(IndicatorType::Cci(20), 3);
        assert_eq!(series.len(), 3);
        assert_eq!(series.last(), None);
        assert_eq!(series.previous(), None);
        assert_eq!(series.first_valid_index(), None);
    }

    #[test]
    fn previous_on_short_series() {
        let series = IndicatorSeries::new(IndicatorType::Ema(3), vec![Some(1.0)]);
        assert_eq!(series.previous(), None);
        let empty = IndicatorSeries::new(IndicatorType::Ema(3), vec![]);
        assert!(empty.is_empty());
        assert_eq!(empty.last(), None);
    }

    #[test]
    fn smoothing_defaults_to_simple() {
        assert_eq!(Smoothing::default(), Smoothing::Simple);
    }
}
