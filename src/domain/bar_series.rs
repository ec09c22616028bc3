//! Validated, immutable bar series for one instrument.
//!
//! All validation happens here, once: indicator functions downstream take the
//! plain `&[f64]` columns produced by [`BarSeries::column`] and never re-check
//! their inputs.

use crate::domain::error::SignalError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::timeframe::Interval;

/// A price column that can be drawn out of a [`BarSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceColumn {
    Open,
    High,
    Low,
    Close,
    Volume,
    Typical,
}

#[derive(Debug, Clone)]
pub struct BarSeries {
    symbol: String,
    interval: Interval,
    bars: Vec<OhlcvBar>,
}

impl BarSeries {
    pub fn new(
        symbol: impl Into<String>,
        interval: Interval,
        bars: Vec<OhlcvBar>,
    ) -> Result<Self, SignalError> {
        if bars.is_empty() {
            return Err(SignalError::EmptySeries);
        }

        for (index, bar) in bars.iter().enumerate() {
            bar.validate()
                .map_err(|reason| SignalError::InvalidBar { index, reason })?;
            if index > 0 && bar.timestamp <= bars[index - 1].timestamp {
                return Err(SignalError::NonMonotonicTimestamps { index });
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            interval,
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> &OhlcvBar {
        // non-empty by construction
        &self.bars[self.bars.len() - 1]
    }

    pub fn last_close(&self) -> f64 {
        self.last().close
    }

    pub fn column(&self, column: PriceColumn) -> Vec<f64> {
        self.bars
            .iter()
            .map(|b| match column {
                PriceColumn::Open => b.open,
                PriceColumn::High => b.high,
                PriceColumn::Low => b.low,
                PriceColumn::Close => b.close,
                PriceColumn::Volume => b.volume as f64,
                PriceColumn::Typical => b.typical_price(),
            })
            .collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.column(PriceColumn::Close)
    }
}
