#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use signalscore::domain::bar_series::BarSeries;
use signalscore::domain::error::SignalError;
pub use signalscore::domain::ohlcv::OhlcvBar;
use signalscore::domain::timeframe::{FetchRequest, Interval};
use signalscore::ports::data_port::DataPort;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        _request: &FetchRequest,
    ) -> Result<Vec<OhlcvBar>, SignalError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(SignalError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn list_symbols(&self, _interval: Interval) -> Result<Vec<String>, SignalError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn day(index: usize) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::days(index as i64)
}

/// One daily bar per close, high/low half a point either side, constant volume.
pub fn bars_from_closes(closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar {
            timestamp: day(i),
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
            volume: 1000,
        })
        .collect()
}

/// Same as [`bars_from_closes`] with the final bar's volume replaced.
pub fn bars_with_last_volume(closes: &[f64], last_volume: u64) -> Vec<OhlcvBar> {
    let mut bars = bars_from_closes(closes);
    if let Some(last) = bars.last_mut() {
        last.volume = last_volume;
    }
    bars
}

/// Bars with no movement at all: open, high, low and close identical.
pub fn flat_bars(n: usize, price: f64) -> Vec<OhlcvBar> {
    (0..n)
        .map(|i| OhlcvBar {
            timestamp: day(i),
            open: price,
            high: price,
            low: price,
            close: price,
            volume: 1000,
        })
        .collect()
}

pub fn make_series(symbol: &str, bars: Vec<OhlcvBar>) -> BarSeries {
    BarSeries::new(symbol, Interval::Day1, bars).unwrap()
}

pub fn rising(n: usize) -> Vec<f64> {
    (1..=n).map(|i| i as f64).collect()
}

/// Writes bars in the on-disk layout the CSV adapter reads.
pub fn write_csv(dir: &Path, symbol: &str, interval: Interval, bars: &[OhlcvBar]) {
    let path = dir.join(format!("{}_{}.csv", symbol, interval));
    let mut file = std::fs::File::create(path).unwrap();
    writeln!(file, "date,open,high,low,close,volume").unwrap();
    for bar in bars {
        writeln!(
            file,
            "{},{},{},{},{},{}",
            bar.timestamp.format("%Y-%m-%d"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        )
        .unwrap();
    }
}
