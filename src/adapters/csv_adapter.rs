//! CSV file data adapter.
//!
//! Reads `{SYMBOL}_{interval}.csv` files from a base directory, one bar per
//! row with a header of `date,open,high,low,close,volume`. Dates are either
//! `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`. The lookback is measured back from
//! the newest bar in the file, not from the wall clock.
//!
//! Also writes the chart export: closes, Bollinger bands and level lines.

use crate::domain::bar_series::BarSeries;
use crate::domain::error::SignalError;
use crate::domain::indicator::bollinger::{DEFAULT_PERIOD, DEFAULT_STDDEV_MULT};
use crate::domain::indicator::calculate_bollinger;
use crate::domain::levels::PriceLevels;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::timeframe::{FetchRequest, Interval};
use crate::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, interval: Interval) -> PathBuf {
        self.base_path
            .join(format!("{}_{}.csv", symbol.to_uppercase(), interval))
    }
}

fn source_error(reason: impl Into<String>) -> SignalError {
    SignalError::DataSource {
        reason: reason.into(),
    }
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, SignalError> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .or_else(|_| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT).map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|e| source_error(format!("invalid date '{}': {}", raw, e)))
}

fn parse_field(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, SignalError> {
    record
        .get(index)
        .ok_or_else(|| source_error(format!("missing {} column", name)))?
        .trim()
        .parse()
        .map_err(|e| source_error(format!("invalid {} value: {}", name, e)))
}

fn parse_volume(record: &csv::StringRecord) -> Result<u64, SignalError> {
    let value = parse_field(record, 5, "volume")?;
    if !value.is_finite() || value < 0.0 {
        return Err(source_error(format!("invalid volume value: {}", value)));
    }
    Ok(value.round() as u64)
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        request: &FetchRequest,
    ) -> Result<Vec<OhlcvBar>, SignalError> {
        let path = self.csv_path(symbol, request.interval);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SignalError::UnavailableInstrument {
                    symbol: symbol.to_string(),
                });
            }
            Err(e) => {
                return Err(source_error(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| source_error(format!("CSV parse error: {}", e)))?;

            let timestamp = parse_timestamp(
                record
                    .get(0)
                    .ok_or_else(|| source_error("missing date column"))?,
            )?;

            bars.push(OhlcvBar {
                timestamp,
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: parse_volume(&record)?,
            });
        }

        bars.sort_by_key(|b| b.timestamp);

        // a cutoff before the earliest representable date keeps every bar
        let cutoff = request
            .lookback
            .duration()
            .zip(bars.last())
            .and_then(|(span, newest)| newest.timestamp.checked_sub_signed(span));
        if let Some(cutoff) = cutoff {
            bars.retain(|b| b.timestamp >= cutoff);
        }

        log::debug!("{}: read {} bars from {}", symbol, bars.len(), path.display());
        Ok(bars)
    }

    fn list_symbols(&self, interval: Interval) -> Result<Vec<String>, SignalError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            source_error(format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let suffix = format!("_{}.csv", interval);
        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| source_error(format!("directory entry error: {}", e)))?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(symbol) = name_str.strip_suffix(&suffix) {
                if !symbol.is_empty() {
                    symbols.push(symbol.to_string());
                }
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}

/// Writes one row per bar: timestamp, close, Bollinger upper/middle/lower and
/// the entry/target/stop lines. Missing values are left empty.
pub fn write_indicator_csv<W: Write>(
    writer: W,
    series: &BarSeries,
    levels: Option<&PriceLevels>,
) -> Result<(), SignalError> {
    let closes = series.closes();
    let bands = calculate_bollinger(&closes, DEFAULT_PERIOD, DEFAULT_STDDEV_MULT);

    let mut wtr = csv::Writer::from_writer(writer);
    let csv_err = |e: csv::Error| source_error(format!("CSV write error: {}", e));

    wtr.write_record([
        "timestamp", "close", "bb_upper", "bb_middle", "bb_lower", "entry", "target", "stop",
    ])
    .map_err(csv_err)?;

    let cell = |v: Option<f64>| v.map(|x| format!("{:.4}", x)).unwrap_or_default();

    for (i, bar) in series.bars().iter().enumerate() {
        wtr.write_record([
            bar.timestamp.format(DATETIME_FORMAT).to_string(),
            format!("{:.4}", bar.close),
            cell(bands.upper.at(i)),
            cell(bands.middle.at(i)),
            cell(bands.lower.at(i)),
            cell(levels.map(|l| l.entry())),
            cell(levels.map(|l| l.target())),
            cell(levels.map(|l| l.stop())),
        ])
        .map_err(csv_err)?;
    }

    wtr.flush()?;
    Ok(())
}
