//! Settings loaded from configuration.
//!
//! Every value is validated here so the rest of the program works with typed,
//! in-range settings. Absent keys fall back to defaults; present but
//! malformed keys are errors.

use crate::domain::aggregator::TierThresholds;
use crate::domain::analysis::StrategySelection;
use crate::domain::error::SignalError;
use crate::domain::scan::ScanOptions;
use crate::domain::scoring::MAX_SCORE;
use crate::domain::strategy::{StrategyKind, StrategySettings, WeightTable};
use crate::domain::timeframe::FetchRequest;
use crate::domain::universe::parse_symbols;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub request: FetchRequest,
    pub selection: StrategySelection,
    pub thresholds: TierThresholds,
    /// `None` when the config names no symbols.
    pub scan_symbols: Option<Vec<String>>,
    pub scan_options: ScanOptions,
    pub strategies: StrategySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            request: FetchRequest::default(),
            selection: StrategySelection::default(),
            thresholds: TierThresholds::default(),
            scan_symbols: None,
            scan_options: ScanOptions::default(),
            strategies: StrategySettings::default(),
        }
    }
}

pub fn load_settings(config: &dyn ConfigPort) -> Result<Settings, SignalError> {
    let defaults = Settings::default();

    let data_dir = config
        .get_string("data", "dir")
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or(defaults.data_dir);

    let request = FetchRequest {
        interval: parse_or(config, "data", "interval", defaults.request.interval)?,
        lookback: parse_or(config, "data", "period", defaults.request.lookback)?,
    };

    let selection = parse_or(config, "analysis", "strategy", defaults.selection)?;

    let strong_buy = score_or(config, "analysis", "strong_buy", defaults.thresholds.strong_buy)?;
    let watch = score_or(config, "analysis", "watch", defaults.thresholds.watch)?;
    let thresholds = TierThresholds::new(strong_buy, watch)?;

    let scan_symbols = match config.get_string("scan", "symbols") {
        Some(list) if !list.trim().is_empty() => Some(parse_symbols(&list)?),
        _ => None,
    };
    let scan_options = ScanOptions {
        threshold: score_or(config, "scan", "threshold", defaults.scan_options.threshold)?,
        target_pct: fraction_or(config, "scan", "target_pct", defaults.scan_options.target_pct)?,
        stop_pct: fraction_or(config, "scan", "stop_pct", defaults.scan_options.stop_pct)?,
    };

    let strategies = StrategySettings {
        day: load_weights(config, StrategyKind::Day)?,
        swing: load_weights(config, StrategyKind::Swing)?,
        position: load_weights(config, StrategyKind::Position)?,
        composite: load_weights(config, StrategyKind::Composite)?,
    };

    Ok(Settings {
        data_dir,
        request,
        selection,
        thresholds,
        scan_symbols,
        scan_options,
        strategies,
    })
}

fn parse_or<T>(config: &dyn ConfigPort, section: &str, key: &str, default: T) -> Result<T, SignalError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match config.get_string(section, key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| SignalError::config_invalid(section, key, e.to_string())),
    }
}

fn score_or(config: &dyn ConfigPort, section: &str, key: &str, default: u8) -> Result<u8, SignalError> {
    let value: i64 = parse_or(config, section, key, i64::from(default))?;
    if !(0..=i64::from(MAX_SCORE)).contains(&value) {
        return Err(SignalError::config_invalid(
            section,
            key,
            format!("{key} must be between 0 and {MAX_SCORE}"),
        ));
    }
    Ok(value as u8)
}

fn fraction_or(config: &dyn ConfigPort, section: &str, key: &str, default: f64) -> Result<f64, SignalError> {
    let value: f64 = parse_or(config, section, key, default)?;
    if !(value > 0.0 && value < 1.0) {
        return Err(SignalError::config_invalid(
            section,
            key,
            format!("{key} must be between 0 and 1 (exclusive)"),
        ));
    }
    Ok(value)
}

fn load_weights<W: WeightTable + Default>(
    config: &dyn ConfigPort,
    kind: StrategyKind,
) -> Result<W, SignalError> {
    let section = kind.as_str();
    let mut weights = W::default();
    let mut keys = config.keys(section);
    keys.sort();

    for key in keys {
        let Some(raw) = config.get_string(section, &key) else {
            continue;
        };
        let points: i32 = raw.trim().parse().map_err(|_| {
            SignalError::config_invalid(section, &key, format!("{key} must be an integer"))
        })?;
        if points.unsigned_abs() > u32::from(MAX_SCORE) {
            return Err(SignalError::config_invalid(
                section,
                &key,
                format!("{key} must be between -{MAX_SCORE} and {MAX_SCORE}"),
            ));
        }
        if !weights.set(&key, points) {
            return Err(SignalError::config_invalid(
                section,
                &key,
                format!("unknown condition, expected one of: {}", W::keys().join(", ")),
            ));
        }
    }
    Ok(weights)
}
