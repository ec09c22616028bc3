//! Domain error types.
//!
//! Insufficient history and degenerate arithmetic are deliberately absent:
//! they surface as "insufficient data" results and missing indicator values.

use crate::domain::universe::UniverseError;

/// Top-level error type for signalscore.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("bar series is empty")]
    EmptySeries,

    #[error("invalid bar at index {index}: {reason}")]
    InvalidBar { index: usize, reason: String },

    #[error("timestamps not strictly increasing at index {index}")]
    NonMonotonicTimestamps { index: usize },

    #[error("instrument data unavailable for {symbol}")]
    UnavailableInstrument { symbol: String },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("invalid interval: {0}")]
    InvalidInterval(String),

    #[error("invalid lookback period: {0}")]
    InvalidLookback(String),

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SignalError {
    pub(crate) fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        SignalError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&SignalError> for std::process::ExitCode {
    fn from(err: &SignalError) -> Self {
        let code: u8 = match err {
            SignalError::Io(_) => 1,
            SignalError::ConfigParse { .. }
            | SignalError::ConfigInvalid { .. }
            | SignalError::InvalidInterval(_)
            | SignalError::InvalidLookback(_) => 2,
            SignalError::DataSource { .. } => 3,
            SignalError::UnknownStrategy(_) | SignalError::Universe(_) => 4,
            SignalError::EmptySeries
            | SignalError::InvalidBar { .. }
            | SignalError::NonMonotonicTimestamps { .. }
            | SignalError::UnavailableInstrument { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
