//! Market data port trait.

use crate::domain::error::SignalError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::timeframe::{FetchRequest, Interval};

pub trait DataPort {
    /// Bars for `symbol`, oldest first, covering the request's lookback.
    /// An empty vector means the source knows nothing about the symbol.
    fn fetch_bars(&self, symbol: &str, request: &FetchRequest)
    -> Result<Vec<OhlcvBar>, SignalError>;

    fn list_symbols(&self, interval: Interval) -> Result<Vec<String>, SignalError>;
}
