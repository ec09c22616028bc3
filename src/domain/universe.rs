//! Symbol universe for scans.
//!
//! Parses comma-separated symbol lists from configuration or the command line.

use std::collections::HashSet;

/// Scanned when neither the command line nor the config names any symbols.
pub const DEFAULT_UNIVERSE: &[&str] = &[
    "AAPL", "MSFT", "NVDA", "TSLA", "AMZN", "META", "KULR", "QQQ", "BTC-USD", "ETH-USD",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    pub symbols: Vec<String>,
}

impl Universe {
    pub fn parse(input: &str) -> Result<Self, UniverseError> {
        Ok(Self {
            symbols: parse_symbols(input)?,
        })
    }

    pub fn count(&self) -> usize {
        self.symbols.len()
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_UNIVERSE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),

    #[error("symbol list is empty")]
    Empty,
}

pub fn parse_symbols(input: &str) -> Result<Vec<String>, UniverseError> {
    if input.trim().is_empty() {
        return Err(UniverseError::Empty);
    }

    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(UniverseError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}
