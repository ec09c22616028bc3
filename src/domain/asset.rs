//! Asset-class heuristic from the ticker symbol alone.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetClass {
    Crypto,
    Etf,
    Stock,
}

impl AssetClass {
    /// `BTC-USD` style pairs are crypto, symbols ending in `Q` are treated
    /// as ETFs (QQQ, TQQQ, SQQQ), everything else is a stock.
    pub fn classify(symbol: &str) -> Self {
        let symbol = symbol.trim().to_uppercase();
        if symbol.contains("-USD") {
            AssetClass::Crypto
        } else if symbol.ends_with('Q') {
            AssetClass::Etf
        } else {
            AssetClass::Stock
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetClass::Crypto => "crypto",
            AssetClass::Etf => "ETF",
            AssetClass::Stock => "stock",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
