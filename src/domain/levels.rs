//! Entry / target / stop price levels.
//!
//! The three levels travel together: a `PriceLevels` only exists when all of
//! them are positive and finite, so a result either carries a full set or
//! none at all.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLevels {
    entry: f64,
    target: f64,
    stop: f64,
}

impl PriceLevels {
    pub fn new(entry: f64, target: f64, stop: f64) -> Option<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(entry) && valid(target) && valid(stop) {
            Some(Self {
                entry,
                target,
                stop,
            })
        } else {
            None
        }
    }

    /// entry = close, target = close + target_mult × ATR, stop = close - stop_mult × ATR.
    pub fn from_atr(close: f64, atr: f64, target_mult: f64, stop_mult: f64) -> Option<Self> {
        Self::new(close, close + target_mult * atr, close - stop_mult * atr)
    }

    /// Fixed fractional offsets around the close, e.g. `0.05` for ±5%.
    pub fn from_percent(close: f64, target_pct: f64, stop_pct: f64) -> Option<Self> {
        Self::new(close, close * (1.0 + target_pct), close * (1.0 - stop_pct))
    }

    pub fn entry(&self) -> f64 {
        self.entry
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    /// Reward per unit of risk; `None` when entry and stop coincide.
    pub fn reward_to_risk(&self) -> Option<f64> {
        let risk = self.entry - self.stop;
        if risk == 0.0 {
            None
        } else {
            Some((self.target - self.entry) / risk)
        }
    }
}
