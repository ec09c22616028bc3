//! Maps scores onto recommendation tiers and folds several strategy results
//! into one number.

use crate::domain::error::SignalError;
use crate::domain::scoring::{EvaluationResult, MAX_SCORE};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    StrongBuy,
    Watch,
    Caution,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "strong buy",
            Recommendation::Watch => "watch",
            Recommendation::Caution => "caution",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive lower bounds for the upper two tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierThresholds {
    pub strong_buy: u8,
    pub watch: u8,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            strong_buy: 70,
            watch: 40,
        }
    }
}

impl TierThresholds {
    pub fn new(strong_buy: u8, watch: u8) -> Result<Self, SignalError> {
        if strong_buy > MAX_SCORE {
            return Err(SignalError::config_invalid(
                "analysis",
                "strong_buy",
                format!("must be at most {MAX_SCORE}, got {strong_buy}"),
            ));
        }
        if watch > strong_buy {
            return Err(SignalError::config_invalid(
                "analysis",
                "watch",
                format!("must not exceed strong_buy ({strong_buy}), got {watch}"),
            ));
        }
        Ok(Self { strong_buy, watch })
    }

    pub fn classify(&self, score: u8) -> Recommendation {
        if score >= self.strong_buy {
            Recommendation::StrongBuy
        } else if score >= self.watch {
            Recommendation::Watch
        } else {
            Recommendation::Caution
        }
    }
}

/// Rounded mean score across results; 0 for none.
pub fn combine(results: &[EvaluationResult]) -> u8 {
    if results.is_empty() {
        return 0;
    }
    let sum: u32 = results.iter().map(|r| u32::from(r.score())).sum();
    let mean = f64::from(sum) / results.len() as f64;
    mean.round().min(f64::from(MAX_SCORE)) as u8
}
