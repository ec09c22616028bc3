//! Sampling interval and lookback window of a bar request.

use crate::domain::error::SignalError;
use chrono::Duration;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    Minute1,
    Minute5,
    Minute15,
    Minute30,
    Hour1,
    Day1,
    Week1,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Minute1 => "1m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Hour1 => "1h",
            Interval::Day1 => "1d",
            Interval::Week1 => "1wk",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" => Ok(Interval::Minute1),
            "5m" => Ok(Interval::Minute5),
            "15m" => Ok(Interval::Minute15),
            "30m" => Ok(Interval::Minute30),
            "1h" | "60m" => Ok(Interval::Hour1),
            "1d" => Ok(Interval::Day1),
            "1wk" | "1w" => Ok(Interval::Week1),
            _ => Err(SignalError::InvalidInterval(s.to_string())),
        }
    }
}

/// How far back from the most recent bar a request reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookback {
    Days(u32),
    Months(u32),
    Years(u32),
    Max,
}

impl Lookback {
    /// Calendar span covered, `None` for [`Lookback::Max`] or a span too
    /// large to represent (which covers every bar anyway).
    pub fn duration(&self) -> Option<Duration> {
        let days = match *self {
            Lookback::Days(n) => i64::from(n),
            Lookback::Months(n) => i64::from(n) * 365 / 12,
            Lookback::Years(n) => i64::from(n) * 365,
            Lookback::Max => return None,
        };
        Duration::try_days(days)
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookback::Days(n) => write!(f, "{}d", n),
            Lookback::Months(n) => write!(f, "{}mo", n),
            Lookback::Years(n) => write!(f, "{}y", n),
            Lookback::Max => f.write_str("max"),
        }
    }
}

impl FromStr for Lookback {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        if lowered == "max" {
            return Ok(Lookback::Max);
        }

        let invalid = || SignalError::InvalidLookback(s.to_string());
        let split = lowered
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (digits, unit) = lowered.split_at(split);
        let n: u32 = digits.parse().map_err(|_| invalid())?;
        if n == 0 {
            return Err(invalid());
        }

        match unit {
            "d" => Ok(Lookback::Days(n)),
            "mo" => Ok(Lookback::Months(n)),
            "y" => Ok(Lookback::Years(n)),
            _ => Err(invalid()),
        }
    }
}

/// What the data collaborator is asked for: one symbol's bars at `interval`
/// covering `lookback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub interval: Interval,
    pub lookback: Lookback,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self {
            interval: Interval::Day1,
            lookback: Lookback::Months(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_parses_dashboard_choices() {
        assert_eq!("1d".parse::<Interval>().unwrap(), Interval::Day1);
        assert_eq!("1h".parse::<Interval>().unwrap(), Interval::Hour1);
        assert_eq!("15m".parse::<Interval>().unwrap(), Interval::Minute15);
        assert_eq!(" 1WK ".parse::<Interval>().unwrap(), Interval::Week1);
    }

    #[test]
    fn interval_rejects_unknown() {
        assert!(matches!(
            "2h".parse::<Interval>(),
            Err(SignalError::InvalidInterval(s)) if s == "2h"
        ));
    }

    #[test]
    fn interval_display_round_trips() {
        for iv in [Interval::Minute5, Interval::Hour1, Interval::Day1] {
            assert_eq!(iv.to_string().parse::<Interval>().unwrap(), iv);
        }
    }

    #[test]
    fn lookback_parses_periods() {
        assert_eq!("3mo".parse::<Lookback>().unwrap(), Lookback::Months(3));
        assert_eq!("60d".parse::<Lookback>().unwrap(), Lookback::Days(60));
        assert_eq!("1y".parse::<Lookback>().unwrap(), Lookback::Years(1));
        assert_eq!("max".parse::<Lookback>().unwrap(), Lookback::Max);
    }

    #[test]
    fn lookback_rejects_garbage() {
        assert!("".parse::<Lookback>().is_err());
        assert!("mo".parse::<Lookback>().is_err());
        assert!("0d".parse::<Lookback>().is_err());
        assert!("6weeks".parse::<Lookback>().is_err());
        assert!("12".parse::<Lookback>().is_err());
    }

    #[test]
    fn lookback_duration() {
        assert_eq!(Lookback::Days(60).duration(), Some(Duration::days(60)));
        assert_eq!(Lookback::Months(6).duration(), Some(Duration::days(182)));
        assert_eq!(Lookback::Years(1).duration(), Some(Duration::days(365)));
        assert_eq!(Lookback::Max.duration(), None);
        assert_eq!(Lookback::Years(u32::MAX).duration(), None);
    }
}
