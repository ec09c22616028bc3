//! Plain-text report adapter implementing ReportPort.
//!
//! Writes aligned, human-readable summaries to any `Write` sink; the CLI
//! passes stdout, tests pass a `Vec<u8>`.

use crate::domain::analysis::Analysis;
use crate::domain::error::SignalError;
use crate::domain::scan::ScanReport;
use crate::domain::scoring::{EvaluationResult, MAX_SCORE};
use crate::ports::report_port::ReportPort;
use std::io::Write;

pub struct TextReportAdapter<W: Write> {
    out: W,
}

impl<W: Write> TextReportAdapter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_result(&mut self, result: &EvaluationResult) -> Result<(), SignalError> {
        writeln!(
            self.out,
            "  {:<10} {:>3} / {}",
            result.strategy().as_str(),
            result.score(),
            MAX_SCORE
        )?;
        for reason in result.rationale() {
            writeln!(self.out, "    - {}", reason)?;
        }
        if let Some(levels) = result.levels() {
            write!(
                self.out,
                "    entry {:.2}  target {:.2}  stop {:.2}",
                levels.entry(),
                levels.target(),
                levels.stop()
            )?;
            match levels.reward_to_risk() {
                Some(rr) => writeln!(self.out, "  R/R {:.2}", rr)?,
                None => writeln!(self.out)?,
            }
        }
        Ok(())
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

impl<W: Write> ReportPort for TextReportAdapter<W> {
    fn write_analysis(&mut self, analysis: &Analysis) -> Result<(), SignalError> {
        writeln!(
            self.out,
            "=== {} ({}, {}) ===",
            analysis.symbol, analysis.asset_class, analysis.interval
        )?;
        writeln!(
            self.out,
            "Last bar:       {} close {:.2} ({} bars)",
            analysis.last_timestamp.format("%Y-%m-%d %H:%M"),
            analysis.last_close,
            analysis.bars
        )?;
        writeln!(
            self.out,
            "Score:          {} / {} ({})",
            analysis.score, MAX_SCORE, analysis.recommendation
        )?;
        writeln!(self.out, "Buy signal:     {}", yes_no(analysis.buy_signal))?;
        writeln!(self.out)?;

        for result in &analysis.results {
            self.write_result(result)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn write_scan(&mut self, report: &ScanReport) -> Result<(), SignalError> {
        writeln!(
            self.out,
            "=== Scan: {} ({} symbols, {} hits) ===",
            report.strategy,
            report.scanned,
            report.hits.len()
        )?;

        if report.hits.is_empty() {
            writeln!(self.out, "No symbols above threshold")?;
        } else {
            writeln!(
                self.out,
                "{:<10} {:>5} {:>12} {:>12} {:>12}",
                "Symbol", "Score", "Entry", "Target", "Stop"
            )?;
            for hit in &report.hits {
                let fmt = |v: Option<f64>| v.map(|x| format!("{:.2}", x)).unwrap_or_else(|| "-".into());
                writeln!(
                    self.out,
                    "{:<10} {:>5} {:>12} {:>12} {:>12}",
                    hit.symbol,
                    hit.result.score(),
                    fmt(hit.result.entry_price()),
                    fmt(hit.result.target_price()),
                    fmt(hit.result.stop_price())
                )?;
            }
        }

        if !report.skipped.is_empty() {
            writeln!(self.out, "\nSkipped:")?;
            for skipped in &report.skipped {
                writeln!(self.out, "  {}: {}", skipped.symbol, skipped.reason)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregator::Recommendation;
    use crate::domain::asset::AssetClass;
    use crate::domain::levels::PriceLevels;
    use crate::domain::scan::{ScanHit, SkipReason, SkippedSymbol};
    use crate::domain::scoring::ScoreCard;
    use crate::domain::strategy::StrategyKind;
    use crate::domain::timeframe::Interval;
    use chrono::NaiveDate;

    fn result(points: i32, levels: Option<PriceLevels>) -> EvaluationResult {
        let mut card = ScoreCard::new();
        card.add(points != 0, points, "ADX above 25");
        card.finish(StrategyKind::Swing, levels)
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut TextReportAdapter<Vec<u8>>) -> Result<(), SignalError>,
    {
        let mut adapter = TextReportAdapter::new(Vec::new());
        f(&mut adapter).unwrap();
        String::from_utf8(adapter.into_inner()).unwrap()
    }

    #[test]
    fn analysis_report_lists_results() {
        let analysis = Analysis {
            symbol: "KULR".into(),
            interval: Interval::Day1,
            asset_class: AssetClass::Stock,
            bars: 63,
            last_timestamp: NaiveDate::from_ymd_opt(2024, 6, 3)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            last_close: 1.5,
            results: vec![result(25, PriceLevels::new(1.5, 1.59, 1.44))],
            score: 25,
            recommendation: Recommendation::Caution,
            buy_signal: false,
        };
        let text = render(|a| a.write_analysis(&analysis));
        assert!(text.starts_with("=== KULR (stock, 1d) ==="));
        assert!(text.contains("Score:          25 / 100 (caution)"));
        assert!(text.contains("Buy signal:     no"));
        assert!(text.contains("  swing       25 / 100"));
        assert!(text.contains("    - ADX above 25 (+25)"));
        assert!(text.contains("entry 1.50  target 1.59  stop 1.44  R/R 1.50"));
    }

    #[test]
    fn flat_levels_omit_reward_to_risk() {
        let analysis = Analysis {
            symbol: "FLAT".into(),
            interval: Interval::Day1,
            asset_class: AssetClass::Stock,
            bars: 40,
            last_timestamp: NaiveDate::from_ymd_opt(2024, 6, 3)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            last_close: 10.0,
            results: vec![result(0, PriceLevels::from_atr(10.0, 0.0, 2.0, 1.5))],
            score: 0,
            recommendation: Recommendation::Caution,
            buy_signal: false,
        };
        let text = render(|a| a.write_analysis(&analysis));
        assert!(text.contains("entry 10.00  target 10.00  stop 10.00\n"));
        assert!(!text.contains("R/R"));
    }

    #[test]
    fn scan_report_table_and_skips() {
        let report = ScanReport {
            strategy: StrategyKind::Swing,
            scanned: 3,
            hits: vec![ScanHit {
                symbol: "AAPL".into(),
                result: result(50, PriceLevels::from_percent(200.0, 0.05, 0.05)),
            }],
            skipped: vec![SkippedSymbol {
                symbol: "ZZZ".into(),
                reason: SkipReason::Unavailable("instrument data unavailable for ZZZ".into()),
            }],
        };
        let text = render(|a| a.write_scan(&report));
        assert!(text.contains("=== Scan: swing (3 symbols, 1 hits) ==="));
        assert!(text.contains("AAPL"));
        assert!(text.contains("210.00"));
        assert!(text.contains("190.00"));
        assert!(text.contains("  ZZZ: unavailable: instrument data unavailable for ZZZ"));
    }

    #[test]
    fn empty_scan_says_so() {
        let report = ScanReport {
            strategy: StrategyKind::Day,
            scanned: 2,
            hits: Vec::new(),
            skipped: Vec::new(),
        };
        let text = render(|a| a.write_scan(&report));
        assert!(text.contains("No symbols above threshold"));
        assert!(!text.contains("Skipped"));
    }
}
