//! Report output port trait.

use crate::domain::analysis::Analysis;
use crate::domain::error::SignalError;
use crate::domain::scan::ScanReport;

pub trait ReportPort {
    fn write_analysis(&mut self, analysis: &Analysis) -> Result<(), SignalError>;

    fn write_scan(&mut self, report: &ScanReport) -> Result<(), SignalError>;
}
