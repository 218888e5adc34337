//! Report output port trait.

use std::path::Path;

use crate::domain::error::DivvyError;
use crate::domain::report::ReportData;

/// Port for writing report artifacts (dashboard build, CSV export).
pub trait ReportPort {
    fn write(&self, report: &ReportData, output_path: &Path) -> Result<(), DivvyError>;
}
