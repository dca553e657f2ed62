//! Source loading and report export.
//!
//! The engine core works on [`TableSet`]s and never touches the filesystem;
//! these traits are the seams where storage formats plug in. The shipped
//! implementations read and write Excel workbooks, matching the spreadsheets
//! the payroll team exchanges.

mod excel_read;
mod excel_write;

pub use excel_read::ExcelTableLoader;
pub use excel_write::ExcelReportExporter;

use crate::error::EngineResult;
use crate::exclusions::ExclusionSet;
use crate::models::{BenefitRecord, ProcessingStats};
use crate::summary::UnionSummary;
use crate::tables::TableSet;

/// Loads the raw source tables for one consolidation run.
pub trait TableLoader {
    /// Reads every source it can find. Missing optional sources are simply
    /// absent from the returned set; only I/O level failures are errors.
    fn load(&self) -> EngineResult<TableSet>;
}

/// Writes the consolidated report somewhere.
pub trait ReportExporter {
    /// Exports the records together with the per-union summary, run
    /// statistics, and the exclusion audit.
    fn export(
        &self,
        records: &[BenefitRecord],
        summary: &[UnionSummary],
        stats: &ProcessingStats,
        exclusions: &ExclusionSet,
    ) -> EngineResult<()>;
}
