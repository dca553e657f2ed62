//! Monthly meal benefit consolidation engine.
//!
//! Consolidates the benefit base for one competency month from a set of
//! independently maintained HR spreadsheets: the active roster plus satellite
//! sources for admissions, terminations, leave, interns, apprentices,
//! overseas staff, vacations, and the two rate tables. The pipeline
//! normalizes the sources, removes excluded populations, prorates partial
//! months over a 30-day normalized month, splits each total 80/20 between
//! employer and employee, validates the result, and exports a workbook
//! report.
//!
//! # Example
//!
//! ```no_run
//! use benefit_engine::io::{ExcelReportExporter, ExcelTableLoader};
//! use benefit_engine::models::Competency;
//! use benefit_engine::runner;
//!
//! # fn main() -> benefit_engine::error::EngineResult<()> {
//! let loader = ExcelTableLoader::new("data");
//! let exporter = ExcelReportExporter::new("VR_Consolidado.xlsx");
//! let competency = Competency::new(5, 2025)?;
//! let outcome = runner::run(&loader, &exporter, &competency)?;
//! println!("{} records exported", outcome.records.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod consolidation;
pub mod error;
pub mod exclusions;
pub mod io;
pub mod models;
pub mod normalize;
pub mod rates;
pub mod runner;
pub mod summary;
pub mod tables;
pub mod validation;
