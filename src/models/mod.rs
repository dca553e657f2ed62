//! Data models for the Benefit Consolidation Engine.

mod benefit_record;
mod competency;
mod employee;
mod stats;

pub use benefit_record::BenefitRecord;
pub use competency::Competency;
pub use employee::{DismissalNotice, EmployeeRecord};
pub use stats::ProcessingStats;
