//! Calculation logic for the Benefit Consolidation Engine.
//!
//! This module contains the per-employee decision rules: the dismissal
//! eligibility gate, the payable-day proration, and the employer/employee
//! cost allocation.

mod allocation;
mod eligibility;
mod proration;

pub use allocation::{CostSplit, allocate, employee_share, employer_share};
pub use eligibility::{DISMISSAL_CUTOFF_DAY, is_eligible};
pub use proration::{NORMALIZED_MONTH_DAYS, payable_days};
