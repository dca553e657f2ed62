//! Processing statistics snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BenefitRecord;

/// Aggregate counters for one consolidation run.
///
/// Computed once after consolidation; an immutable snapshot, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStats {
    /// Number of employees in the consolidated output.
    pub total_employees: usize,
    /// Sum of payable days across all records.
    pub total_days: i64,
    /// Sum of total benefit values.
    pub total_value: Decimal,
    /// Sum of employer cost shares.
    pub employer_cost: Decimal,
    /// Sum of employee deductions.
    pub employee_deduction: Decimal,
    /// Number of roster ids removed by the exclusion set.
    pub excluded_count: usize,
    /// Wall-clock duration of the consolidation, in seconds.
    pub elapsed_seconds: f64,
}

impl ProcessingStats {
    /// Builds the snapshot from the consolidated records.
    pub fn from_records(records: &[BenefitRecord], excluded_count: usize, elapsed_seconds: f64) -> Self {
        Self {
            total_employees: records.len(),
            total_days: records.iter().map(|r| r.payable_days).sum(),
            total_value: records.iter().map(|r| r.total_value).sum(),
            employer_cost: records.iter().map(|r| r.employer_cost).sum(),
            employee_deduction: records.iter().map(|r| r.employee_deduction).sum(),
            excluded_count,
            elapsed_seconds,
        }
    }
}
