//! Post-consolidation data quality checks.
//!
//! The validator runs a fixed battery of six checks over the consolidated
//! records and reports one finding per check. A check that passes still
//! produces a [`Severity::Info`] finding, so the report always has six
//! entries and reads the same from run to run. The validator never mutates
//! the records; surfacing problems is the export pipeline's call to make.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::BenefitRecord;

/// Maximum tolerated drift between the recombined split and the total.
pub fn split_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Records worth more than this are flagged as outliers.
pub fn outlier_value_threshold() -> Decimal {
    Decimal::new(3_000, 0)
}

/// Records covering more than this many days are flagged as outliers.
pub const OUTLIER_DAYS_THRESHOLD: i64 = 30;

/// How bad a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The check passed.
    Info,
    /// Suspicious but not disqualifying.
    Warning,
    /// The output should not be trusted.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// The outcome of one validation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    /// Severity of the finding.
    pub severity: Severity,
    /// What the check verified, phrased as a result.
    pub message: String,
    /// How many records the finding covers. Zero when the check passes.
    pub affected_count: usize,
    /// Sample of affected registration ids, when the check tracks them.
    pub detail: Option<String>,
}

impl ValidationFinding {
    fn passed(message: &str) -> Self {
        ValidationFinding {
            severity: Severity::Info,
            message: message.to_string(),
            affected_count: 0,
            detail: None,
        }
    }

    fn flagged(severity: Severity, message: String, affected: &[&str]) -> Self {
        ValidationFinding {
            severity,
            message,
            affected_count: affected.len(),
            detail: Some(sample_ids(affected)),
        }
    }
}

/// Runs all six checks and returns one finding per check, in a fixed order.
pub fn validate(records: &[BenefitRecord]) -> Vec<ValidationFinding> {
    vec![
        check_negative_days(records),
        check_zero_value(records),
        check_split_drift(records),
        check_duplicate_ids(records),
        check_outliers(records),
        check_missing_fields(records),
    ]
}

/// A report passes when no finding is an error.
pub fn passed(findings: &[ValidationFinding]) -> bool {
    findings
        .iter()
        .all(|finding| finding.severity != Severity::Error)
}

fn check_negative_days(records: &[BenefitRecord]) -> ValidationFinding {
    let affected: Vec<&str> = records
        .iter()
        .filter(|record| record.payable_days < 0)
        .map(|record| record.registration_id.as_str())
        .collect();
    if affected.is_empty() {
        return ValidationFinding::passed("No records with negative payable days");
    }
    ValidationFinding::flagged(
        Severity::Error,
        format!("{} record(s) with negative payable days", affected.len()),
        &affected,
    )
}

fn check_zero_value(records: &[BenefitRecord]) -> ValidationFinding {
    let affected: Vec<&str> = records
        .iter()
        .filter(|record| record.payable_days > 0 && record.total_value <= Decimal::ZERO)
        .map(|record| record.registration_id.as_str())
        .collect();
    if affected.is_empty() {
        return ValidationFinding::passed("No payable records with a non-positive total");
    }
    ValidationFinding::flagged(
        Severity::Error,
        format!(
            "{} record(s) with payable days but a non-positive total",
            affected.len()
        ),
        &affected,
    )
}

fn check_split_drift(records: &[BenefitRecord]) -> ValidationFinding {
    let tolerance = split_tolerance();
    let affected: Vec<&str> = records
        .iter()
        .filter(|record| {
            let drift = record.employer_cost + record.employee_deduction - record.total_value;
            drift.abs() > tolerance
        })
        .map(|record| record.registration_id.as_str())
        .collect();
    if affected.is_empty() {
        return ValidationFinding::passed("Cost split recombines within tolerance for all records");
    }
    ValidationFinding::flagged(
        Severity::Error,
        format!(
            "{} record(s) where employer cost plus deduction drifts from the total by more than {}",
            affected.len(),
            tolerance
        ),
        &affected,
    )
}

fn check_duplicate_ids(records: &[BenefitRecord]) -> ValidationFinding {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.registration_id.as_str()).or_insert(0) += 1;
    }
    let mut affected: Vec<&str> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id)
        .collect();
    affected.sort_unstable();
    if affected.is_empty() {
        return ValidationFinding::passed("All registration ids are unique");
    }
    ValidationFinding::flagged(
        Severity::Error,
        format!("{} duplicated registration id(s)", affected.len()),
        &affected,
    )
}

fn check_outliers(records: &[BenefitRecord]) -> ValidationFinding {
    let value_threshold = outlier_value_threshold();
    let affected: Vec<&str> = records
        .iter()
        .filter(|record| {
            record.total_value > value_threshold || record.payable_days > OUTLIER_DAYS_THRESHOLD
        })
        .map(|record| record.registration_id.as_str())
        .collect();
    if affected.is_empty() {
        return ValidationFinding::passed("No outlier values or day counts");
    }
    ValidationFinding::flagged(
        Severity::Warning,
        format!(
            "{} record(s) above {} total or {} days",
            affected.len(),
            value_threshold,
            OUTLIER_DAYS_THRESHOLD
        ),
        &affected,
    )
}

fn check_missing_fields(records: &[BenefitRecord]) -> ValidationFinding {
    let affected: Vec<&str> = records
        .iter()
        .filter(|record| {
            record.registration_id.trim().is_empty()
                || record.union_name.trim().is_empty()
                || record.competency.trim().is_empty()
        })
        .map(|record| record.registration_id.as_str())
        .collect();
    if affected.is_empty() {
        return ValidationFinding::passed("All required fields populated");
    }
    ValidationFinding::flagged(
        Severity::Warning,
        format!(
            "{} record(s) missing a registration id, union, or competency",
            affected.len()
        ),
        &affected,
    )
}

const SAMPLE_LIMIT: usize = 5;

fn sample_ids(ids: &[&str]) -> String {
    let shown: Vec<&str> = ids.iter().take(SAMPLE_LIMIT).copied().collect();
    if ids.len() > SAMPLE_LIMIT {
        format!("{} (+{} more)", shown.join(", "), ids.len() - SAMPLE_LIMIT)
    } else {
        shown.join(", ")
    }
}
