//! Consolidation pipeline.
//!
//! Orchestrates the full per-run computation: restrict the active roster to
//! its identifying columns, left-join admission, vacation, and termination
//! facts, drop excluded and ineligible ids, and run the proration and cost
//! allocation per remaining employee. Each employee is computed independently
//! as a pure transform into a [`BenefitRecord`]; the pipeline itself
//! guarantees no ordering of the output.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::calculation::{allocate, is_eligible, payable_days};
use crate::error::{EngineError, EngineResult};
use crate::exclusions::{self, ExclusionSet};
use crate::models::{BenefitRecord, Competency, DismissalNotice, EmployeeRecord, ProcessingStats};
use crate::rates::RateTables;
use crate::tables::{SourceKind, Table, TableSet, columns};

/// Everything one consolidation run produces.
#[derive(Debug, Clone)]
pub struct ConsolidationOutput {
    /// One record per eligible, non-excluded employee. Unordered; sorting is
    /// a presentation concern applied at export time.
    pub records: Vec<BenefitRecord>,
    /// Aggregate counters for the run.
    pub stats: ProcessingStats,
    /// The exclusion set, with category provenance for the audit export.
    pub exclusions: ExclusionSet,
}

/// Runs the consolidation over normalized source tables.
///
/// # Errors
///
/// Fatal conditions only: an absent active roster, absence of both rate
/// sources, or a duplicate registration id surviving into the output. All
/// other degradations fall back to defaults with warnings.
pub fn consolidate(
    tables: &TableSet,
    competency: &Competency,
) -> EngineResult<ConsolidationOutput> {
    let started = Instant::now();
    info!(competency = %competency.label(), "consolidating benefit base");

    let rates = RateTables::build(tables)?;
    let exclusions = exclusions::resolve(tables);
    let employees = collect_employees(tables)?;
    let roster_count = employees.len();

    let retained: Vec<&EmployeeRecord> = employees
        .iter()
        .filter(|employee| !exclusions.contains(&employee.registration_id))
        .collect();
    let excluded_count = roster_count - retained.len();
    info!(
        eligible_pool = retained.len(),
        excluded = excluded_count,
        "exclusions applied"
    );

    let mut records = Vec::with_capacity(retained.len());
    let mut seen = HashSet::with_capacity(retained.len());
    let mut ineligible = 0usize;

    for employee in retained {
        let Some(record) = benefit_record_for(employee, &rates, competency) else {
            ineligible += 1;
            continue;
        };
        if !seen.insert(record.registration_id.clone()) {
            return Err(EngineError::DuplicateKey {
                registration_id: record.registration_id,
            });
        }
        records.push(record);
    }

    if ineligible > 0 {
        info!(ineligible, "employees removed by the dismissal eligibility gate");
    }

    let stats = ProcessingStats::from_records(
        &records,
        excluded_count,
        started.elapsed().as_secs_f64(),
    );
    info!(
        records = stats.total_employees,
        total_days = stats.total_days,
        total_value = %stats.total_value,
        "consolidation complete"
    );

    Ok(ConsolidationOutput {
        records,
        stats,
        exclusions,
    })
}

/// Computes the benefit record for one employee, or `None` when the
/// dismissal eligibility gate removes them from the output entirely.
///
/// Pure per-employee transform: reads only the employee, the read-only rate
/// tables, and the competency period.
pub fn benefit_record_for(
    employee: &EmployeeRecord,
    rates: &RateTables,
    competency: &Competency,
) -> Option<BenefitRecord> {
    if !is_eligible(employee, competency) {
        return None;
    }

    let base_days = rates.working_days(&employee.union_name);
    let days = payable_days(base_days, employee, competency);
    let daily_rate = rates.daily_value(&employee.union_name);
    let split = allocate(days, daily_rate);

    Some(BenefitRecord {
        registration_id: employee.registration_id.clone(),
        union_name: employee.union_name.clone(),
        admission_date: employee
            .admission_date
            .map(format_date)
            .unwrap_or_default(),
        competency: competency.label(),
        payable_days: days,
        daily_rate,
        total_value: split.total,
        employer_cost: split.employer_cost,
        employee_deduction: split.employee_deduction,
        notes: build_notes(employee),
    })
}

/// Builds the joined employee records from the active roster and its
/// satellite sources.
fn collect_employees(tables: &TableSet) -> EngineResult<Vec<EmployeeRecord>> {
    let roster = tables.require(SourceKind::ActiveRoster)?;
    let admissions = admission_index(tables.get(SourceKind::Admissions));
    let vacations = vacation_index(tables.get(SourceKind::Vacations));
    let terminations = termination_index(tables.get(SourceKind::Terminations));

    let mut employees = Vec::with_capacity(roster.row_count());
    let mut blank_ids = 0usize;

    for row in 0..roster.row_count() {
        let registration_id = match roster.text(row, columns::REGISTRATION_ID) {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => {
                blank_ids += 1;
                continue;
            }
        };

        let (dismissal_date, dismissal_notice) = terminations
            .get(&registration_id)
            .cloned()
            .unwrap_or((None, DismissalNotice::Absent));

        employees.push(EmployeeRecord {
            union_name: roster.text(row, columns::UNION).unwrap_or_default().to_string(),
            job_title: roster
                .text(row, columns::JOB_TITLE)
                .unwrap_or_default()
                .to_string(),
            status_description: roster
                .text(row, columns::STATUS)
                .unwrap_or_default()
                .to_string(),
            admission_date: admissions.get(&registration_id).copied(),
            vacation_days: vacations.get(&registration_id).copied().unwrap_or(0),
            dismissal_date,
            dismissal_notice,
            registration_id,
        });
    }

    if blank_ids > 0 {
        warn!(blank_ids, "roster rows without a registration id skipped");
    }

    Ok(employees)
}

/// Admission date per registration id.
fn admission_index(table: Option<&Table>) -> HashMap<String, NaiveDate> {
    let Some(table) = table else {
        return HashMap::new();
    };
    (0..table.row_count())
        .filter_map(|row| {
            let id = table.text(row, columns::REGISTRATION_ID)?.to_string();
            let date = table.date(row, columns::ADMISSION_DATE)?;
            Some((id, date))
        })
        .collect()
}

/// Vacation day count per registration id; unparseable counts become 0.
fn vacation_index(table: Option<&Table>) -> HashMap<String, u32> {
    let Some(table) = table else {
        return HashMap::new();
    };
    (0..table.row_count())
        .filter_map(|row| {
            let id = table.text(row, columns::REGISTRATION_ID)?.to_string();
            let days = table
                .text(row, columns::VACATION_DAYS)
                .and_then(parse_count)
                .unwrap_or(0);
            Some((id, days))
        })
        .collect()
}

/// Dismissal date and notice flag per registration id.
fn termination_index(table: Option<&Table>) -> HashMap<String, (Option<NaiveDate>, DismissalNotice)> {
    let Some(table) = table else {
        return HashMap::new();
    };
    (0..table.row_count())
        .filter_map(|row| {
            let id = table.text(row, columns::REGISTRATION_ID)?.to_string();
            let date = table.date(row, columns::DISMISSAL_DATE);
            let notice = DismissalNotice::from_raw(table.text(row, columns::DISMISSAL_NOTICE));
            Some((id, (date, notice)))
        })
        .collect()
}

fn parse_count(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if let Ok(count) = trimmed.parse::<u32>() {
        return Some(count);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| *value >= 0.0)
        .map(|value| value as u32)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Human-readable summary of the facts that affected the calculation.
fn build_notes(employee: &EmployeeRecord) -> String {
    let mut parts = Vec::new();
    if employee.vacation_days > 0 {
        parts.push(format!("Vacation: {} days", employee.vacation_days));
    }
    if let Some(admission) = employee.admission_date {
        parts.push(format!("Admitted: {}", format_date(admission)));
    }
    if let Some(dismissal) = employee.dismissal_date {
        parts.push(format!("Dismissed: {}", format_date(dismissal)));
    }
    parts.join("; ")
}
