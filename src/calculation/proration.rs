//! Payable-day proration.
//!
//! Starting from the union's working-day count minus vacation days, an
//! admission or dismissal inside the competency month *overrides* the result
//! with a 30-day-normalized proportion. The overrides replace the
//! vacation-adjusted count rather than subtracting from it; an employee
//! admitted mid-month is assumed to have no vacation days yet in that month.

use chrono::Datelike;

use crate::models::{Competency, EmployeeRecord};

/// Length of the normalized month used for proration, regardless of the
/// actual calendar month length.
pub const NORMALIZED_MONTH_DAYS: i64 = 30;

/// Computes the payable day count for an eligible employee.
///
/// Evaluation order:
/// 1. `base_days - vacation_days`
/// 2. admission inside the competency month overrides with
///    `floor(base_days * (30 - admission_day + 1) / 30)`
/// 3. otherwise a dismissal inside the competency month overrides with
///    `floor(base_days * dismissal_day / 30)`
/// 4. the result is clamped to a minimum of 0
///
/// The admission and dismissal branches are mutually exclusive; when both
/// dates fall inside the month, admission wins.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::payable_days;
/// use benefit_engine::models::{Competency, DismissalNotice, EmployeeRecord};
/// use chrono::NaiveDate;
///
/// let competency = Competency::new(5, 2025).unwrap();
/// let employee = EmployeeRecord {
///     registration_id: "EMP001".to_string(),
///     union_name: "SINDPD SP".to_string(),
///     job_title: String::new(),
///     status_description: String::new(),
///     admission_date: NaiveDate::from_ymd_opt(2025, 5, 16),
///     vacation_days: 0,
///     dismissal_date: None,
///     dismissal_notice: DismissalNotice::Absent,
/// };
/// // floor(22 * (30 - 16 + 1) / 30) = floor(22 * 15 / 30) = 11
/// assert_eq!(payable_days(22, &employee, &competency), 11);
/// ```
pub fn payable_days(base_days: u32, employee: &EmployeeRecord, competency: &Competency) -> i64 {
    let base = i64::from(base_days);
    let mut days = base - i64::from(employee.vacation_days);

    let admission_in_month = employee
        .admission_date
        .filter(|date| competency.contains(*date));
    let dismissal_in_month = employee
        .dismissal_date
        .filter(|date| competency.contains(*date));

    if let Some(admission) = admission_in_month {
        let remaining = NORMALIZED_MONTH_DAYS - i64::from(admission.day()) + 1;
        days = base * remaining.max(0) / NORMALIZED_MONTH_DAYS;
    } else if let Some(dismissal) = dismissal_in_month {
        days = base * i64::from(dismissal.day()) / NORMALIZED_MONTH_DAYS;
    }

    days.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DismissalNotice;
    use chrono::NaiveDate;

    fn employee(
        vacation_days: u32,
        admission_date: Option<NaiveDate>,
        dismissal_date: Option<NaiveDate>,
    ) -> EmployeeRecord {
        EmployeeRecord {
            registration_id: "EMP001".to_string(),
            union_name: "SINDPD SP".to_string(),
            job_title: "ANALISTA".to_string(),
            status_description: "Trabalhando".to_string(),
            admission_date,
            vacation_days,
            dismissal_date,
            dismissal_notice: DismissalNotice::Absent,
        }
    }

    fn competency() -> Competency {
        Competency::new(5, 2025).unwrap()
    }

    /// PR-001: plain month, no events
    #[test]
    fn test_base_days_without_events() {
        assert_eq!(payable_days(22, &employee(0, None, None), &competency()), 22);
    }

    /// PR-002: vacation days are subtracted
    #[test]
    fn test_vacation_days_subtracted() {
        assert_eq!(payable_days(22, &employee(5, None, None), &competency()), 17);
    }

    /// PR-003: admission on the 16th of a 22-day month yields 11
    #[test]
    fn test_admission_proration_boundary() {
        let employee = employee(0, NaiveDate::from_ymd_opt(2025, 5, 16), None);
        assert_eq!(payable_days(22, &employee, &competency()), 11);
    }

    /// PR-004: admission override replaces the vacation subtraction
    #[test]
    fn test_admission_overrides_vacation_subtraction() {
        let with_vacation = employee(10, NaiveDate::from_ymd_opt(2025, 5, 16), None);
        let without_vacation = employee(0, NaiveDate::from_ymd_opt(2025, 5, 16), None);
        assert_eq!(
            payable_days(22, &with_vacation, &competency()),
            payable_days(22, &without_vacation, &competency())
        );
    }

    /// PR-005: dismissal on day 16 yields floor(22 * 16 / 30) = 11
    #[test]
    fn test_dismissal_proration() {
        let employee = employee(0, None, NaiveDate::from_ymd_opt(2025, 5, 16));
        assert_eq!(payable_days(22, &employee, &competency()), 11);
    }

    #[test]
    fn test_admission_on_first_day_pays_full_base() {
        let employee = employee(0, NaiveDate::from_ymd_opt(2025, 5, 1), None);
        // floor(22 * 30 / 30) = 22
        assert_eq!(payable_days(22, &employee, &competency()), 22);
    }

    #[test]
    fn test_admission_on_day_31_yields_zero() {
        let employee = employee(0, NaiveDate::from_ymd_opt(2025, 5, 31), None);
        assert_eq!(payable_days(22, &employee, &competency()), 0);
    }

    #[test]
    fn test_admission_outside_competency_month_is_ignored() {
        let employee = employee(3, NaiveDate::from_ymd_opt(2025, 4, 16), None);
        assert_eq!(payable_days(22, &employee, &competency()), 19);
    }

    #[test]
    fn test_admission_wins_over_dismissal_in_same_month() {
        let employee = employee(
            0,
            NaiveDate::from_ymd_opt(2025, 5, 10),
            NaiveDate::from_ymd_opt(2025, 5, 28),
        );
        // Admission branch: floor(22 * 21 / 30) = 15, not the dismissal's
        // floor(22 * 28 / 30) = 20.
        assert_eq!(payable_days(22, &employee, &competency()), 15);
    }

    #[test]
    fn test_excess_vacation_clamps_to_zero() {
        assert_eq!(payable_days(20, &employee(25, None, None), &competency()), 0);
    }

    #[test]
    fn test_zero_base_days() {
        let employee = employee(0, NaiveDate::from_ymd_opt(2025, 5, 16), None);
        assert_eq!(payable_days(0, &employee, &competency()), 0);
    }
}
