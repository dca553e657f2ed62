//! Dismissal eligibility gate.
//!
//! An employee whose termination notice is confirmed and whose dismissal
//! falls on or before the cutoff day of the competency month receives no
//! benefit at all for that month. Everyone else, including employees
//! dismissed after the cutoff, proceeds to the day-count calculation.

use chrono::Datelike;

use crate::models::{Competency, EmployeeRecord};

/// Last day of the month on which a confirmed dismissal removes the whole
/// benefit.
pub const DISMISSAL_CUTOFF_DAY: u32 = 15;

/// Decides whether an employee is payable at all for the competency period.
///
/// Returns `false` only when all three hold: the dismissal notice is
/// confirmed (`OK`), the dismissal date falls within the competency
/// month/year, and its day-of-month is at most [`DISMISSAL_CUTOFF_DAY`].
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::is_eligible;
/// use benefit_engine::models::{Competency, DismissalNotice, EmployeeRecord};
/// use chrono::NaiveDate;
///
/// let competency = Competency::new(5, 2025).unwrap();
/// let employee = EmployeeRecord {
///     registration_id: "EMP001".to_string(),
///     union_name: "SINDPD SP".to_string(),
///     job_title: String::new(),
///     status_description: String::new(),
///     admission_date: None,
///     vacation_days: 0,
///     dismissal_date: NaiveDate::from_ymd_opt(2025, 5, 10),
///     dismissal_notice: DismissalNotice::Confirmed,
/// };
/// assert!(!is_eligible(&employee, &competency));
/// ```
pub fn is_eligible(employee: &EmployeeRecord, competency: &Competency) -> bool {
    if !employee.dismissal_notice.is_confirmed() {
        return true;
    }
    match employee.dismissal_date {
        Some(dismissal) => {
            !(competency.contains(dismissal) && dismissal.day() <= DISMISSAL_CUTOFF_DAY)
        }
        None => true,
    }
}
