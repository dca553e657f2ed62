//! Employee model and related types.
//!
//! This module defines the [`EmployeeRecord`] struct assembled by the
//! consolidation pipeline from the active roster and its satellite sources,
//! plus the [`DismissalNotice`] tri-state flag.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The termination notice flag attached to a dismissal record.
///
/// The source column is free text; only the literal value `OK` (after
/// trimming and upper-casing) counts as a confirmed notice for the
/// eligibility gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissalNotice {
    /// No termination record exists for the employee.
    Absent,
    /// A termination record exists but the notice is not confirmed.
    Pending,
    /// The notice was confirmed (`OK`).
    Confirmed,
}

impl DismissalNotice {
    /// Interprets the raw notice cell from the terminations source.
    ///
    /// # Examples
    ///
    /// ```
    /// use benefit_engine::models::DismissalNotice;
    ///
    /// assert_eq!(DismissalNotice::from_raw(Some(" ok ")), DismissalNotice::Confirmed);
    /// assert_eq!(DismissalNotice::from_raw(Some("pendente")), DismissalNotice::Pending);
    /// assert_eq!(DismissalNotice::from_raw(None), DismissalNotice::Absent);
    /// ```
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.trim().eq_ignore_ascii_case("OK") => DismissalNotice::Confirmed,
            Some(value) if !value.trim().is_empty() => DismissalNotice::Pending,
            _ => DismissalNotice::Absent,
        }
    }

    /// Returns true if the notice was confirmed.
    pub fn is_confirmed(self) -> bool {
        self == DismissalNotice::Confirmed
    }
}

/// One active employee, joined with admission, vacation, and termination
/// facts, keyed by the normalized registration id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique registration id, trimmed and upper-cased.
    pub registration_id: String,
    /// Union name, trimmed and upper-cased; drives both the working-day
    /// count and, via region substring match, the daily benefit rate.
    pub union_name: String,
    /// Informational job title from the roster.
    pub job_title: String,
    /// Informational status description from the roster.
    pub status_description: String,
    /// Admission date, when the admissions source has a row for this id.
    pub admission_date: Option<NaiveDate>,
    /// Vacation days in the competency month; 0 when no vacation record
    /// exists.
    #[serde(default)]
    pub vacation_days: u32,
    /// Dismissal date, when the terminations source has a row for this id.
    pub dismissal_date: Option<NaiveDate>,
    /// Termination notice state.
    pub dismissal_notice: DismissalNotice,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee() -> EmployeeRecord {
        EmployeeRecord {
            registration_id: "EMP001".to_string(),
            union_name: "SINDPD SP".to_string(),
            job_title: "ANALISTA".to_string(),
            status_description: "Trabalhando".to_string(),
            admission_date: None,
            vacation_days: 0,
            dismissal_date: None,
            dismissal_notice: DismissalNotice::Absent,
        }
    }

    #[test]
    fn test_notice_from_raw_ok_is_confirmed() {
        assert_eq!(DismissalNotice::from_raw(Some("OK")), DismissalNotice::Confirmed);
        assert_eq!(DismissalNotice::from_raw(Some("ok")), DismissalNotice::Confirmed);
        assert_eq!(DismissalNotice::from_raw(Some("  OK  ")), DismissalNotice::Confirmed);
    }

    #[test]
    fn test_notice_from_raw_other_text_is_pending() {
        assert_eq!(
            DismissalNotice::from_raw(Some("aguardando")),
            DismissalNotice::Pending
        );
    }

    #[test]
    fn test_notice_from_raw_blank_is_absent() {
        assert_eq!(DismissalNotice::from_raw(None), DismissalNotice::Absent);
        assert_eq!(DismissalNotice::from_raw(Some("")), DismissalNotice::Absent);
        assert_eq!(DismissalNotice::from_raw(Some("   ")), DismissalNotice::Absent);
    }

    #[test]
    fn test_is_confirmed() {
        assert!(DismissalNotice::Confirmed.is_confirmed());
        assert!(!DismissalNotice::Pending.is_confirmed());
        assert!(!DismissalNotice::Absent.is_confirmed());
    }

    #[test]
    fn test_serialize_employee_round_trip() {
        let mut employee = create_test_employee();
        employee.admission_date = NaiveDate::from_ymd_opt(2025, 5, 16);
        employee.vacation_days = 5;

        let json = serde_json::to_string(&employee).unwrap();
        let deserialized: EmployeeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_deserialize_defaults_vacation_days_to_zero() {
        let json = r#"{
            "registration_id": "EMP002",
            "union_name": "SINDPD SP",
            "job_title": "ANALISTA",
            "status_description": "Trabalhando",
            "admission_date": null,
            "dismissal_date": null,
            "dismissal_notice": "absent"
        }"#;

        let employee: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(employee.vacation_days, 0);
    }
}
