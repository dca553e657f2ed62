//! Benefit record model: the engine's output row.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One consolidated benefit payout row for an eligible employee.
///
/// `payable_days` is signed so the validator's negative-days check is a real
/// check over records produced outside the proration engine; the engine
/// itself never emits a negative count.
///
/// # Example
///
/// ```
/// use benefit_engine::models::BenefitRecord;
/// use rust_decimal::Decimal;
///
/// let record = BenefitRecord {
///     registration_id: "EMP001".to_string(),
///     union_name: "SINDPD SP".to_string(),
///     admission_date: String::new(),
///     competency: "01/05/2025".to_string(),
///     payable_days: 22,
///     daily_rate: Decimal::new(3750, 2),
///     total_value: Decimal::new(82500, 2),
///     employer_cost: Decimal::new(66000, 2),
///     employee_deduction: Decimal::new(16500, 2),
///     notes: String::new(),
/// };
/// assert_eq!(record.employer_cost + record.employee_deduction, record.total_value);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitRecord {
    /// Unique registration id.
    pub registration_id: String,
    /// The employee's union name.
    pub union_name: String,
    /// Admission date formatted `DD/MM/YYYY`, or empty when none applies.
    pub admission_date: String,
    /// First day of the competency month, formatted `01/MM/YYYY`.
    pub competency: String,
    /// Number of days the employee is compensated for.
    pub payable_days: i64,
    /// The daily benefit rate resolved for the employee's region.
    pub daily_rate: Decimal,
    /// `payable_days * daily_rate`, rounded to 2 decimal places.
    pub total_value: Decimal,
    /// Employer share (80% of the total), rounded to 2 decimal places.
    pub employer_cost: Decimal,
    /// Employee share (20% of the total), rounded to 2 decimal places.
    pub employee_deduction: Decimal,
    /// Free-text summary of the vacation/admission/dismissal facts that
    /// affected the calculation.
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_record() -> BenefitRecord {
        BenefitRecord {
            registration_id: "EMP001".to_string(),
            union_name: "SINDPD SP".to_string(),
            admission_date: "16/05/2025".to_string(),
            competency: "01/05/2025".to_string(),
            payable_days: 11,
            daily_rate: dec("37.50"),
            total_value: dec("412.50"),
            employer_cost: dec("330.00"),
            employee_deduction: dec("82.50"),
            notes: "Admitted: 16/05/2025".to_string(),
        }
    }

    #[test]
    fn test_serialize_round_trip() {
        let record = create_test_record();
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: BenefitRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_decimal_fields_serialize_as_strings() {
        let record = create_test_record();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"daily_rate\":\"37.50\""));
        assert!(json.contains("\"total_value\":\"412.50\""));
    }
}
