//! Per-union aggregation of consolidated records.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::BenefitRecord;

/// Aggregated totals for one union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionSummary {
    /// The union the rows were grouped under.
    pub union_name: String,
    /// Number of records in the group.
    pub employee_count: usize,
    /// Sum of payable days across the group.
    pub total_days: i64,
    /// Sum of total benefit value across the group.
    pub total_value: Decimal,
    /// Sum of the employer share across the group.
    pub employer_cost: Decimal,
    /// Sum of the employee share across the group.
    pub employee_deduction: Decimal,
    /// Mean daily rate over the group's records, rounded to 2 decimal places.
    pub mean_daily_rate: Decimal,
    /// Mean total value per employee, rounded to 2 decimal places.
    pub mean_value_per_employee: Decimal,
}

/// Groups records by union and computes per-group totals and means.
///
/// The result is sorted by total value descending, then union name ascending
/// as the tie-break, so the most expensive unions lead the report.
pub fn summarize(records: &[BenefitRecord]) -> Vec<UnionSummary> {
    let mut groups: HashMap<&str, Vec<&BenefitRecord>> = HashMap::new();
    for record in records {
        groups.entry(record.union_name.as_str()).or_default().push(record);
    }

    let mut summaries: Vec<UnionSummary> = groups
        .into_iter()
        .map(|(union_name, group)| summarize_group(union_name, &group))
        .collect();

    summaries.sort_by(|a, b| {
        b.total_value
            .cmp(&a.total_value)
            .then_with(|| a.union_name.cmp(&b.union_name))
    });
    summaries
}

fn summarize_group(union_name: &str, group: &[&BenefitRecord]) -> UnionSummary {
    let count = Decimal::from(group.len());
    let total_value: Decimal = group.iter().map(|record| record.total_value).sum();
    let rate_sum: Decimal = group.iter().map(|record| record.daily_rate).sum();

    UnionSummary {
        union_name: union_name.to_string(),
        employee_count: group.len(),
        total_days: group.iter().map(|record| record.payable_days).sum(),
        total_value,
        employer_cost: group.iter().map(|record| record.employer_cost).sum(),
        employee_deduction: group.iter().map(|record| record.employee_deduction).sum(),
        mean_daily_rate: (rate_sum / count).round_dp(2),
        mean_value_per_employee: (total_value / count).round_dp(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(id: &str, union_name: &str, days: i64, rate: &str, total: &str) -> BenefitRecord {
        let total = dec(total);
        BenefitRecord {
            registration_id: id.to_string(),
            union_name: union_name.to_string(),
            admission_date: String::new(),
            competency: "01/05/2025".to_string(),
            payable_days: days,
            daily_rate: dec(rate),
            total_value: total,
            employer_cost: (total * dec("0.8")).round_dp(2),
            employee_deduction: (total * dec("0.2")).round_dp(2),
            notes: String::new(),
        }
    }

    #[test]
    fn test_groups_by_union_with_totals() {
        let records = vec![
            record("EMP001", "SINDPD SP", 22, "37.50", "825.00"),
            record("EMP002", "SINDPD SP", 11, "37.50", "412.50"),
            record("EMP003", "SINDPPD RS", 21, "35.00", "735.00"),
        ];
        let summaries = summarize(&records);
        assert_eq!(summaries.len(), 2);

        let sp = &summaries[0];
        assert_eq!(sp.union_name, "SINDPD SP");
        assert_eq!(sp.employee_count, 2);
        assert_eq!(sp.total_days, 33);
        assert_eq!(sp.total_value, dec("1237.50"));
        assert_eq!(sp.employer_cost, dec("990.00"));
        assert_eq!(sp.employee_deduction, dec("247.50"));
        assert_eq!(sp.mean_daily_rate, dec("37.50"));
        assert_eq!(sp.mean_value_per_employee, dec("618.75"));

        assert_eq!(summaries[1].union_name, "SINDPPD RS");
    }

    #[test]
    fn test_sorted_by_total_value_descending() {
        let records = vec![
            record("EMP001", "SMALL", 10, "35.00", "350.00"),
            record("EMP002", "BIG", 22, "37.50", "825.00"),
        ];
        let summaries = summarize(&records);
        assert_eq!(summaries[0].union_name, "BIG");
        assert_eq!(summaries[1].union_name, "SMALL");
    }

    #[test]
    fn test_equal_totals_break_ties_by_name() {
        let records = vec![
            record("EMP001", "ZULU", 22, "35.00", "770.00"),
            record("EMP002", "ALFA", 22, "35.00", "770.00"),
        ];
        let summaries = summarize(&records);
        assert_eq!(summaries[0].union_name, "ALFA");
        assert_eq!(summaries[1].union_name, "ZULU");
    }

    #[test]
    fn test_mean_rounds_to_two_places() {
        let records = vec![
            record("EMP001", "SINDPD SP", 22, "35.00", "770.00"),
            record("EMP002", "SINDPD SP", 22, "35.00", "770.00"),
            record("EMP003", "SINDPD SP", 22, "35.01", "770.22"),
        ];
        let summaries = summarize(&records);
        // 105.01 / 3 = 35.003...
        assert_eq!(summaries[0].mean_daily_rate, dec("35.00"));
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(summarize(&[]).is_empty());
    }
}
