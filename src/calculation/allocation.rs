//! Cost allocation: the fixed 80/20 employer/employee split.

use rust_decimal::Decimal;

/// The employer's share of the total benefit value.
pub fn employer_share() -> Decimal {
    Decimal::new(8, 1) // 0.8
}

/// The employee's share of the total benefit value.
pub fn employee_share() -> Decimal {
    Decimal::new(2, 1) // 0.2
}

/// The outcome of a cost allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostSplit {
    /// `payable_days * daily_rate`, rounded to 2 decimal places.
    pub total: Decimal,
    /// 80% of the unrounded total, rounded to 2 decimal places.
    pub employer_cost: Decimal,
    /// 20% of the unrounded total, rounded to 2 decimal places.
    pub employee_deduction: Decimal,
}

/// Converts payable days and a daily rate into the total value and its
/// employer/employee split.
///
/// All three amounts are rounded to 2 decimal places independently from the
/// unrounded total. The shares are not re-derived from the rounded total,
/// which is why the validator checks the recombination with a 0.01 tolerance
/// instead of exact equality.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::allocate;
/// use rust_decimal::Decimal;
///
/// let split = allocate(22, Decimal::new(3750, 2)); // 22 days at 37.50
/// assert_eq!(split.total, Decimal::new(82500, 2));
/// assert_eq!(split.employer_cost, Decimal::new(66000, 2));
/// assert_eq!(split.employee_deduction, Decimal::new(16500, 2));
/// ```
pub fn allocate(payable_days: i64, daily_rate: Decimal) -> CostSplit {
    let raw_total = Decimal::from(payable_days) * daily_rate;
    CostSplit {
        total: raw_total.round_dp(2),
        employer_cost: (raw_total * employer_share()).round_dp(2),
        employee_deduction: (raw_total * employee_share()).round_dp(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// CA-001: exact split for a round total
    #[test]
    fn test_split_for_round_total() {
        let split = allocate(22, dec("35.00"));
        assert_eq!(split.total, dec("770.00"));
        assert_eq!(split.employer_cost, dec("616.00"));
        assert_eq!(split.employee_deduction, dec("154.00"));
    }

    /// CA-002: shares come from the unrounded total
    #[test]
    fn test_shares_derived_from_unrounded_total() {
        // 3 * 33.333 = 99.999; employer = 79.9992 -> 80.00
        let split = allocate(3, dec("33.333"));
        assert_eq!(split.total, dec("100.00"));
        assert_eq!(split.employer_cost, dec("80.00"));
        assert_eq!(split.employee_deduction, dec("20.00"));
    }

    #[test]
    fn test_zero_days_allocates_nothing() {
        let split = allocate(0, dec("37.50"));
        assert_eq!(split.total, Decimal::ZERO);
        assert_eq!(split.employer_cost, Decimal::ZERO);
        assert_eq!(split.employee_deduction, Decimal::ZERO);
    }

    #[test]
    fn test_shares_sum_to_one() {
        assert_eq!(employer_share() + employee_share(), Decimal::ONE);
    }

    proptest! {
        /// For any plausible day count and rate, the rounded shares
        /// recombine to the rounded total within the 0.01 tolerance.
        #[test]
        fn prop_split_recombines_within_tolerance(
            days in 0i64..=31,
            cents in 0i64..=50_000,
        ) {
            let rate = Decimal::new(cents, 2);
            let split = allocate(days, rate);
            let drift = (split.employer_cost + split.employee_deduction - split.total).abs();
            prop_assert!(drift <= Decimal::new(1, 2));
        }
    }
}
