//! Competency period model.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The calendar month/year a benefit run is computed for.
///
/// The month is validated at construction; the year is deliberately not
/// range-checked.
///
/// # Example
///
/// ```
/// use benefit_engine::models::Competency;
/// use chrono::NaiveDate;
///
/// let competency = Competency::new(5, 2025).unwrap();
/// assert_eq!(competency.label(), "01/05/2025");
/// assert!(competency.contains(NaiveDate::from_ymd_opt(2025, 5, 16).unwrap()));
/// assert!(!competency.contains(NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competency {
    month: u32,
    year: i32,
}

impl Competency {
    /// Creates a competency period, rejecting months outside 1-12.
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidCompetency { month });
        }
        Ok(Self { month, year })
    }

    /// The competency month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The competency year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns true if the date falls within the competency month and year.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }

    /// The first day of the competency month, formatted `01/MM/YYYY`.
    pub fn label(&self) -> String {
        format!("01/{:02}/{}", self.month, self.year)
    }
}
