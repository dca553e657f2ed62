//! Record normalization.
//!
//! Standardizes identifiers and date fields across the heterogeneous source
//! tables so they can be joined: identifier and union columns are trimmed and
//! upper-cased (keeping numeric-looking ids as text), and date columns are
//! parsed with day-before-month precedence. Unparseable dates become missing
//! values, counted per source/column and logged as data-quality warnings,
//! never a fatal failure. No record is dropped at this stage.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::tables::{Cell, SourceKind, Table, TableSet, columns};

/// Sources whose registration-id column must be normalized.
const ID_SOURCES: [SourceKind; 8] = [
    SourceKind::ActiveRoster,
    SourceKind::Admissions,
    SourceKind::Terminations,
    SourceKind::Leave,
    SourceKind::Interns,
    SourceKind::Apprentices,
    SourceKind::Overseas,
    SourceKind::Vacations,
];

/// Sources whose union column must be normalized for consistent lookups.
const UNION_SOURCES: [SourceKind; 2] = [SourceKind::ActiveRoster, SourceKind::WorkingDays];

/// Date columns subject to day-first parsing.
const DATE_COLUMNS: [(SourceKind, &str); 2] = [
    (SourceKind::Admissions, columns::ADMISSION_DATE),
    (SourceKind::Terminations, columns::DISMISSAL_DATE),
];

/// Count of unparseable date values for one source column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDateCount {
    /// The source table the column belongs to.
    pub source: SourceKind,
    /// The date column name.
    pub column: String,
    /// How many non-empty values failed to parse.
    pub count: usize,
}

/// Data-quality summary produced by [`normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Unparseable date counts, one entry per source column that had any.
    pub invalid_dates: Vec<InvalidDateCount>,
}

/// Parses a date string with day-before-month precedence.
///
/// Accepts the separator and padding variants seen in the source workbooks;
/// ISO dates are recognised as a fallback.
///
/// # Examples
///
/// ```
/// use benefit_engine::normalize::parse_date_day_first;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2025, 5, 9).unwrap();
/// assert_eq!(parse_date_day_first("09/05/2025"), Some(expected));
/// assert_eq!(parse_date_day_first("9/5/2025"), Some(expected));
/// assert_eq!(parse_date_day_first("2025-05-09"), Some(expected));
/// assert_eq!(parse_date_day_first("not a date"), None);
/// ```
pub fn parse_date_day_first(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    const FORMATS: [&str; 4] = ["%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y", "%Y-%m-%d"];
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Normalizes all source tables in place and reports data-quality counts.
///
/// Returns the normalized table set together with a [`NormalizeReport`]; the
/// report is also surfaced as log warnings, one per affected source column.
pub fn normalize(mut tables: TableSet) -> (TableSet, NormalizeReport) {
    let mut report = NormalizeReport::default();

    for kind in ID_SOURCES {
        if let Some(table) = tables.get_mut(kind) {
            uppercase_column(table, columns::REGISTRATION_ID);
        }
    }

    for kind in UNION_SOURCES {
        if let Some(table) = tables.get_mut(kind) {
            uppercase_column(table, columns::UNION);
        }
    }

    for (kind, column) in DATE_COLUMNS {
        let Some(table) = tables.get_mut(kind) else {
            continue;
        };
        let total = table.row_count();
        let invalid = parse_date_column(table, column);
        if invalid > 0 {
            warn!(
                source = %kind,
                column,
                invalid,
                total,
                "unparseable dates coerced to missing"
            );
            report.invalid_dates.push(InvalidDateCount {
                source: kind,
                column: column.to_string(),
                count: invalid,
            });
        }
    }

    debug!(sources = tables.len(), "normalization complete");
    (tables, report)
}

/// Trims and upper-cases every text cell of a column.
fn uppercase_column(table: &mut Table, column: &str) {
    table.update_column(column, |cell| match cell.text() {
        Some(text) => Cell::Text(text.trim().to_uppercase()),
        None => cell.clone(),
    });
}

/// Parses a text column into dates, returning the unparseable count.
///
/// Cells already holding dates pass through untouched; non-empty text that
/// fails to parse becomes [`Cell::Empty`].
fn parse_date_column(table: &mut Table, column: &str) -> usize {
    let mut invalid = 0;
    table.update_column(column, |cell| match cell {
        Cell::Text(text) => match parse_date_day_first(text) {
            Some(date) => Cell::Date(date),
            None => {
                if !text.trim().is_empty() {
                    invalid += 1;
                }
                Cell::Empty
            }
        },
        other => other.clone(),
    });
    invalid
}
