//! In-memory table representation and the source registry.
//!
//! The engine consumes ten independently maintained spreadsheets. Each one is
//! represented as a [`Table`] of named columns over rows of loosely typed
//! [`Cell`]s, and a run's worth of sources is held in a [`TableSet`] keyed by
//! [`SourceKind`]. A source that could not be loaded is simply absent from
//! the set; [`TableSet::require`] turns absence of a mandatory source into a
//! fatal error.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};

/// Column names of the external spreadsheet contract.
///
/// These names are fixed by the upstream workbooks; renaming a column there
/// requires updating this map.
pub mod columns {
    /// Registration id column, present in almost every source.
    pub const REGISTRATION_ID: &str = "MATRICULA";
    /// Union name column on the active roster and working-days sources.
    pub const UNION: &str = "SINDICATO";
    /// Job title column on the active roster.
    pub const JOB_TITLE: &str = "TITULO DO CARGO";
    /// Status description column on the active roster.
    pub const STATUS: &str = "DESC. SITUACAO";
    /// Admission date column on the admissions source.
    pub const ADMISSION_DATE: &str = "Admissão";
    /// Dismissal date column on the terminations source.
    pub const DISMISSAL_DATE: &str = "DATA DEMISSÃO";
    /// Dismissal notice flag column on the terminations source.
    pub const DISMISSAL_NOTICE: &str = "COMUNICADO DE DESLIGAMENTO";
    /// Vacation day count column on the vacation source.
    pub const VACATION_DAYS: &str = "DIAS DE FÉRIAS";
    /// Working day count column on the working-days source.
    pub const WORKING_DAYS: &str = "DIAS UTEIS";
    /// Region name column on the rate source.
    pub const REGION: &str = "ESTADO";
    /// Daily benefit value column on the rate source.
    pub const DAILY_VALUE: &str = "VALOR";
}

/// Identifies one of the ten named source tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Active-employee roster. Mandatory.
    ActiveRoster,
    /// Employees admitted during (or near) the competency period.
    Admissions,
    /// Terminated employees with dismissal dates and notice flags.
    Terminations,
    /// Employees on leave.
    Leave,
    /// Intern roster.
    Interns,
    /// Apprentice roster.
    Apprentices,
    /// Overseas staff roster.
    Overseas,
    /// Vacation day counts per employee.
    Vacations,
    /// Working days per union for the competency month.
    WorkingDays,
    /// Daily benefit value per region.
    RegionRates,
}

impl SourceKind {
    /// All source kinds, in loading order.
    pub const ALL: [SourceKind; 10] = [
        SourceKind::ActiveRoster,
        SourceKind::Admissions,
        SourceKind::Terminations,
        SourceKind::Leave,
        SourceKind::Interns,
        SourceKind::Apprentices,
        SourceKind::Overseas,
        SourceKind::Vacations,
        SourceKind::WorkingDays,
        SourceKind::RegionRates,
    ];

    /// A human-readable label used in logs and error messages.
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::ActiveRoster => "active roster (ATIVOS)",
            SourceKind::Admissions => "admissions (ADMISSÃO)",
            SourceKind::Terminations => "terminations (DESLIGADOS)",
            SourceKind::Leave => "leave (AFASTAMENTOS)",
            SourceKind::Interns => "interns (ESTÁGIO)",
            SourceKind::Apprentices => "apprentices (APRENDIZ)",
            SourceKind::Overseas => "overseas (EXTERIOR)",
            SourceKind::Vacations => "vacation days (FÉRIAS)",
            SourceKind::WorkingDays => "working days by union (Base dias uteis)",
            SourceKind::RegionRates => "daily value by region (Base sindicato x valor)",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single table cell.
///
/// Source spreadsheets are only loosely typed: identifiers may look numeric,
/// dates may arrive as text. Cells therefore carry either raw text or an
/// already-parsed date; the normalizer upgrades text to dates where the
/// column's contract says so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// No value.
    Empty,
    /// A textual value, including numeric-looking identifiers.
    Text(String),
    /// A parsed calendar date.
    Date(NaiveDate),
}

impl Cell {
    /// Returns the text content, if this cell holds text.
    pub fn text(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the date content, if this cell holds a date.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true for [`Cell::Empty`] and for whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(value) => value.trim().is_empty(),
            Cell::Date(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(value) => f.write_str(value),
            Cell::Date(value) => write!(f, "{}", value.format("%d/%m/%Y")),
        }
    }
}

/// A table with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table with the given column names.
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    /// The column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns true if the table has a column with the given name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// The number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the cell at a row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Shorthand for the text content of a cell.
    pub fn text(&self, row: usize, column: &str) -> Option<&str> {
        self.cell(row, column)?.text()
    }

    /// Shorthand for the date content of a cell.
    pub fn date(&self, row: usize, column: &str) -> Option<NaiveDate> {
        self.cell(row, column)?.date()
    }

    /// Applies a transformation to every cell of a column.
    ///
    /// Does nothing if the column does not exist; optional columns on
    /// optional sources are a data-quality concern, not an error.
    pub fn update_column<F>(&mut self, column: &str, mut f: F)
    where
        F: FnMut(&Cell) -> Cell,
    {
        let Some(idx) = self.column_index(column) else {
            return;
        };
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
    }
}

/// The set of source tables for one run, keyed by [`SourceKind`].
///
/// Absent sources are simply not present; the exclusion resolver and rate
/// builder degrade to defaults, while [`TableSet::require`] makes absence of
/// a mandatory source fatal.
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    tables: HashMap<SourceKind, Table>,
}

impl TableSet {
    /// Creates an empty table set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) a source table.
    pub fn insert(&mut self, kind: SourceKind, table: Table) {
        self.tables.insert(kind, table);
    }

    /// Returns a source table, if it was loaded.
    pub fn get(&self, kind: SourceKind) -> Option<&Table> {
        self.tables.get(&kind)
    }

    /// Returns a mutable source table, if it was loaded.
    pub fn get_mut(&mut self, kind: SourceKind) -> Option<&mut Table> {
        self.tables.get_mut(&kind)
    }

    /// Returns true if the source was loaded.
    pub fn contains(&self, kind: SourceKind) -> bool {
        self.tables.contains_key(&kind)
    }

    /// The number of loaded sources.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if no sources were loaded.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns a mandatory source table, or `MissingRequiredSource`.
    pub fn require(&self, kind: SourceKind) -> EngineResult<&Table> {
        self.get(kind).ok_or_else(|| EngineError::MissingRequiredSource {
            name: kind.label().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let mut table = Table::new(vec![columns::REGISTRATION_ID, columns::UNION]);
        table.push_row(vec![
            Cell::Text("emp001".to_string()),
            Cell::Text("SINDPD SP".to_string()),
        ]);
        table.push_row(vec![Cell::Text("emp002".to_string())]);
        table
    }

    #[test]
    fn test_push_row_pads_short_rows() {
        let table = sample_table();
        assert_eq!(table.cell(1, columns::UNION), Some(&Cell::Empty));
    }

    #[test]
    fn test_cell_lookup_by_column_name() {
        let table = sample_table();
        assert_eq!(table.text(0, columns::UNION), Some("SINDPD SP"));
        assert_eq!(table.text(0, "MISSING"), None);
    }

    #[test]
    fn test_update_column_transforms_every_row() {
        let mut table = sample_table();
        table.update_column(columns::REGISTRATION_ID, |cell| match cell.text() {
            Some(text) => Cell::Text(text.to_uppercase()),
            None => cell.clone(),
        });
        assert_eq!(table.text(0, columns::REGISTRATION_ID), Some("EMP001"));
        assert_eq!(table.text(1, columns::REGISTRATION_ID), Some("EMP002"));
    }

    #[test]
    fn test_update_column_ignores_missing_column() {
        let mut table = sample_table();
        table.update_column("NO SUCH COLUMN", |_| Cell::Empty);
        assert_eq!(table.text(0, columns::REGISTRATION_ID), Some("emp001"));
    }

    #[test]
    fn test_cell_is_empty_for_blank_text() {
        assert!(Cell::Empty.is_empty());
        assert!(Cell::Text("   ".to_string()).is_empty());
        assert!(!Cell::Text("x".to_string()).is_empty());
        assert!(!Cell::Date(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()).is_empty());
    }

    #[test]
    fn test_cell_display_formats_dates_day_first() {
        let cell = Cell::Date(NaiveDate::from_ymd_opt(2025, 5, 9).unwrap());
        assert_eq!(cell.to_string(), "09/05/2025");
    }

    #[test]
    fn test_require_returns_missing_source_error() {
        let tables = TableSet::new();
        let result = tables.require(SourceKind::ActiveRoster);
        match result {
            Err(EngineError::MissingRequiredSource { name }) => {
                assert!(name.contains("ATIVOS"));
            }
            other => panic!("Expected MissingRequiredSource, got {:?}", other),
        }
    }

    #[test]
    fn test_require_returns_loaded_table() {
        let mut tables = TableSet::new();
        tables.insert(SourceKind::ActiveRoster, sample_table());
        assert!(tables.require(SourceKind::ActiveRoster).is_ok());
        assert!(tables.contains(SourceKind::ActiveRoster));
        assert_eq!(tables.len(), 1);
    }

    #[test]
    fn test_source_kind_labels_are_distinct() {
        let mut labels: Vec<&str> = SourceKind::ALL.iter().map(|k| k.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), SourceKind::ALL.len());
    }
}
