//! Excel workbook loader for the ten source spreadsheets.

use std::path::{Path, PathBuf};

use calamine::{DataType, Reader, Xlsx, open_workbook};
use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};

use crate::error::EngineResult;
use crate::tables::{Cell, SourceKind, Table, TableSet};

use super::TableLoader;

/// Fixed workbook filename per source, as the payroll team names them.
const FILE_MAPPING: [(SourceKind, &str); 10] = [
    (SourceKind::ActiveRoster, "ATIVOS.xlsx"),
    (SourceKind::Admissions, "ADMISSÃO ABRIL.xlsx"),
    (SourceKind::Terminations, "DESLIGADOS.xlsx"),
    (SourceKind::Leave, "AFASTAMENTOS.xlsx"),
    (SourceKind::Interns, "ESTÁGIO.xlsx"),
    (SourceKind::Apprentices, "APRENDIZ.xlsx"),
    (SourceKind::Overseas, "EXTERIOR.xlsx"),
    (SourceKind::Vacations, "FÉRIAS.xlsx"),
    (SourceKind::WorkingDays, "Base dias uteis.xlsx"),
    (SourceKind::RegionRates, "Base sindicato x valor.xlsx"),
];

/// Serial date 0 in the 1900 date system.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Loads the ten source workbooks from a single directory.
///
/// Each workbook's first worksheet is read with its first row as the header.
/// Workbooks that are missing on disk are logged and skipped; the resulting
/// [`TableSet`] simply lacks those sources, and downstream stages decide
/// whether that is fatal.
#[derive(Debug, Clone)]
pub struct ExcelTableLoader {
    data_dir: PathBuf,
}

impl ExcelTableLoader {
    /// Creates a loader rooted at the given directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn read_workbook(&self, path: &Path) -> EngineResult<Table> {
        let mut workbook: Xlsx<_> = open_workbook(path)?;
        let sheet_name = workbook.sheet_names().first().cloned().unwrap_or_default();
        let range = match workbook.worksheet_range(&sheet_name) {
            Some(result) => result?,
            None => return Ok(Table::new(Vec::<String>::new())),
        };

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row.iter().map(header_to_string).collect(),
            None => return Ok(Table::new(Vec::<String>::new())),
        };

        let mut table = Table::new(headers);
        for row in rows {
            let cells: Vec<Cell> = row.iter().map(convert_cell).collect();
            if cells.iter().all(Cell::is_empty) {
                continue;
            }
            table.push_row(cells);
        }
        Ok(table)
    }
}

impl TableLoader for ExcelTableLoader {
    fn load(&self) -> EngineResult<TableSet> {
        let mut tables = TableSet::new();
        for (kind, filename) in FILE_MAPPING {
            let path = self.data_dir.join(filename);
            if !path.exists() {
                warn!(source = %kind, file = filename, "source workbook not found, skipping");
                continue;
            }
            let table = self.read_workbook(&path)?;
            debug!(source = %kind, rows = table.row_count(), "source workbook loaded");
            tables.insert(kind, table);
        }
        Ok(tables)
    }
}

fn header_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.trim().to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

fn convert_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::String(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(trimmed.to_string())
            }
        }
        DataType::Float(value) => Cell::Text(value.to_string()),
        DataType::Int(value) => Cell::Text(value.to_string()),
        DataType::Bool(value) => Cell::Text(value.to_string()),
        DataType::DateTime(serial) => serial_to_date(*serial)
            .map(Cell::Date)
            .unwrap_or(Cell::Empty),
        DataType::Empty => Cell::Empty,
        other => {
            let text = other.to_string();
            if text.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(text)
            }
        }
    }
}

/// Converts a 1900 date system serial number to a calendar date.
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if serial < 0.0 {
        return None;
    }
    let (year, month, day) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(year, month, day)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}
