//! Excel report exporter.
//!
//! Writes a four-sheet workbook in the layout the payroll team circulates:
//! the consolidated base, the per-union summary, run statistics, and the
//! exclusion audit. Sheet names stay in Portuguese since they are part of the
//! external contract.

use std::path::PathBuf;

use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::info;

use crate::error::EngineResult;
use crate::exclusions::ExclusionSet;
use crate::models::{BenefitRecord, ProcessingStats};
use crate::summary::UnionSummary;

use super::ReportExporter;

const RECORD_SHEET: &str = "VR_Consolidado";
const SUMMARY_SHEET: &str = "Resumo_Sindicatos";
const STATS_SHEET: &str = "Estatísticas";
const EXCLUSIONS_SHEET: &str = "Detalhes_Exclusões";

const RECORD_HEADERS: [&str; 10] = [
    "Matricula",
    "Sindicato",
    "Admissão",
    "Competência",
    "Dias",
    "Valor Diário",
    "Total",
    "Custo Empresa",
    "Desconto Profissional",
    "Observações",
];

const SUMMARY_HEADERS: [&str; 8] = [
    "Sindicato",
    "Profissionais",
    "Dias",
    "Total",
    "Custo Empresa",
    "Desconto Profissional",
    "Valor Diário Médio",
    "Total Médio",
];

/// Writes the consolidation report to a single `.xlsx` file.
#[derive(Debug, Clone)]
pub struct ExcelReportExporter {
    output_path: PathBuf,
}

impl ExcelReportExporter {
    /// Creates an exporter targeting the given file path.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }
}

impl ReportExporter for ExcelReportExporter {
    fn export(
        &self,
        records: &[BenefitRecord],
        summary: &[UnionSummary],
        stats: &ProcessingStats,
        exclusions: &ExclusionSet,
    ) -> EngineResult<()> {
        let mut workbook = Workbook::new();

        write_records(workbook.add_worksheet(), records)?;
        write_summary(workbook.add_worksheet(), summary)?;
        write_stats(workbook.add_worksheet(), stats)?;
        write_exclusions(workbook.add_worksheet(), exclusions)?;

        workbook.save(&self.output_path)?;
        info!(
            path = %self.output_path.display(),
            records = records.len(),
            "report workbook written"
        );
        Ok(())
    }
}

fn write_records(worksheet: &mut Worksheet, records: &[BenefitRecord]) -> EngineResult<()> {
    worksheet.set_name(RECORD_SHEET)?;
    write_header(worksheet, &RECORD_HEADERS)?;

    // Presentation order only; the engine itself does not order records.
    let mut ordered: Vec<&BenefitRecord> = records.iter().collect();
    ordered.sort_by(|a, b| a.registration_id.cmp(&b.registration_id));

    for (idx, record) in ordered.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, &record.registration_id)?;
        worksheet.write_string(row, 1, &record.union_name)?;
        worksheet.write_string(row, 2, &record.admission_date)?;
        worksheet.write_string(row, 3, &record.competency)?;
        worksheet.write_string(row, 4, record.payable_days.to_string())?;
        worksheet.write_string(row, 5, record.daily_rate.to_string())?;
        worksheet.write_string(row, 6, record.total_value.to_string())?;
        worksheet.write_string(row, 7, record.employer_cost.to_string())?;
        worksheet.write_string(row, 8, record.employee_deduction.to_string())?;
        worksheet.write_string(row, 9, &record.notes)?;
    }
    Ok(())
}

fn write_summary(worksheet: &mut Worksheet, summary: &[UnionSummary]) -> EngineResult<()> {
    worksheet.set_name(SUMMARY_SHEET)?;
    write_header(worksheet, &SUMMARY_HEADERS)?;

    for (idx, group) in summary.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, &group.union_name)?;
        worksheet.write_string(row, 1, group.employee_count.to_string())?;
        worksheet.write_string(row, 2, group.total_days.to_string())?;
        worksheet.write_string(row, 3, group.total_value.to_string())?;
        worksheet.write_string(row, 4, group.employer_cost.to_string())?;
        worksheet.write_string(row, 5, group.employee_deduction.to_string())?;
        worksheet.write_string(row, 6, group.mean_daily_rate.to_string())?;
        worksheet.write_string(row, 7, group.mean_value_per_employee.to_string())?;
    }
    Ok(())
}

fn write_stats(worksheet: &mut Worksheet, stats: &ProcessingStats) -> EngineResult<()> {
    worksheet.set_name(STATS_SHEET)?;
    write_header(worksheet, &["Métrica", "Valor"])?;

    let rows: [(&str, String); 7] = [
        ("Profissionais", stats.total_employees.to_string()),
        ("Dias", stats.total_days.to_string()),
        ("Total", stats.total_value.to_string()),
        ("Custo Empresa", stats.employer_cost.to_string()),
        ("Desconto Profissional", stats.employee_deduction.to_string()),
        ("Exclusões", stats.excluded_count.to_string()),
        ("Tempo (s)", format!("{:.3}", stats.elapsed_seconds)),
    ];
    for (idx, (label, value)) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, *label)?;
        worksheet.write_string(row, 1, value)?;
    }
    Ok(())
}

fn write_exclusions(worksheet: &mut Worksheet, exclusions: &ExclusionSet) -> EngineResult<()> {
    worksheet.set_name(EXCLUSIONS_SHEET)?;
    write_header(worksheet, &["Matricula", "Categoria"])?;

    let mut row = 1u32;
    for (category, ids) in exclusions.iter() {
        for id in ids {
            worksheet.write_string(row, 0, id)?;
            worksheet.write_string(row, 1, category.label())?;
            row += 1;
        }
    }
    Ok(())
}

fn write_header(worksheet: &mut Worksheet, headers: &[&str]) -> EngineResult<()> {
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    Ok(())
}
