//! End-to-end run orchestration.
//!
//! Wires the pipeline stages together behind the storage traits: load,
//! normalize, consolidate, validate, summarize, export. Validation failures
//! are surfaced in the outcome and the logs but do not abort the run; the
//! report is still written so the payroll team can inspect the flagged rows.

use tracing::{error, info, warn};

use crate::consolidation;
use crate::error::EngineResult;
use crate::io::{ReportExporter, TableLoader};
use crate::models::{BenefitRecord, Competency, ProcessingStats};
use crate::normalize;
use crate::summary::{self, UnionSummary};
use crate::validation::{self, Severity, ValidationFinding};

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The consolidated records, as exported.
    pub records: Vec<BenefitRecord>,
    /// Per-union aggregation.
    pub summary: Vec<UnionSummary>,
    /// Run statistics.
    pub stats: ProcessingStats,
    /// The full validation report, one finding per check.
    pub findings: Vec<ValidationFinding>,
    /// False when any finding is an error.
    pub validation_passed: bool,
}

/// Runs the full pipeline for one competency period.
pub fn run(
    loader: &dyn TableLoader,
    exporter: &dyn ReportExporter,
    competency: &Competency,
) -> EngineResult<RunOutcome> {
    info!(competency = %competency.label(), "run started");

    let tables = loader.load()?;
    info!(sources = tables.len(), "sources loaded");

    let (tables, report) = normalize::normalize(tables);
    for invalid in &report.invalid_dates {
        warn!(
            source = %invalid.source,
            column = %invalid.column,
            count = invalid.count,
            "unparseable dates cleared during normalization"
        );
    }

    let output = consolidation::consolidate(&tables, competency)?;

    let findings = validation::validate(&output.records);
    for finding in &findings {
        match finding.severity {
            Severity::Info => info!(check = %finding.message, "validation"),
            Severity::Warning => warn!(
                check = %finding.message,
                affected = finding.affected_count,
                detail = finding.detail.as_deref().unwrap_or(""),
                "validation"
            ),
            Severity::Error => error!(
                check = %finding.message,
                affected = finding.affected_count,
                detail = finding.detail.as_deref().unwrap_or(""),
                "validation"
            ),
        }
    }
    let validation_passed = validation::passed(&findings);
    if !validation_passed {
        warn!("validation reported errors; exporting anyway for inspection");
    }

    let summary = summary::summarize(&output.records);
    exporter.export(&output.records, &summary, &output.stats, &output.exclusions)?;

    info!(
        records = output.stats.total_employees,
        total_value = %output.stats.total_value,
        validation_passed,
        "run finished"
    );

    Ok(RunOutcome {
        records: output.records,
        summary,
        stats: output.stats,
        findings,
        validation_passed,
    })
}
