//! Command line entry point for the benefit consolidation engine.

use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use benefit_engine::io::{ExcelReportExporter, ExcelTableLoader};
use benefit_engine::models::Competency;
use benefit_engine::runner;

/// Consolidates the monthly meal benefit base from the source spreadsheets.
#[derive(Debug, Parser)]
#[command(name = "benefit-engine", version, about)]
struct Cli {
    /// Directory containing the source workbooks.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Path of the report workbook to write.
    #[arg(long, default_value = "VR_Consolidado.xlsx")]
    output: PathBuf,

    /// Competency month (1-12).
    #[arg(long)]
    month: u32,

    /// Competency year.
    #[arg(long)]
    year: i32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Err(err) = execute(&cli) {
        eprintln!("error: {err}");
        exit(1);
    }
}

fn execute(cli: &Cli) -> benefit_engine::error::EngineResult<()> {
    let competency = Competency::new(cli.month, cli.year)?;
    let loader = ExcelTableLoader::new(&cli.data_dir);
    let exporter = ExcelReportExporter::new(&cli.output);

    let outcome = runner::run(&loader, &exporter, &competency)?;
    if !outcome.validation_passed {
        eprintln!("warning: validation reported errors; inspect the report before distributing");
    }
    Ok(())
}
