//! CSV import and JSON report commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::adapter::sqlite::SqliteFleetStore;
use crate::app::import::{CsvImporter, ImportSummary};
use crate::app::report::FleetReport;
use crate::error::Result;

use super::output;

#[derive(Subcommand, Debug)]
pub enum ImportCommand {
    /// Import vehicles from a CSV file
    Vehicles(ImportArgs),
    /// Import clients from a CSV file
    Clients(ImportArgs),
}

#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Path to the CSV file
    pub file: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn handle_import(command: ImportCommand, store: &SqliteFleetStore) -> Result<()> {
    let importer = CsvImporter::new(store.clone());
    let summary = match command {
        ImportCommand::Vehicles(args) => importer.import_vehicles(&args.file).await?,
        ImportCommand::Clients(args) => importer.import_clients(&args.file).await?,
    };
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ImportSummary) {
    output::ok(&format!("{} rows imported", summary.imported));
    if !summary.skipped.is_empty() {
        output::warn(&format!("{} rows skipped", summary.skipped.len()));
        for failure in &summary.skipped {
            output::note(&format!("  line {}: {}", failure.line, failure.reason));
        }
    }
}

pub async fn handle_report(args: ReportArgs, store: &SqliteFleetStore) -> Result<()> {
    let report = FleetReport::generate(store, store.clock().now()).await?;
    let json = serde_json::to_string_pretty(&report)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            output::ok(&format!("report written to {}", path.display()));
        }
        None => output::note(&json),
    }
    Ok(())
}
