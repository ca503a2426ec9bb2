//! Command-line interface definitions and dispatch.

pub mod client;
pub mod data;
pub mod maintenance;
pub mod output;
pub mod rental;
pub mod vehicle;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use chrono::NaiveDate;

use crate::adapter::sqlite::{create_pool, run_migrations, SqliteFleetStore};
use crate::config::Config;
use crate::domain::clock::SystemClock;
use crate::domain::vehicle::VehicleStatus;
use crate::error::{Error, Result};

/// Fleetledger - vehicle rental fleet tracking.
#[derive(Parser, Debug)]
#[command(name = "fleetledger")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "fleetledger.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database and apply the schema
    Init,

    /// Manage fleet vehicles
    #[command(subcommand)]
    Vehicle(vehicle::VehicleCommand),

    /// Manage rental clients
    #[command(subcommand)]
    Client(client::ClientCommand),

    /// Start, return, cancel, and list rentals
    #[command(subcommand)]
    Rental(rental::RentalCommand),

    /// Record and list maintenance work
    #[command(subcommand)]
    Maintenance(maintenance::MaintenanceCommand),

    /// Bulk-import records from CSV files
    #[command(subcommand)]
    Import(data::ImportCommand),

    /// Emit a JSON fleet report
    Report(data::ReportArgs),
}

/// Vehicle status the operator can set from the command line.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum VehicleStatusArg {
    /// Clear any blocking status
    Available,
    /// In the shop, not rentable
    Maintenance,
    /// Left the fleet, not rentable
    Sold,
}

impl VehicleStatusArg {
    pub(crate) fn into_status(self) -> Option<VehicleStatus> {
        match self {
            Self::Available => None,
            Self::Maintenance => Some(VehicleStatus::Maintenance),
            Self::Sold => Some(VehicleStatus::Sold),
        }
    }
}

/// Parse a `YYYY-MM-DD` argument.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| Error::Parse(format!("invalid date '{raw}', expected YYYY-MM-DD ({e})")))
}

/// Run the parsed command to completion against an already-loaded
/// configuration.
///
/// # Errors
///
/// Propagates configuration, storage, and domain errors from the
/// executed command.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Init => init(&config),
        command => {
            let store = open_store(&config)?;
            match command {
                Commands::Init => unreachable!("handled above"),
                Commands::Vehicle(cmd) => vehicle::handle(cmd, &store).await,
                Commands::Client(cmd) => client::handle(cmd, &store).await,
                Commands::Rental(cmd) => rental::handle(cmd, &store).await,
                Commands::Maintenance(cmd) => maintenance::handle(cmd, &store).await,
                Commands::Import(cmd) => data::handle_import(cmd, &store).await,
                Commands::Report(args) => data::handle_report(args, &store).await,
            }
        }
    }
}

/// Create the database file and apply the schema.
fn init(config: &Config) -> Result<()> {
    let path = config.database_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = create_pool(&path.to_string_lossy())?;
    run_migrations(&pool)?;

    output::ok(&format!("database ready at {}", path.display()));
    Ok(())
}

/// Open the configured database, applying any pending migrations.
fn open_store(config: &Config) -> Result<SqliteFleetStore> {
    let path = config.database_path()?;
    if !path.exists() {
        return Err(Error::Database(format!(
            "no database at {}; run `fleetledger init` first",
            path.display()
        )));
    }

    let pool = create_pool(&path.to_string_lossy())?;
    run_migrations(&pool)?;

    Ok(SqliteFleetStore::new(pool, Arc::new(SystemClock)))
}
