//! `fleetledger maintenance` subcommands.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tabled::Tabled;

use crate::adapter::sqlite::SqliteFleetStore;
use crate::domain::id::VehicleId;
use crate::domain::maintenance::MaintenanceRecord;
use crate::error::Result;
use crate::port::store::MaintenanceStore;

use super::{output, parse_date};

#[derive(Subcommand, Debug)]
pub enum MaintenanceCommand {
    /// Record maintenance work on a vehicle
    Add(AddArgs),
    /// List maintenance records
    List(ListArgs),
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Vehicle id
    pub vehicle_id: i32,

    /// What was done
    pub description: String,

    /// Cost of the work
    #[arg(long)]
    pub cost: Decimal,

    /// Date of the work (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    /// Days the vehicle was held
    #[arg(long)]
    pub duration_days: Option<i32>,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only records for this vehicle
    #[arg(long)]
    pub vehicle: Option<i32>,
}

#[derive(Tabled)]
struct MaintenanceLine {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Vehicle")]
    vehicle: i32,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Cost")]
    cost: Decimal,
    #[tabled(rename = "Days")]
    days: String,
}

impl From<&MaintenanceRecord> for MaintenanceLine {
    fn from(record: &MaintenanceRecord) -> Self {
        Self {
            id: record.id().map_or(0, |i| i.as_i32()),
            vehicle: record.vehicle_id().as_i32(),
            date: record.maintenance_date().to_string(),
            description: record.description().to_string(),
            cost: record.cost(),
            days: record
                .duration_days()
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
        }
    }
}

pub async fn handle(command: MaintenanceCommand, store: &SqliteFleetStore) -> Result<()> {
    match command {
        MaintenanceCommand::Add(args) => add(args, store).await,
        MaintenanceCommand::List(args) => list(args, store).await,
    }
}

async fn add(args: AddArgs, store: &SqliteFleetStore) -> Result<()> {
    let today = store.clock().today();
    let date = args.date.as_deref().map(parse_date).transpose()?.unwrap_or(today);

    let record = MaintenanceRecord::try_new(
        VehicleId::new(args.vehicle_id),
        &args.description,
        args.cost,
        date,
        args.duration_days,
        today,
    )?;

    let saved = MaintenanceStore::insert(store, &record).await?;
    output::ok(&format!(
        "maintenance {} recorded for vehicle {}",
        saved.id().map_or(0, |i| i.as_i32()),
        args.vehicle_id,
    ));
    Ok(())
}

async fn list(args: ListArgs, store: &SqliteFleetStore) -> Result<()> {
    let records = match args.vehicle {
        Some(vehicle_id) => store.list_for_vehicle(VehicleId::new(vehicle_id)).await?,
        None => MaintenanceStore::list(store).await?,
    };

    let lines: Vec<MaintenanceLine> = records.iter().map(MaintenanceLine::from).collect();
    output::table(&lines, "no maintenance recorded");
    Ok(())
}
