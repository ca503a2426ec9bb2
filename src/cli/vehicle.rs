//! `fleetledger vehicle` subcommands.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tabled::Tabled;

use crate::adapter::sqlite::SqliteFleetStore;
use crate::domain::id::VehicleId;
use crate::domain::vehicle::Vehicle;
use crate::error::Result;
use crate::port::store::{RentalStore, VehicleStore};

use super::{output, VehicleStatusArg};

#[derive(Subcommand, Debug)]
pub enum VehicleCommand {
    /// Register a vehicle in the fleet
    Add(AddArgs),
    /// List all vehicles
    List,
    /// Set or clear a vehicle's administrative status
    SetStatus(SetStatusArgs),
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// License plate (stored upper-case)
    pub license_plate: String,

    /// Manufacturer
    pub brand: String,

    /// Model name
    pub model: String,

    /// Model year
    #[arg(long)]
    pub year: i32,

    /// Rental rate per day
    #[arg(long)]
    pub daily_rate: Decimal,
}

#[derive(Parser, Debug)]
pub struct SetStatusArgs {
    /// Vehicle id
    pub id: i32,

    /// New status
    #[arg(value_enum)]
    pub status: VehicleStatusArg,
}

#[derive(Tabled)]
struct VehicleLine {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Plate")]
    plate: String,
    #[tabled(rename = "Brand")]
    brand: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Daily rate")]
    daily_rate: Decimal,
    #[tabled(rename = "Status")]
    status: String,
}

impl VehicleLine {
    fn new(vehicle: &Vehicle, rented: bool) -> Self {
        let status = if rented {
            "rented".to_string()
        } else {
            vehicle
                .status()
                .map_or_else(|| "available".to_string(), |s| s.to_string())
        };

        Self {
            id: vehicle.id().map_or(0, |i| i.as_i32()),
            plate: vehicle.license_plate().to_string(),
            brand: vehicle.brand().to_string(),
            model: vehicle.model().to_string(),
            year: vehicle.year(),
            daily_rate: vehicle.daily_rate(),
            status,
        }
    }
}

pub async fn handle(command: VehicleCommand, store: &SqliteFleetStore) -> Result<()> {
    match command {
        VehicleCommand::Add(args) => add(args, store).await,
        VehicleCommand::List => list(store).await,
        VehicleCommand::SetStatus(args) => set_status(args, store).await,
    }
}

async fn add(args: AddArgs, store: &SqliteFleetStore) -> Result<()> {
    let vehicle = Vehicle::try_new(
        &args.license_plate,
        &args.brand,
        &args.model,
        args.year,
        args.daily_rate,
        None,
        store.clock().today(),
    )?;

    let saved = VehicleStore::insert(store, &vehicle).await?;
    output::ok(&format!(
        "vehicle {} added ({} {} {})",
        saved.id().map_or(0, |i| i.as_i32()),
        saved.license_plate(),
        saved.brand(),
        saved.model(),
    ));
    Ok(())
}

async fn list(store: &SqliteFleetStore) -> Result<()> {
    let vehicles = VehicleStore::list(store).await?;
    let rentals = RentalStore::list(store).await?;

    let lines: Vec<VehicleLine> = vehicles
        .iter()
        .map(|v| {
            let rented = rentals
                .iter()
                .any(|r| r.is_active() && Some(r.vehicle_id()) == v.id());
            VehicleLine::new(v, rented)
        })
        .collect();

    output::table(&lines, "no vehicles registered");
    Ok(())
}

async fn set_status(args: SetStatusArgs, store: &SqliteFleetStore) -> Result<()> {
    let updated = store
        .set_status(VehicleId::new(args.id), args.status.into_status())
        .await?;

    let label = updated
        .status()
        .map_or_else(|| "available".to_string(), |s| s.to_string());
    output::ok(&format!("vehicle {} is now {label}", args.id));
    Ok(())
}
