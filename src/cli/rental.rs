//! `fleetledger rental` subcommands.

use clap::{Parser, Subcommand};
use tabled::Tabled;

use crate::adapter::sqlite::SqliteFleetStore;
use crate::app::lifecycle::RentalLifecycle;
use crate::domain::id::{ClientId, RentalId, VehicleId};
use crate::domain::rental::Rental;
use crate::error::Result;
use crate::port::store::RentalStore;

use super::{output, parse_date};

#[derive(Subcommand, Debug)]
pub enum RentalCommand {
    /// Start a rental (fails if the vehicle is already out)
    Start(StartArgs),
    /// Return the vehicle, completing the rental
    Return(CloseArgs),
    /// Cancel an active rental
    Cancel(CloseArgs),
    /// List rentals
    List(ListArgs),
}

#[derive(Parser, Debug)]
pub struct StartArgs {
    /// Vehicle id
    pub vehicle_id: i32,

    /// Client id
    pub client_id: i32,

    /// Rental date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Parser, Debug)]
pub struct CloseArgs {
    /// Rental id
    pub id: i32,

    /// Return date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only rentals for this client, newest first
    #[arg(long)]
    pub client: Option<i32>,
}

#[derive(Tabled)]
struct RentalLine {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Vehicle")]
    vehicle: i32,
    #[tabled(rename = "Client")]
    client: i32,
    #[tabled(rename = "From")]
    rental_date: String,
    #[tabled(rename = "Returned")]
    return_date: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Rental> for RentalLine {
    fn from(rental: &Rental) -> Self {
        Self {
            id: rental.id().map_or(0, |i| i.as_i32()),
            vehicle: rental.vehicle_id().as_i32(),
            client: rental.client_id().as_i32(),
            rental_date: rental.rental_date().to_string(),
            return_date: rental
                .return_date()
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
            status: rental.status().to_string(),
        }
    }
}

pub async fn handle(command: RentalCommand, store: &SqliteFleetStore) -> Result<()> {
    let lifecycle = RentalLifecycle::new(store.clone());
    match command {
        RentalCommand::Start(args) => start(args, &lifecycle).await,
        RentalCommand::Return(args) => complete(args, &lifecycle).await,
        RentalCommand::Cancel(args) => cancel(args, &lifecycle).await,
        RentalCommand::List(args) => list(args, store).await,
    }
}

async fn start(args: StartArgs, lifecycle: &RentalLifecycle) -> Result<()> {
    let date = args.date.as_deref().map(parse_date).transpose()?;
    let rental = lifecycle
        .start(
            VehicleId::new(args.vehicle_id),
            ClientId::new(args.client_id),
            date,
        )
        .await?;

    output::ok(&format!(
        "rental {} started: vehicle {} to client {} on {}",
        rental.id().map_or(0, |i| i.as_i32()),
        rental.vehicle_id(),
        rental.client_id(),
        rental.rental_date(),
    ));
    Ok(())
}

async fn complete(args: CloseArgs, lifecycle: &RentalLifecycle) -> Result<()> {
    let date = args.date.as_deref().map(parse_date).transpose()?;
    let rental = lifecycle.complete(RentalId::new(args.id), date).await?;

    output::ok(&format!(
        "rental {} completed, returned {}",
        args.id,
        rental.return_date().map_or_else(String::new, |d| d.to_string()),
    ));
    Ok(())
}

async fn cancel(args: CloseArgs, lifecycle: &RentalLifecycle) -> Result<()> {
    let date = args.date.as_deref().map(parse_date).transpose()?;
    lifecycle.cancel(RentalId::new(args.id), date).await?;

    output::ok(&format!("rental {} cancelled", args.id));
    Ok(())
}

async fn list(args: ListArgs, store: &SqliteFleetStore) -> Result<()> {
    let rentals = match args.client {
        Some(client_id) => store.list_for_client(ClientId::new(client_id)).await?,
        None => RentalStore::list(store).await?,
    };

    let lines: Vec<RentalLine> = rentals.iter().map(RentalLine::from).collect();
    output::table(&lines, "no rentals recorded");
    Ok(())
}
