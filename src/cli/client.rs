//! `fleetledger client` subcommands.

use clap::{Parser, Subcommand};
use tabled::Tabled;

use crate::adapter::sqlite::SqliteFleetStore;
use crate::domain::client::{Client, ClientStatus};
use crate::error::Result;
use crate::port::store::ClientStore;

use super::output;

#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    /// Register a client
    Add(AddArgs),
    /// List all clients
    List,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address (stored lower-case, must be unique)
    pub email: String,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Driver's license number (unique when present)
    #[arg(long)]
    pub license_number: Option<String>,
}

#[derive(Tabled)]
struct ClientLine {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "License")]
    license: String,
    #[tabled(rename = "Status")]
    status: ClientStatus,
}

impl From<&Client> for ClientLine {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id().map_or(0, |i| i.as_i32()),
            name: format!("{} {}", client.first_name(), client.last_name()),
            email: client.email().to_string(),
            phone: client.phone().unwrap_or("-").to_string(),
            license: client.license_number().unwrap_or("-").to_string(),
            status: client.status(),
        }
    }
}

pub async fn handle(command: ClientCommand, store: &SqliteFleetStore) -> Result<()> {
    match command {
        ClientCommand::Add(args) => add(args, store).await,
        ClientCommand::List => list(store).await,
    }
}

async fn add(args: AddArgs, store: &SqliteFleetStore) -> Result<()> {
    let client = Client::try_new(
        &args.first_name,
        &args.last_name,
        &args.email,
        args.phone.as_deref(),
        args.license_number.as_deref(),
        ClientStatus::Active,
    )?;

    let saved = ClientStore::insert(store, &client).await?;
    output::ok(&format!(
        "client {} added ({} {}, {})",
        saved.id().map_or(0, |i| i.as_i32()),
        saved.first_name(),
        saved.last_name(),
        saved.email(),
    ));
    Ok(())
}

async fn list(store: &SqliteFleetStore) -> Result<()> {
    let clients = ClientStore::list(store).await?;
    let lines: Vec<ClientLine> = clients.iter().map(ClientLine::from).collect();
    output::table(&lines, "no clients registered");
    Ok(())
}
