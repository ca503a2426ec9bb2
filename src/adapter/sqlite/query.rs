//! Connection-level queries shared by the store and the lifecycle paths.
//!
//! Every function here takes a `&mut SqliteConnection` instead of a pool
//! so multi-step operations can compose several of them inside a single
//! transaction. Rows are decoded back through the domain constructors,
//! so a corrupted row surfaces as an error instead of an invalid entity.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::client::{Client, ClientStatus};
use crate::domain::id::{ClientId, MaintenanceId, RentalId, VehicleId};
use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::rental::{Rental, RentalStatus};
use crate::domain::vehicle::{Vehicle, VehicleStatus};
use crate::error::{Error, Result};

use super::model::{
    ClientRow, MaintenanceRow, NewClientRow, NewMaintenanceRow, NewRentalRow, NewVehicleRow,
    RentalRow, VehicleRow,
};
use super::schema::{client, maintenance_record, rental, vehicle};

diesel::define_sql_function! {
    /// SQLite rowid of the most recent insert on this connection.
    fn last_insert_rowid() -> diesel::sql_types::Integer;
}

/// Storage format for calendar dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

fn encode_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(raw: &str, column: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| Error::Parse(format!("bad date in {column}: '{raw}' ({e})")))
}

fn parse_timestamp(raw: &str, column: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("bad timestamp in {column}: '{raw}' ({e})")))
}

fn parse_decimal(raw: &str, column: &str) -> Result<Decimal> {
    raw.parse()
        .map_err(|e| Error::Parse(format!("bad decimal in {column}: '{raw}' ({e})")))
}

// ---- vehicles ----

fn decode_vehicle(row: &VehicleRow, today: NaiveDate) -> Result<Vehicle> {
    let status = row
        .status
        .as_deref()
        .map(str::parse::<VehicleStatus>)
        .transpose()
        .map_err(|e| Error::Parse(format!("vehicle {}: {e}", row.id)))?;
    let daily_rate = parse_decimal(&row.daily_rate, "vehicle.daily_rate")?;
    let created_at = parse_timestamp(&row.created_at, "vehicle.created_at")?;

    Vehicle::restore(
        VehicleId::new(row.id),
        &row.license_plate,
        &row.brand,
        &row.model,
        row.year,
        daily_rate,
        status,
        created_at,
        today,
    )
    .map_err(|e| Error::Parse(format!("vehicle {}: {e}", row.id)))
}

/// Insert a vehicle and return it with its assigned identity.
pub(crate) fn insert_vehicle(
    conn: &mut SqliteConnection,
    entity: &Vehicle,
    now: DateTime<Utc>,
) -> Result<Vehicle> {
    let row = NewVehicleRow {
        license_plate: entity.license_plate().to_string(),
        brand: entity.brand().to_string(),
        model: entity.model().to_string(),
        year: entity.year(),
        daily_rate: entity.daily_rate().to_string(),
        status: entity.status().map(|s| s.as_str().to_string()),
        created_at: now.to_rfc3339(),
    };

    diesel::insert_into(vehicle::table).values(&row).execute(conn)?;
    let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;

    Ok(entity.clone().with_identity(VehicleId::new(id), now))
}

pub(crate) fn vehicle_by_id(
    conn: &mut SqliteConnection,
    id: VehicleId,
    today: NaiveDate,
) -> Result<Option<Vehicle>> {
    let row: Option<VehicleRow> = vehicle::table
        .find(id.as_i32())
        .select(VehicleRow::as_select())
        .first(conn)
        .optional()?;
    row.map(|r| decode_vehicle(&r, today)).transpose()
}

pub(crate) fn vehicle_by_plate(
    conn: &mut SqliteConnection,
    plate: &str,
    today: NaiveDate,
) -> Result<Option<Vehicle>> {
    let row: Option<VehicleRow> = vehicle::table
        .filter(vehicle::license_plate.eq(plate))
        .select(VehicleRow::as_select())
        .first(conn)
        .optional()?;
    row.map(|r| decode_vehicle(&r, today)).transpose()
}

pub(crate) fn all_vehicles(conn: &mut SqliteConnection, today: NaiveDate) -> Result<Vec<Vehicle>> {
    let rows: Vec<VehicleRow> = vehicle::table
        .order(vehicle::id.asc())
        .select(VehicleRow::as_select())
        .load(conn)?;
    rows.iter().map(|r| decode_vehicle(r, today)).collect()
}

/// Targeted status update; returns the refreshed vehicle.
pub(crate) fn update_vehicle_status(
    conn: &mut SqliteConnection,
    id: VehicleId,
    status: Option<VehicleStatus>,
    today: NaiveDate,
) -> Result<Vehicle> {
    let affected = diesel::update(vehicle::table.find(id.as_i32()))
        .set(vehicle::status.eq(status.map(|s| s.as_str().to_string())))
        .execute(conn)?;
    if affected == 0 {
        return Err(Error::NotFound {
            entity: "vehicle",
            id: id.as_i32(),
        });
    }
    vehicle_by_id(conn, id, today)?.ok_or(Error::NotFound {
        entity: "vehicle",
        id: id.as_i32(),
    })
}

// ---- clients ----

fn decode_client(row: &ClientRow) -> Result<Client> {
    let status = ClientStatus::from_i32(row.status).ok_or_else(|| {
        Error::Parse(format!("client {}: unknown status {}", row.id, row.status))
    })?;
    let created_at = parse_timestamp(&row.created_at, "client.created_at")?;

    Client::restore(
        ClientId::new(row.id),
        &row.first_name,
        &row.last_name,
        &row.email,
        row.phone.as_deref(),
        row.license_number.as_deref(),
        status,
        created_at,
    )
    .map_err(|e| Error::Parse(format!("client {}: {e}", row.id)))
}

/// Insert a client and return it with its assigned identity.
pub(crate) fn insert_client(
    conn: &mut SqliteConnection,
    entity: &Client,
    now: DateTime<Utc>,
) -> Result<Client> {
    let row = NewClientRow {
        first_name: entity.first_name().to_string(),
        last_name: entity.last_name().to_string(),
        email: entity.email().to_string(),
        phone: entity.phone().map(str::to_string),
        license_number: entity.license_number().map(str::to_string),
        status: entity.status().as_i32(),
        created_at: now.to_rfc3339(),
    };

    diesel::insert_into(client::table).values(&row).execute(conn)?;
    let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;

    Ok(entity.clone().with_identity(ClientId::new(id), now))
}

pub(crate) fn client_by_id(conn: &mut SqliteConnection, id: ClientId) -> Result<Option<Client>> {
    let row: Option<ClientRow> = client::table
        .find(id.as_i32())
        .select(ClientRow::as_select())
        .first(conn)
        .optional()?;
    row.as_ref().map(decode_client).transpose()
}

pub(crate) fn client_by_email(conn: &mut SqliteConnection, email: &str) -> Result<Option<Client>> {
    let row: Option<ClientRow> = client::table
        .filter(client::email.eq(email))
        .select(ClientRow::as_select())
        .first(conn)
        .optional()?;
    row.as_ref().map(decode_client).transpose()
}

pub(crate) fn all_clients(conn: &mut SqliteConnection) -> Result<Vec<Client>> {
    let rows: Vec<ClientRow> = client::table
        .order(client::id.asc())
        .select(ClientRow::as_select())
        .load(conn)?;
    rows.iter().map(decode_client).collect()
}

// ---- rentals ----

fn decode_rental(row: &RentalRow, today: NaiveDate) -> Result<Rental> {
    let status = row
        .status
        .parse::<RentalStatus>()
        .map_err(|e| Error::Parse(format!("rental {}: {e}", row.id)))?;
    let rental_date = parse_date(&row.rental_date, "rental.rental_date")?;
    let return_date = row
        .return_date
        .as_deref()
        .map(|d| parse_date(d, "rental.return_date"))
        .transpose()?;
    let created_at = parse_timestamp(&row.created_at, "rental.created_at")?;

    Rental::restore(
        RentalId::new(row.id),
        VehicleId::new(row.vehicle_id),
        ClientId::new(row.client_id),
        rental_date,
        return_date,
        status,
        created_at,
        today,
    )
    .map_err(|e| Error::Parse(format!("rental {}: {e}", row.id)))
}

/// Insert a rental and return it with its assigned identity.
///
/// A second active rental for the same vehicle trips the partial unique
/// index and comes back as a unique-constraint violation.
pub(crate) fn insert_rental(
    conn: &mut SqliteConnection,
    entity: &Rental,
    now: DateTime<Utc>,
) -> Result<Rental> {
    let row = NewRentalRow {
        vehicle_id: entity.vehicle_id().as_i32(),
        client_id: entity.client_id().as_i32(),
        rental_date: encode_date(entity.rental_date()),
        return_date: entity.return_date().map(encode_date),
        status: entity.status().as_str().to_string(),
        created_at: now.to_rfc3339(),
    };

    diesel::insert_into(rental::table).values(&row).execute(conn)?;
    let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;

    Ok(entity.clone().with_identity(RentalId::new(id), now))
}

pub(crate) fn rental_by_id(
    conn: &mut SqliteConnection,
    id: RentalId,
    today: NaiveDate,
) -> Result<Option<Rental>> {
    let row: Option<RentalRow> = rental::table
        .find(id.as_i32())
        .select(RentalRow::as_select())
        .first(conn)
        .optional()?;
    row.map(|r| decode_rental(&r, today)).transpose()
}

pub(crate) fn active_rental_for_vehicle(
    conn: &mut SqliteConnection,
    vehicle_id: VehicleId,
    today: NaiveDate,
) -> Result<Option<Rental>> {
    let row: Option<RentalRow> = rental::table
        .filter(rental::vehicle_id.eq(vehicle_id.as_i32()))
        .filter(rental::return_date.is_null())
        .select(RentalRow::as_select())
        .first(conn)
        .optional()?;
    row.map(|r| decode_rental(&r, today)).transpose()
}

pub(crate) fn rentals_for_client(
    conn: &mut SqliteConnection,
    client_id: ClientId,
    today: NaiveDate,
) -> Result<Vec<Rental>> {
    let rows: Vec<RentalRow> = rental::table
        .filter(rental::client_id.eq(client_id.as_i32()))
        .order(rental::id.desc())
        .select(RentalRow::as_select())
        .load(conn)?;
    rows.iter().map(|r| decode_rental(r, today)).collect()
}

pub(crate) fn all_rentals(conn: &mut SqliteConnection, today: NaiveDate) -> Result<Vec<Rental>> {
    let rows: Vec<RentalRow> = rental::table
        .order(rental::id.asc())
        .select(RentalRow::as_select())
        .load(conn)?;
    rows.iter().map(|r| decode_rental(r, today)).collect()
}

/// Write the closing columns of a rental in one targeted update.
///
/// The row CHECK constraint ties `return_date` to `status`, so the two
/// columns must change together.
pub(crate) fn close_rental(
    conn: &mut SqliteConnection,
    id: RentalId,
    status: RentalStatus,
    return_date: NaiveDate,
) -> Result<()> {
    let affected = diesel::update(rental::table.find(id.as_i32()))
        .set((
            rental::status.eq(status.as_str()),
            rental::return_date.eq(Some(encode_date(return_date))),
        ))
        .execute(conn)?;
    if affected == 0 {
        return Err(Error::NotFound {
            entity: "rental",
            id: id.as_i32(),
        });
    }
    Ok(())
}

// ---- maintenance ----

fn decode_maintenance(row: &MaintenanceRow, today: NaiveDate) -> Result<MaintenanceRecord> {
    let cost = parse_decimal(&row.cost, "maintenance_record.cost")?;
    let maintenance_date = parse_date(&row.maintenance_date, "maintenance_record.maintenance_date")?;
    let created_at = parse_timestamp(&row.created_at, "maintenance_record.created_at")?;

    MaintenanceRecord::restore(
        MaintenanceId::new(row.id),
        VehicleId::new(row.vehicle_id),
        &row.description,
        cost,
        maintenance_date,
        row.duration_days,
        created_at,
        today,
    )
    .map_err(|e| Error::Parse(format!("maintenance record {}: {e}", row.id)))
}

/// Insert a maintenance record and return it with its assigned identity.
pub(crate) fn insert_maintenance(
    conn: &mut SqliteConnection,
    entity: &MaintenanceRecord,
    now: DateTime<Utc>,
) -> Result<MaintenanceRecord> {
    let row = NewMaintenanceRow {
        vehicle_id: entity.vehicle_id().as_i32(),
        description: entity.description().to_string(),
        cost: entity.cost().to_string(),
        maintenance_date: encode_date(entity.maintenance_date()),
        duration_days: entity.duration_days(),
        created_at: now.to_rfc3339(),
    };

    diesel::insert_into(maintenance_record::table)
        .values(&row)
        .execute(conn)?;
    let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;

    Ok(entity.clone().with_identity(MaintenanceId::new(id), now))
}

pub(crate) fn maintenance_for_vehicle(
    conn: &mut SqliteConnection,
    vehicle_id: VehicleId,
    today: NaiveDate,
) -> Result<Vec<MaintenanceRecord>> {
    let rows: Vec<MaintenanceRow> = maintenance_record::table
        .filter(maintenance_record::vehicle_id.eq(vehicle_id.as_i32()))
        .order(maintenance_record::id.asc())
        .select(MaintenanceRow::as_select())
        .load(conn)?;
    rows.iter().map(|r| decode_maintenance(r, today)).collect()
}

pub(crate) fn all_maintenance(
    conn: &mut SqliteConnection,
    today: NaiveDate,
) -> Result<Vec<MaintenanceRecord>> {
    let rows: Vec<MaintenanceRow> = maintenance_record::table
        .order(maintenance_record::id.asc())
        .select(MaintenanceRow::as_select())
        .load(conn)?;
    rows.iter().map(|r| decode_maintenance(r, today)).collect()
}
