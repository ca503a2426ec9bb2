//! Bulk CSV import of vehicles and clients.
//!
//! Imports are row-by-row: each row gets its own transaction, so a bad
//! row is recorded and skipped without undoing the rows before it.
//! Infrastructure failures (pool, IO) abort the whole import.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use crate::adapter::sqlite::connection::with_transaction;
use crate::adapter::sqlite::{query, SqliteFleetStore};
use crate::domain::client::{Client, ClientStatus};
use crate::domain::vehicle::{Vehicle, VehicleStatus};
use crate::error::{Error, Result};

/// One row the import could not take, with its 1-based line number.
#[derive(Debug, Clone)]
pub struct RowFailure {
    pub line: usize,
    pub reason: String,
}

/// Outcome of one CSV import run.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: Vec<RowFailure>,
}

#[derive(Debug, Deserialize)]
struct VehicleCsvRecord {
    license_plate: String,
    brand: String,
    model: String,
    year: i32,
    daily_rate: Decimal,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClientCsvRecord {
    first_name: String,
    last_name: String,
    email: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    license_number: Option<String>,
}

/// CSV importer over a fleet store.
#[derive(Clone)]
pub struct CsvImporter {
    store: SqliteFleetStore,
}

impl CsvImporter {
    #[must_use]
    pub fn new(store: SqliteFleetStore) -> Self {
        Self { store }
    }

    /// Import vehicles from a headered CSV file.
    ///
    /// Expected header:
    /// `license_plate,brand,model,year,daily_rate,status` (status optional
    /// and blank for available vehicles).
    ///
    /// # Errors
    ///
    /// Fails on IO or storage infrastructure errors. Malformed rows,
    /// validation failures, and duplicate plates are collected in the
    /// summary instead.
    pub async fn import_vehicles(&self, path: &Path) -> Result<ImportSummary> {
        let today = self.store.clock().today();
        let now = self.store.clock().now();
        let mut reader = csv::Reader::from_path(path)?;
        let mut summary = ImportSummary::default();

        // Header occupies line 1; data starts at line 2.
        for (idx, row) in reader.deserialize::<VehicleCsvRecord>().enumerate() {
            let line = idx + 2;
            let record = match row {
                Ok(record) => record,
                Err(e) => {
                    summary.skip(line, e.to_string());
                    continue;
                }
            };

            let status = match record.status.as_deref().filter(|s| !s.trim().is_empty()) {
                Some(raw) => match raw.trim().parse::<VehicleStatus>() {
                    Ok(status) => Some(status),
                    Err(e) => {
                        summary.skip(line, e.to_string());
                        continue;
                    }
                },
                None => None,
            };

            let vehicle = match Vehicle::try_new(
                &record.license_plate,
                &record.brand,
                &record.model,
                record.year,
                record.daily_rate,
                status,
                today,
            ) {
                Ok(vehicle) => vehicle,
                Err(e) => {
                    summary.skip(line, e.to_string());
                    continue;
                }
            };

            match with_transaction(self.store.pool(), |conn| {
                query::insert_vehicle(conn, &vehicle, now)
            }) {
                Ok(_) => summary.imported += 1,
                Err(Error::Constraint(v)) => summary.skip(line, v.to_string()),
                Err(e) => return Err(e),
            }
        }

        info!(
            imported = summary.imported,
            skipped = summary.skipped.len(),
            "vehicle import finished"
        );
        Ok(summary)
    }

    /// Import clients from a headered CSV file.
    ///
    /// Expected header:
    /// `first_name,last_name,email,phone,license_number` (phone and
    /// license number optional). Imported clients start active.
    ///
    /// # Errors
    ///
    /// Same contract as [`CsvImporter::import_vehicles`].
    pub async fn import_clients(&self, path: &Path) -> Result<ImportSummary> {
        let now = self.store.clock().now();
        let mut reader = csv::Reader::from_path(path)?;
        let mut summary = ImportSummary::default();

        for (idx, row) in reader.deserialize::<ClientCsvRecord>().enumerate() {
            let line = idx + 2;
            let record = match row {
                Ok(record) => record,
                Err(e) => {
                    summary.skip(line, e.to_string());
                    continue;
                }
            };

            let client = match Client::try_new(
                &record.first_name,
                &record.last_name,
                &record.email,
                record.phone.as_deref(),
                record.license_number.as_deref(),
                ClientStatus::Active,
            ) {
                Ok(client) => client,
                Err(e) => {
                    summary.skip(line, e.to_string());
                    continue;
                }
            };

            match with_transaction(self.store.pool(), |conn| {
                query::insert_client(conn, &client, now)
            }) {
                Ok(_) => summary.imported += 1,
                Err(Error::Constraint(v)) => summary.skip(line, v.to_string()),
                Err(e) => return Err(e),
            }
        }

        info!(
            imported = summary.imported,
            skipped = summary.skipped.len(),
            "client import finished"
        );
        Ok(summary)
    }
}

impl ImportSummary {
    fn skip(&mut self, line: usize, reason: String) {
        warn!(line, %reason, "row skipped");
        self.skipped.push(RowFailure { line, reason });
    }
}
