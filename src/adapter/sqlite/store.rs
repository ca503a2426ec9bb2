//! SQLite-backed implementation of the persistence ports.

use std::sync::Arc;

use tracing::debug;

use crate::domain::client::Client;
use crate::domain::clock::Clock;
use crate::domain::id::{ClientId, RentalId, VehicleId};
use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::rental::Rental;
use crate::domain::vehicle::{Vehicle, VehicleStatus};
use crate::error::{Error, Result};
use crate::port::store::{ClientStore, MaintenanceStore, RentalStore, VehicleStore};

use super::connection::{with_transaction, DbPool};
use super::query;

/// Fleet persistence on a pooled SQLite database.
///
/// Every write runs inside one immediate transaction; reads borrow a
/// pooled connection directly. The injected clock supplies the insertion
/// timestamp and the "today" anchor used when rows are re-validated on
/// the way out.
#[derive(Clone)]
pub struct SqliteFleetStore {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl SqliteFleetStore {
    #[must_use]
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// The underlying pool, for operations that compose their own
    /// transaction (see [`crate::app::lifecycle`]).
    #[must_use]
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// The clock this store stamps writes with.
    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    fn read<T>(&self, f: impl FnOnce(&mut diesel::SqliteConnection) -> Result<T>) -> Result<T> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Transient(e.to_string()))?;
        f(&mut conn)
    }
}

impl VehicleStore for SqliteFleetStore {
    async fn insert(&self, entity: &Vehicle) -> Result<Vehicle> {
        let now = self.clock.now();
        let saved = with_transaction(&self.pool, |conn| query::insert_vehicle(conn, entity, now))?;
        debug!(id = %saved.id().map_or(0, |i| i.as_i32()), plate = saved.license_plate(), "vehicle inserted");
        Ok(saved)
    }

    async fn find(&self, id: VehicleId) -> Result<Option<Vehicle>> {
        let today = self.clock.today();
        self.read(|conn| query::vehicle_by_id(conn, id, today))
    }

    async fn find_by_plate(&self, plate: &str) -> Result<Option<Vehicle>> {
        let today = self.clock.today();
        self.read(|conn| query::vehicle_by_plate(conn, plate, today))
    }

    async fn list(&self) -> Result<Vec<Vehicle>> {
        let today = self.clock.today();
        self.read(|conn| query::all_vehicles(conn, today))
    }

    async fn set_status(&self, id: VehicleId, status: Option<VehicleStatus>) -> Result<Vehicle> {
        let today = self.clock.today();
        with_transaction(&self.pool, |conn| {
            query::update_vehicle_status(conn, id, status, today)
        })
    }
}

impl ClientStore for SqliteFleetStore {
    async fn insert(&self, entity: &Client) -> Result<Client> {
        let now = self.clock.now();
        let saved = with_transaction(&self.pool, |conn| query::insert_client(conn, entity, now))?;
        debug!(id = %saved.id().map_or(0, |i| i.as_i32()), email = saved.email(), "client inserted");
        Ok(saved)
    }

    async fn find(&self, id: ClientId) -> Result<Option<Client>> {
        self.read(|conn| query::client_by_id(conn, id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>> {
        self.read(|conn| query::client_by_email(conn, email))
    }

    async fn list(&self) -> Result<Vec<Client>> {
        self.read(query::all_clients)
    }
}

impl RentalStore for SqliteFleetStore {
    async fn find(&self, id: RentalId) -> Result<Option<Rental>> {
        let today = self.clock.today();
        self.read(|conn| query::rental_by_id(conn, id, today))
    }

    async fn active_for_vehicle(&self, vehicle_id: VehicleId) -> Result<Option<Rental>> {
        let today = self.clock.today();
        self.read(|conn| query::active_rental_for_vehicle(conn, vehicle_id, today))
    }

    async fn list_for_client(&self, client_id: ClientId) -> Result<Vec<Rental>> {
        let today = self.clock.today();
        self.read(|conn| query::rentals_for_client(conn, client_id, today))
    }

    async fn list(&self) -> Result<Vec<Rental>> {
        let today = self.clock.today();
        self.read(|conn| query::all_rentals(conn, today))
    }
}

impl MaintenanceStore for SqliteFleetStore {
    async fn insert(&self, entity: &MaintenanceRecord) -> Result<MaintenanceRecord> {
        let now = self.clock.now();
        let today = self.clock.today();
        with_transaction(&self.pool, |conn| {
            // Surface a missing vehicle as NotFound rather than the raw
            // foreign-key violation the insert would produce.
            if query::vehicle_by_id(conn, entity.vehicle_id(), today)?.is_none() {
                return Err(Error::NotFound {
                    entity: "vehicle",
                    id: entity.vehicle_id().as_i32(),
                });
            }
            query::insert_maintenance(conn, entity, now)
        })
    }

    async fn list_for_vehicle(&self, vehicle_id: VehicleId) -> Result<Vec<MaintenanceRecord>> {
        let today = self.clock.today();
        self.read(|conn| query::maintenance_for_vehicle(conn, vehicle_id, today))
    }

    async fn list(&self) -> Result<Vec<MaintenanceRecord>> {
        let today = self.clock.today();
        self.read(|conn| query::all_maintenance(conn, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::sqlite::connection::test_pool;
    use crate::domain::client::ClientStatus;
    use crate::domain::clock::FixedClock;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn store() -> SqliteFleetStore {
        let clock = FixedClock::at(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        SqliteFleetStore::new(test_pool(), Arc::new(clock))
    }

    #[tokio::test]
    async fn vehicle_insert_and_find_roundtrip() {
        let store = store();
        let today = store.clock().today();

        let vehicle =
            Vehicle::try_new("ab123cd", "toyota", "camry", 2020, dec!(50), None, today).unwrap();
        let saved = VehicleStore::insert(&store, &vehicle).await.unwrap();
        let id = saved.id().unwrap();

        let found = VehicleStore::find(&store, id).await.unwrap().unwrap();
        assert_eq!(found.license_plate(), "AB123CD");
        assert_eq!(found.created_at(), Some(store.clock().now()));

        assert!(VehicleStore::find(&store, VehicleId::new(99))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn set_status_of_missing_vehicle_is_not_found() {
        let store = store();
        let err = store.set_status(VehicleId::new(7), None).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "vehicle", .. }));
    }

    #[tokio::test]
    async fn maintenance_insert_requires_existing_vehicle() {
        let store = store();
        let today = store.clock().today();

        let record = MaintenanceRecord::try_new(
            VehicleId::new(42),
            "oil change",
            dec!(10),
            today,
            None,
            today,
        )
        .unwrap();

        let err = MaintenanceStore::insert(&store, &record).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "vehicle", id: 42 }));
    }

    #[tokio::test]
    async fn client_list_is_oldest_first() {
        let store = store();

        for email in ["a@x.ro", "b@x.ro"] {
            let client =
                Client::try_new("Ana", "Pop", email, None, None, ClientStatus::Active).unwrap();
            ClientStore::insert(&store, &client).await.unwrap();
        }

        let listed = ClientStore::list(&store).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].email(), "a@x.ro");
        assert_eq!(listed[1].email(), "b@x.ro");
    }
}
