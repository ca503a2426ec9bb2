//! Persistence ports for the fleet entities.
//!
//! Every write runs in its own storage transaction: commit on success,
//! full rollback on any error. Multi-step lifecycle operations (start,
//! return, cancel) live in [`crate::app::lifecycle`] because they must
//! share a single transaction with their precondition reads.

use std::future::Future;

use crate::domain::client::Client;
use crate::domain::id::{ClientId, RentalId, VehicleId};
use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::rental::Rental;
use crate::domain::vehicle::{Vehicle, VehicleStatus};
use crate::error::Result;

/// Storage operations for vehicles.
pub trait VehicleStore: Send + Sync {
    /// Persist a new vehicle, assigning identity and creation timestamp.
    fn insert(&self, vehicle: &Vehicle) -> impl Future<Output = Result<Vehicle>> + Send;

    /// Get a vehicle by id.
    fn find(&self, id: VehicleId) -> impl Future<Output = Result<Option<Vehicle>>> + Send;

    /// Get a vehicle by its (normalized) license plate.
    fn find_by_plate(&self, plate: &str) -> impl Future<Output = Result<Option<Vehicle>>> + Send;

    /// List all vehicles, oldest first.
    fn list(&self) -> impl Future<Output = Result<Vec<Vehicle>>> + Send;

    /// Targeted status update; `None` marks the vehicle available.
    fn set_status(
        &self,
        id: VehicleId,
        status: Option<VehicleStatus>,
    ) -> impl Future<Output = Result<Vehicle>> + Send;
}

/// Storage operations for clients.
pub trait ClientStore: Send + Sync {
    /// Persist a new client, assigning identity and creation timestamp.
    fn insert(&self, client: &Client) -> impl Future<Output = Result<Client>> + Send;

    /// Get a client by id.
    fn find(&self, id: ClientId) -> impl Future<Output = Result<Option<Client>>> + Send;

    /// Get a client by its (normalized) email.
    fn find_by_email(&self, email: &str) -> impl Future<Output = Result<Option<Client>>> + Send;

    /// List all clients, oldest first.
    fn list(&self) -> impl Future<Output = Result<Vec<Client>>> + Send;
}

/// Read operations for rentals.
pub trait RentalStore: Send + Sync {
    /// Get a rental by id.
    fn find(&self, id: RentalId) -> impl Future<Output = Result<Option<Rental>>> + Send;

    /// The open rental for a vehicle, if any. At most one can exist.
    fn active_for_vehicle(
        &self,
        vehicle_id: VehicleId,
    ) -> impl Future<Output = Result<Option<Rental>>> + Send;

    /// All rentals for a client, newest first.
    fn list_for_client(
        &self,
        client_id: ClientId,
    ) -> impl Future<Output = Result<Vec<Rental>>> + Send;

    /// All rentals, oldest first.
    fn list(&self) -> impl Future<Output = Result<Vec<Rental>>> + Send;
}

/// Storage operations for maintenance records.
pub trait MaintenanceStore: Send + Sync {
    /// Persist a new record, assigning identity and creation timestamp.
    ///
    /// Fails with `NotFound` when the referenced vehicle does not exist.
    fn insert(
        &self,
        record: &MaintenanceRecord,
    ) -> impl Future<Output = Result<MaintenanceRecord>> + Send;

    /// Maintenance history for a vehicle, oldest first.
    fn list_for_vehicle(
        &self,
        vehicle_id: VehicleId,
    ) -> impl Future<Output = Result<Vec<MaintenanceRecord>>> + Send;

    /// All maintenance records, oldest first.
    fn list(&self) -> impl Future<Output = Result<Vec<MaintenanceRecord>>> + Send;
}

/// Convenience bound for operations that read the whole fleet.
pub trait FleetStore: VehicleStore + ClientStore + RentalStore + MaintenanceStore {}

impl<T: VehicleStore + ClientStore + RentalStore + MaintenanceStore> FleetStore for T {}
