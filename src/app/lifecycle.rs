//! Rental lifecycle orchestration.
//!
//! Starting, returning, and cancelling a rental each bundle their
//! precondition reads and the final write into one immediate transaction,
//! so checks and write commit or roll back together. The precondition
//! checks give friendly errors on the common paths; the authoritative
//! guard against double-booking is the partial unique index on active
//! rentals, whose violation is translated to `VehicleAlreadyRented`.

use chrono::NaiveDate;
use tracing::info;

use crate::adapter::sqlite::connection::with_transaction;
use crate::adapter::sqlite::{query, SqliteFleetStore};
use crate::domain::id::{ClientId, RentalId, VehicleId};
use crate::domain::rental::{Rental, RentalStatus};
use crate::error::{Error, LifecycleError, Result};

/// Index enforcing at most one active rental per vehicle.
const ACTIVE_RENTAL_INDEX: &str = "ux_rental_active_vehicle";

/// Lifecycle operations over a fleet store.
#[derive(Clone)]
pub struct RentalLifecycle {
    store: SqliteFleetStore,
}

impl RentalLifecycle {
    #[must_use]
    pub fn new(store: SqliteFleetStore) -> Self {
        Self { store }
    }

    /// Start a rental of `vehicle_id` by `client_id`.
    ///
    /// `rental_date` defaults to today. Exactly one of two racing callers
    /// can succeed for the same vehicle; the loser gets
    /// [`LifecycleError::VehicleAlreadyRented`].
    ///
    /// # Errors
    ///
    /// `NotFound` when either party does not exist, `VehicleUnavailable`
    /// when the vehicle has a blocking status, `ClientInactive` when the
    /// client account is disabled, `VehicleAlreadyRented` when an active
    /// rental exists, and validation errors from the rental itself.
    pub async fn start(
        &self,
        vehicle_id: VehicleId,
        client_id: ClientId,
        rental_date: Option<NaiveDate>,
    ) -> Result<Rental> {
        let now = self.store.clock().now();
        let today = self.store.clock().today();
        let rental_date = rental_date.unwrap_or(today);

        let result = with_transaction(self.store.pool(), |conn| {
            let vehicle =
                query::vehicle_by_id(conn, vehicle_id, today)?.ok_or(Error::NotFound {
                    entity: "vehicle",
                    id: vehicle_id.as_i32(),
                })?;
            if let Some(status) = vehicle.status() {
                return Err(LifecycleError::VehicleUnavailable { vehicle_id, status }.into());
            }

            let client = query::client_by_id(conn, client_id)?.ok_or(Error::NotFound {
                entity: "client",
                id: client_id.as_i32(),
            })?;
            if !client.is_active() {
                return Err(LifecycleError::ClientInactive { client_id }.into());
            }

            if query::active_rental_for_vehicle(conn, vehicle_id, today)?.is_some() {
                return Err(LifecycleError::VehicleAlreadyRented { vehicle_id }.into());
            }

            let rental = Rental::open(vehicle_id, client_id, rental_date, today)?;
            query::insert_rental(conn, &rental, now)
        });

        match result {
            // Losing the insert race reaches the index instead of the
            // precondition check above; report it the same way.
            Err(Error::Constraint(v))
                if v.is_on(ACTIVE_RENTAL_INDEX) || v.is_on("rental.vehicle_id") =>
            {
                Err(LifecycleError::VehicleAlreadyRented { vehicle_id }.into())
            }
            Err(e) => Err(e),
            Ok(rental) => {
                info!(
                    rental = rental.id().map_or(0, |i| i.as_i32()),
                    vehicle = vehicle_id.as_i32(),
                    client = client_id.as_i32(),
                    "rental started"
                );
                Ok(rental)
            }
        }
    }

    /// Close a rental as completed. `return_date` defaults to today.
    ///
    /// # Errors
    ///
    /// `NotFound` when the rental does not exist, `InvalidTransition`
    /// when it is already closed, and a validation error when the return
    /// date precedes the rental date. Nothing is written on failure.
    pub async fn complete(
        &self,
        rental_id: RentalId,
        return_date: Option<NaiveDate>,
    ) -> Result<Rental> {
        let rental = self.close(rental_id, return_date, RentalStatus::Completed).await?;
        info!(rental = rental_id.as_i32(), "rental completed");
        Ok(rental)
    }

    /// Close a rental as cancelled. `return_date` defaults to today.
    ///
    /// # Errors
    ///
    /// Same rules as [`RentalLifecycle::complete`].
    pub async fn cancel(
        &self,
        rental_id: RentalId,
        return_date: Option<NaiveDate>,
    ) -> Result<Rental> {
        let rental = self.close(rental_id, return_date, RentalStatus::Cancelled).await?;
        info!(rental = rental_id.as_i32(), "rental cancelled");
        Ok(rental)
    }

    async fn close(
        &self,
        rental_id: RentalId,
        return_date: Option<NaiveDate>,
        target: RentalStatus,
    ) -> Result<Rental> {
        let today = self.store.clock().today();
        let return_date = return_date.unwrap_or(today);

        with_transaction(self.store.pool(), |conn| {
            let rental = query::rental_by_id(conn, rental_id, today)?.ok_or(Error::NotFound {
                entity: "rental",
                id: rental_id.as_i32(),
            })?;

            // The domain transition validates state and dates before any
            // column is touched.
            let closed = match target {
                RentalStatus::Completed => rental.complete(return_date)?,
                RentalStatus::Cancelled => rental.cancel(return_date)?,
                RentalStatus::Active => unreachable!("close targets are terminal"),
            };

            query::close_rental(conn, rental_id, closed.status(), return_date)?;
            Ok(closed)
        })
    }
}
