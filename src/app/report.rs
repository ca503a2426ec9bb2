//! Fleet summary report, serializable to JSON.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::rental::{Rental, RentalStatus};
use crate::domain::vehicle::{Vehicle, VehicleStatus};
use crate::error::Result;
use crate::port::store::{ClientStore, FleetStore, MaintenanceStore, RentalStore, VehicleStore};

#[derive(Debug, Serialize)]
pub struct VehicleSummary {
    pub total: usize,
    pub available: usize,
    pub rented: usize,
    pub maintenance: usize,
    pub sold: usize,
}

#[derive(Debug, Serialize)]
pub struct ClientSummary {
    pub total: usize,
    pub active: usize,
}

#[derive(Debug, Serialize)]
pub struct RentalSummary {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub cancelled: usize,
}

#[derive(Debug, Serialize)]
pub struct MaintenanceSummary {
    pub total: usize,
    pub total_cost: Decimal,
}

/// Point-in-time snapshot of the whole fleet.
#[derive(Debug, Serialize)]
pub struct FleetReport {
    pub generated_at: DateTime<Utc>,
    pub vehicles: VehicleSummary,
    pub clients: ClientSummary,
    pub rentals: RentalSummary,
    pub maintenance: MaintenanceSummary,
}

impl FleetReport {
    /// Assemble the report from the store's current contents.
    ///
    /// A vehicle counts as rented when it has an active rental; the
    /// administrative statuses are counted independently of that.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from the underlying reads.
    pub async fn generate<S: FleetStore>(store: &S, generated_at: DateTime<Utc>) -> Result<Self> {
        let vehicles = VehicleStore::list(store).await?;
        let clients = ClientStore::list(store).await?;
        let rentals = RentalStore::list(store).await?;
        let maintenance = MaintenanceStore::list(store).await?;

        Ok(Self {
            generated_at,
            vehicles: summarize_vehicles(&vehicles, &rentals),
            clients: summarize_clients(&clients),
            rentals: summarize_rentals(&rentals),
            maintenance: summarize_maintenance(&maintenance),
        })
    }
}

fn summarize_vehicles(vehicles: &[Vehicle], rentals: &[Rental]) -> VehicleSummary {
    let rented = vehicles
        .iter()
        .filter(|v| {
            rentals
                .iter()
                .any(|r| r.is_active() && Some(r.vehicle_id()) == v.id())
        })
        .count();

    VehicleSummary {
        total: vehicles.len(),
        available: vehicles.iter().filter(|v| v.is_available()).count(),
        rented,
        maintenance: vehicles
            .iter()
            .filter(|v| v.status() == Some(VehicleStatus::Maintenance))
            .count(),
        sold: vehicles
            .iter()
            .filter(|v| v.status() == Some(VehicleStatus::Sold))
            .count(),
    }
}

fn summarize_clients(clients: &[Client]) -> ClientSummary {
    ClientSummary {
        total: clients.len(),
        active: clients.iter().filter(|c| c.is_active()).count(),
    }
}

fn summarize_rentals(rentals: &[Rental]) -> RentalSummary {
    let by_status = |status: RentalStatus| rentals.iter().filter(|r| r.status() == status).count();
    RentalSummary {
        total: rentals.len(),
        active: by_status(RentalStatus::Active),
        completed: by_status(RentalStatus::Completed),
        cancelled: by_status(RentalStatus::Cancelled),
    }
}

fn summarize_maintenance(records: &[MaintenanceRecord]) -> MaintenanceSummary {
    MaintenanceSummary {
        total: records.len(),
        total_cost: records.iter().map(MaintenanceRecord::cost).sum(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapter::sqlite::connection::test_pool;
    use crate::adapter::sqlite::SqliteFleetStore;
    use crate::app::lifecycle::RentalLifecycle;
    use crate::domain::client::ClientStatus;
    use crate::domain::clock::FixedClock;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[tokio::test]
    async fn empty_fleet_report_is_all_zeroes() {
        let store = SqliteFleetStore::new(test_pool(), Arc::new(FixedClock::at(today())));
        let report = FleetReport::generate(&store, store.clock().now()).await.unwrap();

        assert_eq!(report.vehicles.total, 0);
        assert_eq!(report.clients.total, 0);
        assert_eq!(report.rentals.total, 0);
        assert_eq!(report.maintenance.total_cost, Decimal::ZERO);
    }

    #[tokio::test]
    async fn report_counts_statuses_and_serializes() {
        let store = SqliteFleetStore::new(test_pool(), Arc::new(FixedClock::at(today())));
        let lifecycle = RentalLifecycle::new(store.clone());

        let v1 = Vehicle::try_new("AB1", "kia", "rio", 2020, dec!(30), None, today()).unwrap();
        let v1 = VehicleStore::insert(&store, &v1).await.unwrap();
        let v2 = Vehicle::try_new(
            "AB2",
            "kia",
            "rio",
            2021,
            dec!(35),
            Some(VehicleStatus::Maintenance),
            today(),
        )
        .unwrap();
        VehicleStore::insert(&store, &v2).await.unwrap();

        let client = crate::domain::client::Client::try_new(
            "Ana",
            "Pop",
            "a@x.ro",
            None,
            None,
            ClientStatus::Active,
        )
        .unwrap();
        let client = ClientStore::insert(&store, &client).await.unwrap();

        lifecycle
            .start(v1.id().unwrap(), client.id().unwrap(), None)
            .await
            .unwrap();

        let record = MaintenanceRecord::try_new(
            v1.id().unwrap(),
            "oil change",
            dec!(49.90),
            today(),
            None,
            today(),
        )
        .unwrap();
        MaintenanceStore::insert(&store, &record).await.unwrap();

        let report = FleetReport::generate(&store, store.clock().now()).await.unwrap();

        assert_eq!(report.vehicles.total, 2);
        assert_eq!(report.vehicles.available, 1);
        assert_eq!(report.vehicles.rented, 1);
        assert_eq!(report.vehicles.maintenance, 1);
        assert_eq!(report.rentals.active, 1);
        assert_eq!(report.maintenance.total_cost, dec!(49.90));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["vehicles"]["rented"], 1);
        assert_eq!(json["rentals"]["active"], 1);
    }
}
