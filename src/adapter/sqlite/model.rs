//! Database row types for Diesel ORM.
//!
//! Each autoincrement table gets a queryable row plus a separate
//! insertable `New*Row` without the id column. Dates and timestamps are
//! stored as text (`%Y-%m-%d` and RFC 3339); money columns are stored as
//! canonical decimal strings so round-trips are exact.

use diesel::prelude::*;

use super::schema::{client, maintenance_record, rental, vehicle};

/// Database row for a vehicle.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = vehicle)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VehicleRow {
    pub id: i32,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub daily_rate: String,
    pub status: Option<String>,
    pub created_at: String,
}

/// Database row for a vehicle (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = vehicle)]
pub struct NewVehicleRow {
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub daily_rate: String,
    pub status: Option<String>,
    pub created_at: String,
}

/// Database row for a client.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = client)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClientRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub status: i32,
    pub created_at: String,
}

/// Database row for a client (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = client)]
pub struct NewClientRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub status: i32,
    pub created_at: String,
}

/// Database row for a rental.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = rental)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RentalRow {
    pub id: i32,
    pub vehicle_id: i32,
    pub client_id: i32,
    pub rental_date: String,
    pub return_date: Option<String>,
    pub status: String,
    pub created_at: String,
}

/// Database row for a rental (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = rental)]
pub struct NewRentalRow {
    pub vehicle_id: i32,
    pub client_id: i32,
    pub rental_date: String,
    pub return_date: Option<String>,
    pub status: String,
    pub created_at: String,
}

/// Database row for a maintenance record.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = maintenance_record)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MaintenanceRow {
    pub id: i32,
    pub vehicle_id: i32,
    pub description: String,
    pub cost: String,
    pub maintenance_date: String,
    pub duration_days: Option<i32>,
    pub created_at: String,
}

/// Database row for a maintenance record (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = maintenance_record)]
pub struct NewMaintenanceRow {
    pub vehicle_id: i32,
    pub description: String,
    pub cost: String,
    pub maintenance_date: String,
    pub duration_days: Option<i32>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::sqlite::connection::test_pool;

    #[test]
    fn vehicle_row_roundtrip_with_db() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();

        let row = NewVehicleRow {
            license_plate: "AB123CD".to_string(),
            brand: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2020,
            daily_rate: "50.0".to_string(),
            status: None,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        };

        diesel::insert_into(vehicle::table)
            .values(&row)
            .execute(&mut conn)
            .unwrap();

        let loaded: VehicleRow = vehicle::table.first(&mut conn).unwrap();
        assert_eq!(loaded.license_plate, "AB123CD");
        assert_eq!(loaded.year, 2020);
        assert_eq!(loaded.daily_rate, "50.0");
        assert!(loaded.status.is_none());
    }

    #[test]
    fn rental_row_requires_existing_vehicle_and_client() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();

        let row = NewRentalRow {
            vehicle_id: 99,
            client_id: 99,
            rental_date: "2024-06-10".to_string(),
            return_date: None,
            status: "active".to_string(),
            created_at: "2024-06-10T00:00:00+00:00".to_string(),
        };

        let result = diesel::insert_into(rental::table)
            .values(&row)
            .execute(&mut conn);
        assert!(result.is_err(), "dangling foreign keys must be rejected");
    }
}
