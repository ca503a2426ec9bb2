//! Maintenance record domain entity.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::error::ValidationError;
use super::id::{MaintenanceId, VehicleId};

/// A single maintenance event on a vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceRecord {
    id: Option<MaintenanceId>,
    vehicle_id: VehicleId,
    description: String,
    cost: Decimal,
    maintenance_date: NaiveDate,
    duration_days: Option<i32>,
    created_at: Option<DateTime<Utc>>,
}

impl MaintenanceRecord {
    /// Build a validated maintenance record from raw field values.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field if the
    /// vehicle id is not positive, the description is empty after
    /// trimming, the cost is negative, the date is in the future, or a
    /// supplied duration is not positive.
    pub fn try_new(
        vehicle_id: VehicleId,
        description: &str,
        cost: Decimal,
        maintenance_date: NaiveDate,
        duration_days: Option<i32>,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let description = description.trim().to_string();

        if vehicle_id.as_i32() <= 0 {
            return Err(ValidationError::new(
                "vehicle_id",
                format!("must be positive, got {vehicle_id}"),
            ));
        }
        if description.is_empty() {
            return Err(ValidationError::new("description", "cannot be empty"));
        }
        if cost < Decimal::ZERO {
            return Err(ValidationError::new(
                "cost",
                format!("cannot be negative, got {cost}"),
            ));
        }
        if maintenance_date > today {
            return Err(ValidationError::new(
                "maintenance_date",
                "cannot be in the future",
            ));
        }
        if let Some(days) = duration_days {
            if days <= 0 {
                return Err(ValidationError::new(
                    "duration_days",
                    format!("must be positive, got {days}"),
                ));
            }
        }

        Ok(Self {
            id: None,
            vehicle_id,
            description,
            cost,
            maintenance_date,
            duration_days,
            created_at: None,
        })
    }

    /// Rebuild a persisted record from storage, re-running validation.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        id: MaintenanceId,
        vehicle_id: VehicleId,
        description: &str,
        cost: Decimal,
        maintenance_date: NaiveDate,
        duration_days: Option<i32>,
        created_at: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let record = Self::try_new(
            vehicle_id,
            description,
            cost,
            maintenance_date,
            duration_days,
            today,
        )?;
        Ok(record.with_identity(id, created_at))
    }

    /// Attach the storage-assigned identity and creation timestamp.
    #[must_use]
    pub(crate) fn with_identity(mut self, id: MaintenanceId, created_at: DateTime<Utc>) -> Self {
        self.id = Some(id);
        self.created_at = Some(created_at);
        self
    }

    /// Storage-assigned identity, if the record has been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<MaintenanceId> {
        self.id
    }

    /// Vehicle this record belongs to.
    #[must_use]
    pub const fn vehicle_id(&self) -> VehicleId {
        self.vehicle_id
    }

    /// Trimmed description of the work done.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Cost of the work.
    #[must_use]
    pub const fn cost(&self) -> Decimal {
        self.cost
    }

    /// Day the work happened.
    #[must_use]
    pub const fn maintenance_date(&self) -> NaiveDate {
        self.maintenance_date
    }

    /// How many days the vehicle was held, if recorded.
    #[must_use]
    pub const fn duration_days(&self) -> Option<i32> {
        self.duration_days
    }

    /// Creation timestamp, set once by the write path.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn try_new_trims_description() {
        let record = MaintenanceRecord::try_new(
            VehicleId::new(1),
            "  oil change  ",
            dec!(49.90),
            today(),
            Some(1),
            today(),
        )
        .unwrap();

        assert_eq!(record.description(), "oil change");
        assert_eq!(record.cost(), dec!(49.90));
        assert_eq!(record.duration_days(), Some(1));
    }

    #[test]
    fn try_new_rejects_non_positive_vehicle_id() {
        let err = MaintenanceRecord::try_new(
            VehicleId::new(0),
            "oil change",
            dec!(10),
            today(),
            None,
            today(),
        )
        .unwrap_err();
        assert_eq!(err.field, "vehicle_id");
    }

    #[test]
    fn try_new_rejects_blank_description() {
        let err =
            MaintenanceRecord::try_new(VehicleId::new(1), " \t ", dec!(10), today(), None, today())
                .unwrap_err();
        assert_eq!(err.field, "description");
    }

    #[test]
    fn zero_cost_is_allowed_but_negative_is_not() {
        assert!(MaintenanceRecord::try_new(
            VehicleId::new(1),
            "warranty work",
            dec!(0),
            today(),
            None,
            today(),
        )
        .is_ok());

        let err = MaintenanceRecord::try_new(
            VehicleId::new(1),
            "oil change",
            dec!(-1),
            today(),
            None,
            today(),
        )
        .unwrap_err();
        assert_eq!(err.field, "cost");
    }

    #[test]
    fn try_new_rejects_future_date() {
        let future = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        let err = MaintenanceRecord::try_new(
            VehicleId::new(1),
            "oil change",
            dec!(10),
            future,
            None,
            today(),
        )
        .unwrap_err();
        assert_eq!(err.field, "maintenance_date");
    }

    #[test]
    fn try_new_rejects_non_positive_duration() {
        let err = MaintenanceRecord::try_new(
            VehicleId::new(1),
            "oil change",
            dec!(10),
            today(),
            Some(0),
            today(),
        )
        .unwrap_err();
        assert_eq!(err.field, "duration_days");
    }
}
