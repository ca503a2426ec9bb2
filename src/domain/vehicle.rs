//! Vehicle domain entity.
//!
//! A [`Vehicle`] is constructed through [`Vehicle::try_new`], which
//! normalizes raw input (trim, case-fold) before validating it, so an
//! invalid instance is never observable. Identity and creation timestamp
//! are assigned by the storage layer, not at construction.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::error::ValidationError;
use super::id::VehicleId;

/// Lowest model year accepted for any vehicle.
const MIN_YEAR: i32 = 1900;

/// Administrative state of a vehicle.
///
/// `None` at the entity level means the vehicle is available. "Rented" is
/// deliberately not a vehicle status: whether a vehicle is out is derived
/// from the existence of an active rental, which keeps a single source of
/// truth for the one-active-rental invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStatus {
    /// Vehicle is in the shop and cannot be rented.
    Maintenance,
    /// Vehicle has left the fleet and cannot be rented.
    Sold,
}

impl VehicleStatus {
    /// Canonical storage literal for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Maintenance => "maintenance",
            Self::Sold => "sold",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = ValidationError;

    /// Case-sensitive parse of the exact storage literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maintenance" => Ok(Self::Maintenance),
            "sold" => Ok(Self::Sold),
            other => Err(ValidationError::new(
                "status",
                format!("unknown vehicle status '{other}'"),
            )),
        }
    }
}

/// A vehicle in the rental fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    id: Option<VehicleId>,
    license_plate: String,
    brand: String,
    model: String,
    year: i32,
    daily_rate: Decimal,
    status: Option<VehicleStatus>,
    created_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// Build a validated vehicle from raw field values.
    ///
    /// Normalization happens first: the license plate is trimmed and
    /// upper-cased, brand and model are trimmed and title-cased. `today`
    /// anchors the year upper bound (`year <= today.year() + 1`).
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field if the
    /// plate is empty, the year is out of range, or the daily rate is not
    /// positive.
    pub fn try_new(
        license_plate: &str,
        brand: &str,
        model: &str,
        year: i32,
        daily_rate: Decimal,
        status: Option<VehicleStatus>,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let license_plate = license_plate.trim().to_uppercase();
        let brand = title_case(brand);
        let model = title_case(model);

        if license_plate.is_empty() {
            return Err(ValidationError::new("license_plate", "cannot be empty"));
        }
        let max_year = today.year() + 1;
        if year < MIN_YEAR || year > max_year {
            return Err(ValidationError::new(
                "year",
                format!("must be between {MIN_YEAR} and {max_year}, got {year}"),
            ));
        }
        if daily_rate <= Decimal::ZERO {
            return Err(ValidationError::new(
                "daily_rate",
                format!("must be greater than zero, got {daily_rate}"),
            ));
        }

        Ok(Self {
            id: None,
            license_plate,
            brand,
            model,
            year,
            daily_rate,
            status,
            created_at: None,
        })
    }

    /// Rebuild a persisted vehicle from storage, re-running validation.
    pub(crate) fn restore(
        id: VehicleId,
        license_plate: &str,
        brand: &str,
        model: &str,
        year: i32,
        daily_rate: Decimal,
        status: Option<VehicleStatus>,
        created_at: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let vehicle = Self::try_new(license_plate, brand, model, year, daily_rate, status, today)?;
        Ok(vehicle.with_identity(id, created_at))
    }

    /// Attach the storage-assigned identity and creation timestamp.
    #[must_use]
    pub(crate) fn with_identity(mut self, id: VehicleId, created_at: DateTime<Utc>) -> Self {
        self.id = Some(id);
        self.created_at = Some(created_at);
        self
    }

    /// Storage-assigned identity, if the vehicle has been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<VehicleId> {
        self.id
    }

    /// Normalized (upper-case) license plate.
    #[must_use]
    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    /// Normalized (title-case) brand.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Normalized (title-case) model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Model year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Rental rate per day.
    #[must_use]
    pub const fn daily_rate(&self) -> Decimal {
        self.daily_rate
    }

    /// Administrative status; `None` means available.
    #[must_use]
    pub const fn status(&self) -> Option<VehicleStatus> {
        self.status
    }

    /// Creation timestamp, set once by the write path.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// True when the vehicle can take a new rental (no blocking status).
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.status.is_none()
    }
}

/// Trim, collapse inner whitespace, and capitalize each word.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn try_new_normalizes_plate_brand_and_model() {
        let vehicle =
            Vehicle::try_new("ab123cd", "toyota", "camry", 2020, dec!(50.0), None, today())
                .unwrap();

        assert_eq!(vehicle.license_plate(), "AB123CD");
        assert_eq!(vehicle.brand(), "Toyota");
        assert_eq!(vehicle.model(), "Camry");
        assert_eq!(vehicle.year(), 2020);
        assert_eq!(vehicle.daily_rate(), dec!(50.0));
        assert!(vehicle.is_available());
        assert!(vehicle.id().is_none());
        assert!(vehicle.created_at().is_none());
    }

    #[test]
    fn try_new_trims_and_lowercases_mixed_case_words() {
        let vehicle = Vehicle::try_new(
            "  xy99z  ",
            "  LAND  rover ",
            "RANGE rover",
            2021,
            dec!(120),
            None,
            today(),
        )
        .unwrap();

        assert_eq!(vehicle.license_plate(), "XY99Z");
        assert_eq!(vehicle.brand(), "Land Rover");
        assert_eq!(vehicle.model(), "Range Rover");
    }

    #[test]
    fn try_new_rejects_empty_plate() {
        let err =
            Vehicle::try_new("   ", "toyota", "camry", 2020, dec!(50), None, today()).unwrap_err();
        assert_eq!(err.field, "license_plate");
    }

    #[test]
    fn try_new_rejects_year_below_1900() {
        let err =
            Vehicle::try_new("AB1", "ford", "model t", 1899, dec!(10), None, today()).unwrap_err();
        assert_eq!(err.field, "year");
    }

    #[test]
    fn year_upper_bound_follows_the_clock() {
        // today + 1 year is the last acceptable model year
        let at_bound = Vehicle::try_new("AB1", "kia", "rio", 2025, dec!(30), None, today());
        assert!(at_bound.is_ok());

        let past_bound =
            Vehicle::try_new("AB1", "kia", "rio", 2026, dec!(30), None, today()).unwrap_err();
        assert_eq!(past_bound.field, "year");

        // with a later clock the same year becomes valid
        let later = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(Vehicle::try_new("AB1", "kia", "rio", 2026, dec!(30), None, later).is_ok());
    }

    #[test]
    fn try_new_rejects_non_positive_daily_rate() {
        let zero =
            Vehicle::try_new("AB1", "kia", "rio", 2020, dec!(0), None, today()).unwrap_err();
        assert_eq!(zero.field, "daily_rate");

        let negative =
            Vehicle::try_new("AB1", "kia", "rio", 2020, dec!(-5), None, today()).unwrap_err();
        assert_eq!(negative.field, "daily_rate");
    }

    #[test]
    fn status_parses_exact_literals_only() {
        assert_eq!(
            "maintenance".parse::<VehicleStatus>().unwrap(),
            VehicleStatus::Maintenance
        );
        assert_eq!("sold".parse::<VehicleStatus>().unwrap(), VehicleStatus::Sold);

        // case-sensitive: no fuzzy matching of status literals
        assert!("Maintenance".parse::<VehicleStatus>().is_err());
        assert!("SOLD".parse::<VehicleStatus>().is_err());
        assert!("rented".parse::<VehicleStatus>().is_err());
    }

    #[test]
    fn blocking_status_makes_vehicle_unavailable() {
        let vehicle = Vehicle::try_new(
            "AB1",
            "kia",
            "rio",
            2020,
            dec!(30),
            Some(VehicleStatus::Maintenance),
            today(),
        )
        .unwrap();

        assert!(!vehicle.is_available());
        assert_eq!(vehicle.status(), Some(VehicleStatus::Maintenance));
    }

    #[test]
    fn with_identity_sets_id_and_timestamp() {
        let vehicle =
            Vehicle::try_new("AB1", "kia", "rio", 2020, dec!(30), None, today()).unwrap();
        let persisted = vehicle.with_identity(VehicleId::new(4), Utc::now());

        assert_eq!(persisted.id(), Some(VehicleId::new(4)));
        assert!(persisted.created_at().is_some());
    }

    #[test]
    fn title_case_handles_empty_and_single_char() {
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("a"), "A");
        assert_eq!(title_case("bMW"), "Bmw");
    }
}
