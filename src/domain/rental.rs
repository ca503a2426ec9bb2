//! Rental domain entity and its state machine.
//!
//! A rental moves through a small state machine:
//!
//! ```text
//! (none) --start--> active --complete--> completed
//!                     \
//!                      ----cancel-----> cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal. The cross-field invariant is
//! that a rental is active if and only if it has no return date; closing
//! produces a new validated instance rather than mutating in place.
//! "At most one active rental per vehicle" is a global invariant the
//! storage layer enforces; this type only guarantees per-instance rules.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use super::error::{DomainError, InvalidTransition, ValidationError};
use super::id::{ClientId, RentalId, VehicleId};

/// Lifecycle state of a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalStatus {
    /// Vehicle is out; no return date recorded.
    Active,
    /// Vehicle came back; terminal.
    Completed,
    /// Rental was called off; terminal.
    Cancelled,
}

impl RentalStatus {
    /// Canonical storage literal for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// True for the terminal states.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentalStatus {
    type Err = ValidationError;

    /// Case-sensitive parse of the exact storage literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ValidationError::new(
                "status",
                format!("unknown rental status '{other}'"),
            )),
        }
    }
}

/// One rental of one vehicle by one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rental {
    id: Option<RentalId>,
    vehicle_id: VehicleId,
    client_id: ClientId,
    rental_date: NaiveDate,
    return_date: Option<NaiveDate>,
    status: RentalStatus,
    created_at: Option<DateTime<Utc>>,
}

impl Rental {
    /// Build a validated rental from raw field values.
    ///
    /// `today` anchors the "rental date is not in the future" check.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field when an id
    /// is not positive, the rental date is in the future, or the return
    /// date contradicts the status (present while active, missing while
    /// closed, or before the rental date).
    pub fn try_new(
        vehicle_id: VehicleId,
        client_id: ClientId,
        rental_date: NaiveDate,
        return_date: Option<NaiveDate>,
        status: RentalStatus,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if vehicle_id.as_i32() <= 0 {
            return Err(ValidationError::new(
                "vehicle_id",
                format!("must be positive, got {vehicle_id}"),
            ));
        }
        if client_id.as_i32() <= 0 {
            return Err(ValidationError::new(
                "client_id",
                format!("must be positive, got {client_id}"),
            ));
        }
        if rental_date > today {
            return Err(ValidationError::new("rental_date", "cannot be in the future"));
        }
        match (status, return_date) {
            (RentalStatus::Active, Some(_)) => {
                return Err(ValidationError::new(
                    "return_date",
                    "must be absent while the rental is active",
                ));
            }
            (RentalStatus::Completed | RentalStatus::Cancelled, None) => {
                return Err(ValidationError::new(
                    "return_date",
                    format!("must be set when status is {status}"),
                ));
            }
            (_, Some(returned)) if returned < rental_date => {
                return Err(ValidationError::new(
                    "return_date",
                    format!("cannot be before rental date {rental_date}"),
                ));
            }
            _ => {}
        }

        Ok(Self {
            id: None,
            vehicle_id,
            client_id,
            rental_date,
            return_date,
            status,
            created_at: None,
        })
    }

    /// Build a new active rental (the only way a rental starts).
    ///
    /// # Errors
    ///
    /// Same rules as [`Rental::try_new`].
    pub fn open(
        vehicle_id: VehicleId,
        client_id: ClientId,
        rental_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Self::try_new(vehicle_id, client_id, rental_date, None, RentalStatus::Active, today)
    }

    /// Transition `active -> completed`, recording the return date.
    ///
    /// # Errors
    ///
    /// [`InvalidTransition`] if the rental is not active;
    /// [`ValidationError`] if `return_date` precedes the rental date.
    /// Both fail before any storage write.
    pub fn complete(&self, return_date: NaiveDate) -> Result<Self, DomainError> {
        self.close(RentalStatus::Completed, return_date)
    }

    /// Transition `active -> cancelled`, recording the return date.
    ///
    /// # Errors
    ///
    /// Same rules as [`Rental::complete`].
    pub fn cancel(&self, return_date: NaiveDate) -> Result<Self, DomainError> {
        self.close(RentalStatus::Cancelled, return_date)
    }

    fn close(&self, attempted: RentalStatus, return_date: NaiveDate) -> Result<Self, DomainError> {
        if self.status != RentalStatus::Active {
            return Err(InvalidTransition {
                from: self.status,
                attempted,
            }
            .into());
        }
        if return_date < self.rental_date {
            return Err(ValidationError::new(
                "return_date",
                format!("cannot be before rental date {}", self.rental_date),
            )
            .into());
        }

        // All per-instance invariants hold by construction here.
        Ok(Self {
            status: attempted,
            return_date: Some(return_date),
            ..self.clone()
        })
    }

    /// Rebuild a persisted rental from storage, re-running validation.
    pub(crate) fn restore(
        id: RentalId,
        vehicle_id: VehicleId,
        client_id: ClientId,
        rental_date: NaiveDate,
        return_date: Option<NaiveDate>,
        status: RentalStatus,
        created_at: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let rental = Self::try_new(vehicle_id, client_id, rental_date, return_date, status, today)?;
        Ok(rental.with_identity(id, created_at))
    }

    /// Attach the storage-assigned identity and creation timestamp.
    #[must_use]
    pub(crate) fn with_identity(mut self, id: RentalId, created_at: DateTime<Utc>) -> Self {
        self.id = Some(id);
        self.created_at = Some(created_at);
        self
    }

    /// Storage-assigned identity, if the rental has been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<RentalId> {
        self.id
    }

    /// Vehicle being rented.
    #[must_use]
    pub const fn vehicle_id(&self) -> VehicleId {
        self.vehicle_id
    }

    /// Renting client.
    #[must_use]
    pub const fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Day the rental started.
    #[must_use]
    pub const fn rental_date(&self) -> NaiveDate {
        self.rental_date
    }

    /// Day the vehicle came back, if the rental is closed.
    #[must_use]
    pub const fn return_date(&self) -> Option<NaiveDate> {
        self.return_date
    }

    /// Lifecycle status.
    #[must_use]
    pub const fn status(&self) -> RentalStatus {
        self.status
    }

    /// Creation timestamp, set once by the write path.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// True while the vehicle is out.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == RentalStatus::Active
    }
}
