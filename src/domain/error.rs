//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors and the rental
//! state transitions. A failed construction never yields a partially
//! built entity, and none of these errors involve any I/O.

use thiserror::Error;

use super::rental::RentalStatus;

/// A field value that violates a documented bound.
///
/// Carries the offending field name so callers (and tests) can tell
/// exactly which rule was broken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// Name of the field that failed validation.
    pub field: &'static str,
    /// Human-readable description of the violated rule.
    pub reason: String,
}

impl ValidationError {
    /// Create a validation error for the given field.
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// A rental state machine misuse.
///
/// Completed and cancelled rentals are terminal; any further transition
/// attempt fails with this error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("rental is {from}, cannot transition to {attempted}")]
pub struct InvalidTransition {
    /// The rental's current status.
    pub from: RentalStatus,
    /// The status the caller tried to move to.
    pub attempted: RentalStatus,
}

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transition(#[from] InvalidTransition),
}
