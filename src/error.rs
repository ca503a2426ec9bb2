use std::fmt;

use thiserror::Error;

use crate::domain::error::{DomainError, InvalidTransition, ValidationError};
use crate::domain::id::{ClientId, VehicleId};
use crate::domain::vehicle::VehicleStatus;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("could not determine a data directory for the database")]
    NoDataDir,
}

/// Which class of storage constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    Check,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unique => f.write_str("unique"),
            Self::ForeignKey => f.write_str("foreign-key"),
            Self::Check => f.write_str("check"),
        }
    }
}

/// A write the storage layer rejected to protect an invariant.
///
/// `constraint` carries the backend's message, which names the violated
/// constraint or index; the enclosing transaction has been rolled back
/// in full by the time this error is observed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} constraint violated: {constraint}")]
pub struct ConstraintViolation {
    /// Constraint class.
    pub kind: ConstraintKind,
    /// Backend message naming the constraint.
    pub constraint: String,
}

impl ConstraintViolation {
    /// True when the backend message names the given constraint or index.
    #[must_use]
    pub fn is_on(&self, name: &str) -> bool {
        self.constraint.contains(name)
    }
}

/// Rental lifecycle precondition failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The vehicle already has an open rental. Also produced when the
    /// partial unique constraint loses a start-rental race for us.
    #[error("vehicle {vehicle_id} already has an active rental")]
    VehicleAlreadyRented { vehicle_id: VehicleId },

    #[error("vehicle {vehicle_id} is unavailable ({status})")]
    VehicleUnavailable {
        vehicle_id: VehicleId,
        status: VehicleStatus,
    },

    #[error("client {client_id} is inactive")]
    ClientInactive { client_id: ClientId },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transition(#[from] InvalidTransition),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// Lock timeout or pool exhaustion; safe for the caller to retry.
    #[error("transient storage error: {0}")]
    Transient(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<DomainError> for Error {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(e) => Self::Validation(e),
            DomainError::Transition(e) => Self::Transition(e),
        }
    }
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match err {
            DieselError::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation => Self::Constraint(ConstraintViolation {
                        kind: ConstraintKind::Unique,
                        constraint: message,
                    }),
                    DatabaseErrorKind::ForeignKeyViolation => {
                        Self::Constraint(ConstraintViolation {
                            kind: ConstraintKind::ForeignKey,
                            constraint: message,
                        })
                    }
                    DatabaseErrorKind::CheckViolation => Self::Constraint(ConstraintViolation {
                        kind: ConstraintKind::Check,
                        constraint: message,
                    }),
                    _ if message.contains("database is locked")
                        || message.contains("database table is locked") =>
                    {
                        Self::Transient(message)
                    }
                    // Unknown storage errors are re-raised unchanged.
                    _ => Self::Database(message),
                }
            }
            other => Self::Database(other.to_string()),
        }
    }
}
