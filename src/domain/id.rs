//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Vehicle identifier - newtype for type safety.
///
/// The inner value is private so all construction goes through the
/// defined constructors. Identifiers are assigned by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(i32);

impl VehicleId {
    /// Create a new `VehicleId` from a raw integer.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for VehicleId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// Client identifier - newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(i32);

impl ClientId {
    /// Create a new `ClientId` from a raw integer.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ClientId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// Rental identifier - newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RentalId(i32);

impl RentalId {
    /// Create a new `RentalId` from a raw integer.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RentalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for RentalId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// Maintenance record identifier - newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaintenanceId(i32);

impl MaintenanceId {
    /// Create a new `MaintenanceId` from a raw integer.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for MaintenanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for MaintenanceId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_roundtrip_raw_value() {
        assert_eq!(VehicleId::new(7).as_i32(), 7);
        assert_eq!(ClientId::from(3).as_i32(), 3);
        assert_eq!(RentalId::new(11).as_i32(), 11);
        assert_eq!(MaintenanceId::new(2).as_i32(), 2);
    }

    #[test]
    fn ids_display_as_plain_integers() {
        assert_eq!(VehicleId::new(42).to_string(), "42");
        assert_eq!(RentalId::new(1).to_string(), "1");
    }
}
