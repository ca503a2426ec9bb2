//! Outbound adapters implementing the port traits.

pub mod sqlite;
