//! Fleetledger - vehicle rental fleet tracking backed by SQLite.
//!
//! The crate keeps a small hexagonal shape: validated domain entities,
//! port traits for persistence, and a SQLite adapter behind them.
//!
//! # Architecture
//!
//! - **`domain`** - Entities constructed through validating `try_new`
//!   constructors, so an invalid instance is never observable
//!   - `Vehicle`, `Client`, `MaintenanceRecord` - fleet records
//!   - `Rental` - the lifecycle state machine (active, completed,
//!     cancelled)
//! - **`port`** - Trait seams the application core talks through
//! - **`adapter::sqlite`** - Pooled connections, embedded migrations,
//!   and the store; the partial unique index on active rentals is the
//!   authoritative guard against double-booking a vehicle
//! - **`app`** - Lifecycle orchestration, CSV import, and the fleet
//!   report
//! - **`cli`** - The `fleetledger` command-line surface
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Validated fleet entities and the rental state machine
//! - [`error`] - Error types for the crate
//! - [`port`] - Persistence trait definitions
//! - [`adapter`] - SQLite implementation of the ports
//! - [`app`] - Application services over the ports
//! - [`cli`] - Command definitions and dispatch

pub mod adapter;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
