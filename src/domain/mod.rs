//! Construction-validated domain entities.
//!
//! Every entity refuses to exist in an invalid state: `try_new`
//! normalizes raw input, validates it, and either returns a fully valid
//! instance or a [`error::ValidationError`] naming the offending field.
//! Construction never performs I/O; identity and creation timestamps are
//! assigned by the storage layer on the explicit write path.

pub mod client;
pub mod clock;
pub mod error;
pub mod id;
pub mod maintenance;
pub mod rental;
pub mod vehicle;
