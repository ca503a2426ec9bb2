//! SQLite persistence: pooled connections, embedded migrations, and the
//! store implementing the fleet ports.

pub mod connection;
pub mod model;
pub mod query;
pub mod schema;
pub mod store;

pub use connection::{create_pool, run_migrations, with_transaction, DbPool, MIGRATIONS};
pub use store::SqliteFleetStore;
