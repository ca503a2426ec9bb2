//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and the scoped
//! transaction used by every write path. Foreign-key enforcement is off
//! by default in SQLite and scoped per connection, so it is switched on
//! for every connection the pool hands out.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// How long a connection waits on a locked database before giving up.
/// A timeout surfaces as `Error::Transient`, retryable by the caller.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Per-connection pragmas applied on every pool acquisition.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given database URL.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(10)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool
        .get()
        .map_err(|e| Error::Connection(e.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(e.to_string()))?;
    Ok(())
}

/// Run `f` against a pooled connection inside one transaction.
///
/// The transaction is opened with `BEGIN IMMEDIATE` so concurrent writers
/// serialize at transaction start instead of deadlocking on a later lock
/// upgrade. Commit happens on `Ok`, rollback on any `Err`; the connection
/// returns to the pool on every exit path.
///
/// # Errors
///
/// Pool acquisition timeouts surface as `Error::Transient`; errors from
/// `f` propagate unchanged after the rollback.
pub fn with_transaction<T, F>(pool: &DbPool, f: F) -> Result<T>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T>,
{
    let mut conn = pool.get().map_err(|e| Error::Transient(e.to_string()))?;
    conn.immediate_transaction(f)
}

/// Build a single-connection in-memory pool with the schema applied.
///
/// One connection is mandatory for `:memory:` databases: every new
/// connection would otherwise see its own empty database.
#[cfg(test)]
pub(crate) fn test_pool() -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    let pool = Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .expect("build in-memory pool");
    run_migrations(&pool).expect("run migrations");
    pool
}
