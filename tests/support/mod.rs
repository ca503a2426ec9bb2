//! Shared fixtures for integration tests.
//!
//! Tests run against a file-backed database in a temp directory so
//! several pooled connections see the same data, which an in-memory
//! SQLite database would not allow.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use fleetledger::adapter::sqlite::{create_pool, run_migrations, DbPool, SqliteFleetStore};
use fleetledger::domain::clock::FixedClock;

pub struct TestDb {
    _dir: TempDir,
    pub pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("fleet.db");
        let pool = create_pool(&path.to_string_lossy()).expect("create pool");
        run_migrations(&pool).expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn store(&self) -> SqliteFleetStore {
        SqliteFleetStore::new(self.pool.clone(), Arc::new(FixedClock::at(fixed_today())))
    }
}

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
