//! Time source abstraction.
//!
//! Validation rules that depend on "now" (the vehicle year upper bound,
//! the no-future-dates checks) take their reference point from a [`Clock`]
//! so tests can pin time instead of racing the wall clock.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Source of the current date and time.
pub trait Clock: Send + Sync {
    /// The current calendar date (UTC).
    fn today(&self) -> NaiveDate;

    /// The current instant (UTC).
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Pin the clock to the given instant.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Pin the clock to midnight UTC on the given date.
    #[must_use]
    pub fn at(date: NaiveDate) -> Self {
        Self {
            now: Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default()),
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
