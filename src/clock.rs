//! Wall-clock access and calendar helpers.
//!
//! Deadlines are compared against local wall-clock time. Nothing in the crate
//! reads the system clock except [`SystemClock`], so tests pin time with
//! [`FixedClock`].

use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use std::sync::{Mutex, PoisonError};

/// Source of the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// The machine's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The next date falling on `weekday`, strictly after `today`.
///
/// When today already is that weekday the result is one week out.
pub fn next_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let target = i64::from(weekday.num_days_from_monday());
    let current = i64::from(today.weekday().num_days_from_monday());
    let mut days_ahead = target - current;
    if days_ahead <= 0 {
        days_ahead += 7;
    }
    today + Days::new(days_ahead.unsigned_abs())
}

/// Parses an English weekday name ("Monday", "mon", ...), ignoring case and
/// surrounding whitespace.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    name.trim().parse().ok()
}
