//! Calendar clock
//!
//! Source of "today" for every date-bucketed view and of creation
//! timestamps.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use std::cell::Cell;

pub trait Clock {
    /// Current local calendar day
    fn today(&self) -> NaiveDate;

    /// Current instant, used for creation and export timestamps
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a given day, adjustable between calls
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    /// Pin to `today`, with `now` at noon UTC of the same day
    pub fn on(today: NaiveDate) -> Self {
        Self {
            today: Cell::new(today),
            now: Cell::new(noon(today)),
        }
    }

    pub fn set_today(&self, today: NaiveDate) {
        self.today.set(today);
        self.now.set(noon(today));
    }
}

fn noon(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN + chrono::Duration::hours(12)).and_utc()
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
