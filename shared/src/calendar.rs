//! Calendar-day bucketing
//!
//! All date filtering in the stores compares whole calendar days. Ranges are
//! inclusive on both ends.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// First day of the week, per locale convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

/// Get the first day of the week containing `date`
pub fn week_start(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let weekday = date.weekday();
    let offset = match week_start {
        WeekStart::Monday => weekday.num_days_from_monday(),
        WeekStart::Sunday => weekday.num_days_from_sunday(),
    };
    date - Days::new(u64::from(offset))
}

/// The seven days of the week containing `date`
pub fn week_range(date: NaiveDate, start: WeekStart) -> DateRange {
    let first = week_start(date, start);
    DateRange {
        start: first,
        end: first + Days::new(6),
    }
}

/// The full calendar month containing `date`
pub fn month_range(date: NaiveDate) -> DateRange {
    let first = date - Days::new(u64::from(date.day0()));
    let end = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    DateRange { start: first, end }
}
