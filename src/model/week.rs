use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use super::interval::midnight;

pub const DAYS_IN_WEEK: usize = 7;

/// The visible window: seven consecutive days starting on a Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Week {
    start: NaiveDate,
}

impl Week {
    /// The week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let back = date.weekday().num_days_from_monday() as i64;
        Self {
            start: date - Duration::days(back),
        }
    }

    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last visible day (inclusive).
    pub fn last_day(&self) -> NaiveDate {
        self.start + Duration::days(DAYS_IN_WEEK as i64 - 1)
    }

    pub fn start_instant(&self) -> NaiveDateTime {
        midnight(self.start)
    }

    /// Midnight after the last visible day.
    pub fn end_exclusive(&self) -> NaiveDateTime {
        midnight(self.start + Duration::days(DAYS_IN_WEEK as i64))
    }

    pub fn days(&self) -> [NaiveDate; DAYS_IN_WEEK] {
        std::array::from_fn(|i| self.start + Duration::days(i as i64))
    }

    /// Day at a (possibly out of range) index.
    pub fn day(&self, idx: i64) -> NaiveDate {
        self.start + Duration::days(idx)
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.last_day()
    }

    pub fn next(&self) -> Self {
        Self {
            start: self.start + Duration::days(DAYS_IN_WEEK as i64),
        }
    }

    pub fn prev(&self) -> Self {
        Self {
            start: self.start - Duration::days(DAYS_IN_WEEK as i64),
        }
    }
}
