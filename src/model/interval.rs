//! Pure date/interval helpers shared by layout and drag handling.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// A closed `[start, end]` span of wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// `start < end`. Zero-length spans are invalid.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Both ends moved by the same number of whole days.
    pub fn shifted_days(&self, days: i64) -> Self {
        let delta = Duration::days(days);
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// Last calendar day the span covers. An end exactly at midnight covers
    /// the previous day only, so a task ending "Tue 00:00" stops on Monday.
    pub fn last_day(&self) -> NaiveDate {
        let end_day = self.end.date();
        if self.end > self.start && self.end == midnight(end_day) {
            end_day.pred_opt().unwrap_or(end_day)
        } else {
            end_day
        }
    }
}

/// Inclusive on both ends: spans that merely touch count as overlapping.
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.start <= b.end && a.end >= b.start
}

/// Clip a span to the visible window for display purposes.
pub fn clamp_to_window(
    interval: &Interval,
    window_start: NaiveDateTime,
    window_end_exclusive: NaiveDateTime,
) -> Interval {
    Interval {
        start: interval.start.max(window_start),
        end: interval.end.min(window_end_exclusive),
    }
}

/// Whole-day offset of `date` from `window_start`. Negative before the
/// window, `>= 7` after a week-long window.
pub fn day_index(date: NaiveDate, window_start: NaiveDate) -> i64 {
    (date - window_start).num_days()
}

pub fn midnight(day: NaiveDate) -> NaiveDateTime {
    day.and_time(chrono::NaiveTime::MIN)
}
