//! The single write path from gestures into the task collection, plus the
//! post-release click guard.

use chrono::NaiveDateTime;
use std::time::{Duration, Instant};

use crate::model::{Interval, TaskBoard, TaskId};

pub const DEFAULT_CLICK_DEBOUNCE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    #[error("start {start} is not before end {end}")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("task not found: {0}")]
    UnknownTask(TaskId),
}

/// Replace the stored interval of `id`. Nothing else on the task changes, and
/// nothing changes at all on error.
pub fn commit(
    board: &mut TaskBoard,
    id: TaskId,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Interval, CommitError> {
    let interval = Interval::new(start, end);
    if !interval.is_valid() {
        return Err(CommitError::InvalidInterval { start, end });
    }
    if !board.set_interval(id, interval) {
        return Err(CommitError::UnknownTask(id));
    }
    Ok(interval)
}

/// Swallows clicks that trail a drag release by less than the debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickGuard {
    suppress_until: Option<Instant>,
}

impl ClickGuard {
    pub fn arm(&mut self, now: Instant, window: Duration) {
        self.suppress_until = Some(now + window);
    }

    /// Whether a click at `now` should be delivered. Expired guards reset.
    pub fn allows_click(&mut self, now: Instant) -> bool {
        match self.suppress_until {
            Some(until) if now < until => false,
            Some(_) => {
                self.suppress_until = None;
                true
            }
            None => true,
        }
    }

    pub fn is_armed(&self, now: Instant) -> bool {
        self.suppress_until.is_some_and(|until| now < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    #[test]
    fn valid_commit_replaces_only_the_interval() {
        let mut task = Task::new("a", at(20, 9), at(20, 10));
        task.description = Some("keep me".into());
        let mut board = TaskBoard::new(vec![task.clone()]);

        let applied = commit(&mut board, task.id, at(21, 9), at(21, 12)).unwrap();
        assert_eq!(applied, Interval::new(at(21, 9), at(21, 12)));

        let mut expected = task;
        expected.start = at(21, 9);
        expected.end = at(21, 12);
        assert_eq!(board.tasks(), &[expected][..]);
    }

    #[test]
    fn collapsed_interval_is_rejected_without_mutation() {
        let task = Task::new("a", at(20, 9), at(20, 10));
        let mut board = TaskBoard::new(vec![task.clone()]);
        let snapshot = board.clone();

        let err = commit(&mut board, task.id, at(21, 0), at(21, 0)).unwrap_err();
        assert_eq!(
            err,
            CommitError::InvalidInterval {
                start: at(21, 0),
                end: at(21, 0),
            }
        );
        assert_eq!(board, snapshot);

        assert!(commit(&mut board, task.id, at(22, 0), at(21, 0)).is_err());
        assert_eq!(board, snapshot);
    }

    #[test]
    fn unknown_task_is_rejected() {
        let mut board = TaskBoard::default();
        let stranger = Task::new("x", at(20, 9), at(20, 10));
        assert_eq!(
            commit(&mut board, stranger.id, at(20, 9), at(20, 10)),
            Err(CommitError::UnknownTask(stranger.id))
        );
    }

    #[test]
    fn guard_suppresses_clicks_inside_the_window_only() {
        let t0 = Instant::now();
        let mut guard = ClickGuard::default();
        assert!(guard.allows_click(t0));

        guard.arm(t0, DEFAULT_CLICK_DEBOUNCE);
        assert!(guard.is_armed(t0 + Duration::from_millis(50)));
        assert!(!guard.allows_click(t0 + Duration::from_millis(50)));
        assert!(guard.allows_click(t0 + Duration::from_millis(100)));
        assert!(!guard.is_armed(t0 + Duration::from_millis(100)));
        assert_eq!(guard, ClickGuard::default());
    }
}
