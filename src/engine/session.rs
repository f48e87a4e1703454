//! Drag/resize gesture state.
//!
//! A gesture starts on pointer-down and ends on pointer-up. While it runs,
//! only the preview changes; stored tasks are untouched until the caller
//! commits the [`Release`] result.

use chrono::{Duration, NaiveDate};

use crate::model::interval::{day_index, midnight};
use crate::model::{Interval, Task, TaskId, Week};

/// Which part of a task bar the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grip {
    Body,
    StartEdge,
    EndEdge,
}

/// What sits under the pointer when a gesture begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPayload {
    Task { id: TaskId, grip: Grip },
    TimeSlot { day: NaiveDate, hour: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    ResizeStart,
    ResizeEnd,
}

impl From<Grip> for DragMode {
    fn from(grip: Grip) -> Self {
        match grip {
            Grip::Body => DragMode::Move,
            Grip::StartEdge => DragMode::ResizeStart,
            Grip::EndEdge => DragMode::ResizeEnd,
        }
    }
}

/// An in-progress move or resize of a single task.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub task_id: TaskId,
    pub mode: DragMode,
    pub original: Interval,
    /// Unclamped column of the original start; may be negative.
    original_start_day: i64,
    preview: Option<Interval>,
    motion: bool,
}

impl DragSession {
    pub fn preview(&self) -> Option<Interval> {
        self.preview
    }

    fn track(&mut self, day: usize, week: &Week) {
        self.motion = true;
        let day = day as i64;
        let candidate = match self.mode {
            DragMode::Move => Some(self.original.shifted_days(day - self.original_start_day)),
            DragMode::ResizeStart => {
                let new_start = midnight(week.day(day));
                (new_start < self.original.end && new_start >= week.start_instant())
                    .then(|| Interval::new(new_start, self.original.end))
            }
            DragMode::ResizeEnd => {
                let new_end = midnight(week.day(day) + Duration::days(1));
                (new_end > self.original.start && new_end <= week.end_exclusive())
                    .then(|| Interval::new(self.original.start, new_end))
            }
        };

        match candidate {
            // Back on the original position: nothing to preview.
            Some(c) if c == self.original => self.preview = None,
            Some(c) => self.preview = Some(c),
            None => tracing::trace!(task = %self.task_id, day, "resize candidate out of bounds"),
        }
    }
}

/// Gesture state owned by the planner. Only one exists at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragSession),
    /// Pointer went down on an empty cell.
    SlotPress {
        day: NaiveDate,
        hour: u32,
        motion: bool,
    },
}

/// How a gesture ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// A valid preview to write back.
    Commit {
        id: TaskId,
        interval: Interval,
        mode: DragMode,
    },
    /// Down and up on a task with no motion in between.
    TaskClick(TaskId),
    /// Down and up on an empty cell with no motion in between.
    SlotClick { day: NaiveDate, hour: u32 },
    /// A task was dragged but there is nothing to commit.
    Dragged,
    /// The pointer moved off an empty cell before release.
    SlotDragged,
    /// Nothing was in progress.
    Nothing,
}

impl Gesture {
    pub fn begin_drag(task: &Task, grip: Grip, week: &Week) -> Self {
        Gesture::Dragging(DragSession {
            task_id: task.id,
            mode: grip.into(),
            original: task.interval(),
            original_start_day: day_index(task.start.date(), week.start()),
            preview: None,
            motion: false,
        })
    }

    pub fn begin_slot(day: NaiveDate, hour: u32) -> Self {
        Gesture::SlotPress {
            day,
            hour,
            motion: false,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Gesture::Dragging(s) => Some(s),
            _ => None,
        }
    }

    /// Feed a pointer move already mapped to a column. `None` means the grid
    /// geometry was unavailable and the event is ignored.
    pub fn pointer_move(&mut self, day: Option<usize>, week: &Week) {
        let Some(day) = day else {
            return;
        };
        match self {
            Gesture::Idle => {}
            Gesture::Dragging(session) => session.track(day, week),
            Gesture::SlotPress { motion, .. } => *motion = true,
        }
    }

    /// End the gesture, leaving `Idle` behind.
    pub fn release(&mut self) -> Release {
        match std::mem::take(self) {
            Gesture::Idle => Release::Nothing,
            Gesture::SlotPress { day, hour, motion } => {
                if motion {
                    Release::SlotDragged
                } else {
                    Release::SlotClick { day, hour }
                }
            }
            Gesture::Dragging(session) => match session.preview {
                Some(interval) if interval.is_valid() => Release::Commit {
                    id: session.task_id,
                    interval,
                    mode: session.mode,
                },
                _ if session.motion => Release::Dragged,
                _ => Release::TaskClick(session.task_id),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    fn week() -> Week {
        Week::containing(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap())
    }

    /// Monday 09:00 to Wednesday 17:00.
    fn mon_to_wed() -> Task {
        Task::new("spec review", at(20, 9), at(22, 17))
    }

    fn preview(g: &Gesture) -> Option<Interval> {
        g.session().and_then(DragSession::preview)
    }

    #[test]
    fn grip_selects_mode() {
        let task = mon_to_wed();
        for (grip, mode) in [
            (Grip::Body, DragMode::Move),
            (Grip::StartEdge, DragMode::ResizeStart),
            (Grip::EndEdge, DragMode::ResizeEnd),
        ] {
            let g = Gesture::begin_drag(&task, grip, &week());
            assert_eq!(g.session().map(|s| s.mode), Some(mode));
        }
    }

    #[test]
    fn move_shifts_both_ends_by_whole_days() {
        let task = mon_to_wed();
        let mut g = Gesture::begin_drag(&task, Grip::Body, &week());
        g.pointer_move(Some(2), &week());

        let p = preview(&g).unwrap();
        assert_eq!(p, Interval::new(at(22, 9), at(24, 17)));
        assert_eq!(p.end - p.start, task.end - task.start);
        assert_eq!(
            g.release(),
            Release::Commit {
                id: task.id,
                interval: p,
                mode: DragMode::Move,
            }
        );
        assert!(g.is_idle());
    }

    #[test]
    fn move_back_to_origin_clears_preview() {
        let task = mon_to_wed();
        let mut g = Gesture::begin_drag(&task, Grip::Body, &week());
        g.pointer_move(Some(3), &week());
        assert!(preview(&g).is_some());
        g.pointer_move(Some(0), &week());
        assert_eq!(preview(&g), None);
        assert_eq!(g.release(), Release::Dragged);
    }

    #[test]
    fn move_of_task_starting_before_the_week_uses_unclamped_origin() {
        // Starts the previous Saturday, day index -2.
        let task = Task::new("carry-over", at(18, 9), at(21, 9));
        let mut g = Gesture::begin_drag(&task, Grip::Body, &week());
        g.pointer_move(Some(0), &week());
        assert_eq!(preview(&g), Some(Interval::new(at(20, 9), at(23, 9))));
    }

    #[test]
    fn resize_start_snaps_to_midnight() {
        let task = mon_to_wed();
        let mut g = Gesture::begin_drag(&task, Grip::StartEdge, &week());
        g.pointer_move(Some(1), &week());
        assert_eq!(preview(&g), Some(Interval::new(at(21, 0), at(22, 17))));
    }

    #[test]
    fn resize_start_past_end_is_rejected_and_preview_kept() {
        let task = mon_to_wed();
        let mut g = Gesture::begin_drag(&task, Grip::StartEdge, &week());
        g.pointer_move(Some(1), &week());
        let before = preview(&g);

        // Thursday 00:00 is after the Wednesday 17:00 end.
        g.pointer_move(Some(3), &week());
        assert_eq!(preview(&g), before);
    }

    #[test]
    fn rejected_first_resize_leaves_no_preview() {
        let task = mon_to_wed();
        let mut g = Gesture::begin_drag(&task, Grip::StartEdge, &week());
        g.pointer_move(Some(5), &week());
        assert_eq!(preview(&g), None);
        assert_eq!(g.release(), Release::Dragged);
    }

    #[test]
    fn resize_end_covers_the_whole_target_day() {
        let task = mon_to_wed();
        let mut g = Gesture::begin_drag(&task, Grip::EndEdge, &week());
        g.pointer_move(Some(4), &week());
        assert_eq!(preview(&g), Some(Interval::new(at(20, 9), at(25, 0))));

        // Sunday is the last column; end lands on the window's exclusive end.
        g.pointer_move(Some(6), &week());
        assert_eq!(preview(&g), Some(Interval::new(at(20, 9), at(27, 0))));
    }

    #[test]
    fn resize_end_can_shrink_to_start_day() {
        let task = mon_to_wed();
        let mut g = Gesture::begin_drag(&task, Grip::EndEdge, &week());
        g.pointer_move(Some(0), &week());
        assert_eq!(preview(&g), Some(Interval::new(at(20, 9), at(21, 0))));
    }

    #[test]
    fn resize_end_before_start_is_rejected() {
        // Starts Thursday; dragging the end to Tuesday would invert it.
        let task = Task::new("late", at(23, 9), at(24, 9));
        let mut g = Gesture::begin_drag(&task, Grip::EndEdge, &week());
        g.pointer_move(Some(1), &week());
        assert_eq!(preview(&g), None);
    }

    #[test]
    fn missing_geometry_records_nothing() {
        let task = mon_to_wed();
        let mut g = Gesture::begin_drag(&task, Grip::Body, &week());
        g.pointer_move(Some(2), &week());
        let before = preview(&g);
        g.pointer_move(None, &week());
        assert_eq!(preview(&g), before);

        let mut untouched = Gesture::begin_drag(&task, Grip::Body, &week());
        untouched.pointer_move(None, &week());
        assert_eq!(untouched.release(), Release::TaskClick(task.id));
    }

    #[test]
    fn press_and_release_without_motion_is_a_click() {
        let task = mon_to_wed();
        let mut g = Gesture::begin_drag(&task, Grip::Body, &week());
        assert_eq!(g.release(), Release::TaskClick(task.id));

        let day = week().day(3);
        let mut slot = Gesture::begin_slot(day, 0);
        assert_eq!(slot.release(), Release::SlotClick { day, hour: 0 });

        let mut dragged_slot = Gesture::begin_slot(day, 0);
        dragged_slot.pointer_move(Some(4), &week());
        assert_eq!(dragged_slot.release(), Release::SlotDragged);
    }

    #[test]
    fn releasing_idle_does_nothing() {
        let mut g = Gesture::Idle;
        g.pointer_move(Some(3), &week());
        assert_eq!(g.release(), Release::Nothing);
    }

    proptest! {
        #[test]
        fn repeated_moves_are_idempotent(
            grip in prop_oneof![Just(Grip::Body), Just(Grip::StartEdge), Just(Grip::EndEdge)],
            day in 0usize..7,
        ) {
            let task = mon_to_wed();
            let mut once = Gesture::begin_drag(&task, grip, &week());
            once.pointer_move(Some(day), &week());
            let mut twice = once.clone();
            twice.pointer_move(Some(day), &week());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn move_previews_preserve_duration(days in proptest::collection::vec(0usize..7, 1..10)) {
            let task = mon_to_wed();
            let mut g = Gesture::begin_drag(&task, Grip::Body, &week());
            for d in days {
                g.pointer_move(Some(d), &week());
                if let Some(p) = preview(&g) {
                    prop_assert_eq!(p.end - p.start, task.end - task.start);
                }
            }
        }
    }
}
