//! Application state behind the week view.
//!
//! The UI turns raw input into [`Command`]s and reacts to the returned
//! [`PlannerEvent`]s. All gesture handling runs to completion inside
//! [`Planner::handle`], so there is never more than one session in flight.

use chrono::{NaiveDate, NaiveDateTime};
use std::time::{Duration, Instant};

use super::commit::{self, ClickGuard, DEFAULT_CLICK_DEBOUNCE};
use super::pointer::{self, GridRect};
use super::rows::{self, WeekLayout};
use super::session::{DragMode, DragPayload, DragSession, Gesture, Release};
use crate::model::{Interval, Task, TaskBoard, TaskFilter, TaskId, Week, DAYS_IN_WEEK};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    PointerDown(DragPayload),
    PointerMove { grid: Option<GridRect>, x: f32 },
    PointerUp,
    /// Pointer capture lost or pointer left the window; ends the gesture like
    /// a release.
    PointerLost,
    Delete(TaskId),
    NextWeek,
    PrevWeek,
    GoTo(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerEvent {
    Committed {
        id: TaskId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    EditRequested(TaskId),
    DeleteRequested(TaskId),
    EmptyCellClicked { day: NaiveDate, hour: u32 },
    WeekChanged(Week),
}

#[derive(Debug)]
pub struct Planner {
    board: TaskBoard,
    week: Week,
    pub filter: TaskFilter,
    gesture: Gesture,
    click_guard: ClickGuard,
    debounce: Duration,
}

impl Planner {
    pub fn new(board: TaskBoard, week: Week) -> Self {
        Self {
            board,
            week,
            filter: TaskFilter::default(),
            gesture: Gesture::Idle,
            click_guard: ClickGuard::default(),
            debounce: DEFAULT_CLICK_DEBOUNCE,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    pub fn week(&self) -> Week {
        self.week
    }

    /// Filtered tasks visible this week, in collection order.
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.board.tasks_in_week(&self.week, &self.filter)
    }

    /// Row layout for this render pass.
    pub fn layout(&self) -> (Vec<Task>, WeekLayout) {
        let tasks = self.visible_tasks();
        let layout = rows::layout_week(&tasks, &self.week);
        (tasks, layout)
    }

    pub fn active_session(&self) -> Option<&DragSession> {
        self.gesture.session()
    }

    /// Preview for `id` if it is the task being dragged and has moved.
    pub fn preview_for(&self, id: TaskId) -> Option<Interval> {
        self.gesture
            .session()
            .filter(|s| s.task_id == id)
            .and_then(DragSession::preview)
    }

    /// True between a pointer down and its release, for tasks and empty cells alike.
    pub fn is_tracking(&self) -> bool {
        !self.gesture.is_idle()
    }

    /// True while a recent drag release still swallows clicks.
    pub fn suppressing_clicks(&self, now: Instant) -> bool {
        self.click_guard.is_armed(now)
    }

    pub fn handle(&mut self, command: Command, now: Instant) -> Vec<PlannerEvent> {
        match command {
            Command::PointerDown(payload) => {
                self.pointer_down(payload);
                Vec::new()
            }
            Command::PointerMove { grid, x } => {
                let day = pointer::day_at(grid, x, DAYS_IN_WEEK);
                self.gesture.pointer_move(day, &self.week);
                Vec::new()
            }
            Command::PointerUp | Command::PointerLost => self.pointer_up(now),
            Command::Delete(id) => {
                if self.board.get(id).is_some() {
                    vec![PlannerEvent::DeleteRequested(id)]
                } else {
                    Vec::new()
                }
            }
            Command::NextWeek => self.set_week(self.week.next()),
            Command::PrevWeek => self.set_week(self.week.prev()),
            Command::GoTo(day) => self.set_week(Week::containing(day)),
        }
    }

    fn pointer_down(&mut self, payload: DragPayload) {
        if !self.gesture.is_idle() {
            tracing::debug!(?payload, "pointer down while a gesture is active, ignored");
            return;
        }
        self.gesture = match payload {
            DragPayload::Task { id, grip } => match self.board.get(id) {
                Some(task) => {
                    tracing::debug!(task = %id, ?grip, "gesture started");
                    Gesture::begin_drag(task, grip, &self.week)
                }
                None => {
                    tracing::debug!(task = %id, "pointer down on unknown task");
                    Gesture::Idle
                }
            },
            DragPayload::TimeSlot { day, hour } => Gesture::begin_slot(day, hour),
        };
    }

    fn pointer_up(&mut self, now: Instant) -> Vec<PlannerEvent> {
        match self.gesture.release() {
            Release::Nothing => Vec::new(),
            Release::Commit { id, interval, mode } => {
                self.click_guard.arm(now, self.debounce);
                match commit::commit(&mut self.board, id, interval.start, interval.end) {
                    Ok(applied) => {
                        tracing::info!(
                            task = %id,
                            kind = mode_label(mode),
                            start = %applied.start,
                            end = %applied.end,
                            "gesture committed"
                        );
                        vec![PlannerEvent::Committed {
                            id,
                            start: applied.start,
                            end: applied.end,
                        }]
                    }
                    Err(err) => {
                        tracing::debug!(task = %id, %err, "gesture discarded");
                        Vec::new()
                    }
                }
            }
            Release::Dragged => {
                self.click_guard.arm(now, self.debounce);
                Vec::new()
            }
            // Only task gestures leave a trailing click to swallow.
            Release::SlotDragged => Vec::new(),
            Release::TaskClick(id) => {
                if self.click_guard.allows_click(now) {
                    vec![PlannerEvent::EditRequested(id)]
                } else {
                    tracing::debug!(task = %id, "click suppressed after drag");
                    Vec::new()
                }
            }
            Release::SlotClick { day, hour } => {
                if self.click_guard.allows_click(now) {
                    vec![PlannerEvent::EmptyCellClicked { day, hour }]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn set_week(&mut self, week: Week) -> Vec<PlannerEvent> {
        if week == self.week {
            return Vec::new();
        }
        self.week = week;
        vec![PlannerEvent::WeekChanged(week)]
    }

    // ── Collection edits from the form and sidebar ──────────────────

    pub fn add_task(&mut self, task: Task) {
        tracing::info!(task = %task.id, title = %task.title, "task added");
        self.board.add(task);
    }

    pub fn update_task(&mut self, task: Task) -> bool {
        let id = task.id;
        let replaced = self.board.replace(task);
        if replaced {
            tracing::info!(task = %id, "task updated");
        }
        replaced
    }

    pub fn delete_task(&mut self, id: TaskId) -> Option<Task> {
        let removed = self.board.remove(id);
        if removed.is_some() {
            tracing::info!(task = %id, "task deleted");
        }
        removed
    }

    pub fn toggle_completed(&mut self, id: TaskId) {
        if let Some(mut task) = self.board.get(id).cloned() {
            task.completed = !task.completed;
            self.board.replace(task);
        }
    }
}

fn mode_label(mode: DragMode) -> &'static str {
    match mode {
        DragMode::Move => "move",
        DragMode::ResizeStart => "resize-start",
        DragMode::ResizeEnd => "resize-end",
    }
}
