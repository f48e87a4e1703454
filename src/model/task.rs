use chrono::NaiveDateTime;
use egui::Color32;
use std::fmt;
use uuid::Uuid;

use super::interval::Interval;

/// Stable, opaque identity of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First block of the uuid is enough to tell tasks apart in logs.
        let s = self.0.to_string();
        f.write_str(&s[..8])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn all() -> &'static [Priority] {
        &[Priority::Low, Priority::Medium, Priority::High]
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Priority::Low => egui_phosphor::regular::ARROW_DOWN,
            Priority::Medium => egui_phosphor::regular::MINUS,
            Priority::High => egui_phosphor::regular::ARROW_UP,
        }
    }
}

/// A time-boxed task on the weekly calendar.
///
/// `start < end` is the only invariant the engine relies on; everything else
/// is carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Bar color.
    pub color: Color32,
    pub priority: Priority,
    pub completed: bool,
    pub category: Option<String>,
}

impl Task {
    /// Create a new task with a fresh id and sensible defaults.
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: None,
            start,
            end,
            color: Color32::from_rgb(59, 130, 246),
            priority: Priority::Medium,
            completed: false,
            category: None,
        }
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    pub fn has_valid_interval(&self) -> bool {
        self.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    #[test]
    fn new_tasks_get_distinct_ids() {
        let a = Task::new("a", at(20, 9), at(20, 10));
        let b = Task::new("b", at(20, 9), at(20, 10));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn zero_duration_is_not_a_valid_interval() {
        let t = Task::new("collapsed", at(20, 9), at(20, 9));
        assert!(!t.has_valid_interval());
    }
}
