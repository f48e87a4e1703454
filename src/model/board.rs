use super::filter::TaskFilter;
use super::interval::Interval;
use super::task::{Task, TaskId};
use super::week::Week;

/// The ordered task collection. Input order is the layout order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replace the whole record with the same id. Returns false if absent.
    pub fn replace(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(pos))
    }

    /// Overwrite only the interval of a task. Callers validate first; see
    /// `engine::commit`.
    pub(crate) fn set_interval(&mut self, id: TaskId, interval: Interval) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.start = interval.start;
                task.end = interval.end;
                true
            }
            None => false,
        }
    }

    /// Tasks passing `filter` that intersect `week` with positive length, in
    /// collection order.
    pub fn tasks_in_week(&self, week: &Week, filter: &TaskFilter) -> Vec<Task> {
        let window_start = week.start_instant();
        let window_end = week.end_exclusive();
        self.tasks
            .iter()
            .filter(|t| filter.matches(t))
            .filter(|t| t.start < window_end && t.end > window_start)
            .cloned()
            .collect()
    }
}
