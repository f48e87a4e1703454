use super::task::{Priority, Task};

/// Sidebar filter. Empty sets and an unset status mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub priorities: Vec<Priority>,
    pub categories: Vec<String>,
    pub completed: Option<bool>,
    pub search: String,
}

impl TaskFilter {
    /// Search is a case-insensitive substring test on title and description.
    /// Surrounding whitespace in the search box is ignored, so a lone space
    /// filters nothing and counts as inactive.
    pub fn matches(&self, task: &Task) -> bool {
        if !self.priorities.is_empty() && !self.priorities.contains(&task.priority) {
            return false;
        }
        if !self.categories.is_empty() {
            match &task.category {
                Some(c) if self.categories.contains(c) => {}
                _ => return false,
            }
        }
        if let Some(done) = self.completed {
            if task.completed != done {
                return false;
            }
        }
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }

    pub fn toggle_priority(&mut self, priority: Priority) {
        if let Some(pos) = self.priorities.iter().position(|p| *p == priority) {
            self.priorities.remove(pos);
        } else {
            self.priorities.push(priority);
        }
    }

    pub fn toggle_category(&mut self, category: &str) {
        if let Some(pos) = self.categories.iter().position(|c| c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category.to_string());
        }
    }

    pub fn active_count(&self) -> usize {
        self.priorities.len()
            + self.categories.len()
            + usize::from(self.completed.is_some())
            + usize::from(!self.search.trim().is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Counters shown at the top of the sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub high_priority_pending: usize,
}

impl TaskStats {
    pub fn collect(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
            high_priority_pending: tasks
                .iter()
                .filter(|t| t.priority == Priority::High && !t.completed)
                .count(),
        }
    }
}

/// Distinct categories in first-seen order.
pub fn categories(tasks: &[Task]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for c in tasks.iter().filter_map(|t| t.category.as_deref()) {
        if !c.is_empty() && !out.iter().any(|seen| seen == c) {
            out.push(c.to_string());
        }
    }
    out
}
