//! First-fit row packing for the week grid.
//!
//! Tasks are taken in input order and dropped into the first row that has no
//! overlapping member; a new row is opened at the bottom otherwise. This is
//! deterministic and stable for appends, but not minimal.

use crate::model::interval::{clamp_to_window, day_index, overlaps};
use crate::model::{Interval, Task, TaskId, Week, DAYS_IN_WEEK};

/// One task's slot in the grid for the current render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub id: TaskId,
    pub row: usize,
    /// Stored interval clipped to the visible week.
    pub display: Interval,
    /// First and last covered column, both within `0..7`.
    pub first_col: usize,
    pub last_col: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekLayout {
    pub placements: Vec<Placement>,
    pub row_count: usize,
}

#[cfg(test)]
impl WeekLayout {
    pub fn placement(&self, id: TaskId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }
}

/// Row index for every item, in input order.
pub fn assign_rows<T, F>(items: &[T], overlap: F) -> Vec<usize>
where
    F: Fn(&T, &T) -> bool,
{
    let (assigned, _rows) = items.iter().fold(
        (Vec::with_capacity(items.len()), Vec::<Vec<&T>>::new()),
        |(mut assigned, mut rows), item| {
            let row = rows
                .iter()
                .position(|members| !members.iter().any(|m| overlap(item, m)))
                .unwrap_or_else(|| {
                    rows.push(Vec::new());
                    rows.len() - 1
                });
            rows[row].push(item);
            assigned.push(row);
            (assigned, rows)
        },
    );
    assigned
}

/// Lay out an already-filtered task list on `week`.
pub fn layout_week(tasks: &[Task], week: &Week) -> WeekLayout {
    let rows = assign_rows(tasks, |a, b| overlaps(&a.interval(), &b.interval()));
    let row_count = rows.iter().map(|r| r + 1).max().unwrap_or(0);

    let placements = tasks
        .iter()
        .zip(rows)
        .map(|(task, row)| {
            let display = clamp_to_window(
                &task.interval(),
                week.start_instant(),
                week.end_exclusive(),
            );
            let (first_col, last_col) = columns(&display, week);
            Placement {
                id: task.id,
                row,
                display,
                first_col,
                last_col,
            }
        })
        .collect();

    WeekLayout {
        placements,
        row_count,
    }
}

/// Column span of a span on `week`, clamped into the grid.
pub fn columns(interval: &Interval, week: &Week) -> (usize, usize) {
    let max = DAYS_IN_WEEK as i64 - 1;
    let first = day_index(interval.start.date(), week.start()).clamp(0, max);
    let last = day_index(interval.last_day(), week.start()).clamp(first, max);
    (first as usize, last as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    fn week() -> Week {
        Week::containing(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap())
    }

    #[test]
    fn no_tasks_no_rows() {
        let layout = layout_week(&[], &week());
        assert_eq!(layout, WeekLayout::default());
    }

    #[test]
    fn overlapping_monday_tasks_get_distinct_rows() {
        let first = Task::new("1", at(20, 0, 0), at(20, 23, 59));
        let second = Task::new("2", at(20, 12, 0), at(21, 12, 0));
        let layout = layout_week(&[first.clone(), second.clone()], &week());

        assert_eq!(layout.row_count, 2);
        assert_eq!(layout.placement(first.id).unwrap().row, 0);
        assert_eq!(layout.placement(second.id).unwrap().row, 1);
    }

    #[test]
    fn touching_tasks_do_not_share_a_row() {
        let a = Task::new("a", at(20, 9, 0), at(20, 10, 0));
        let b = Task::new("b", at(20, 10, 0), at(20, 11, 0));
        let layout = layout_week(&[a, b], &week());
        assert_eq!(layout.row_count, 2);
    }

    #[test]
    fn first_fit_reuses_the_earliest_free_row() {
        let long = Task::new("long", at(20, 0, 0), at(24, 0, 0));
        let mon = Task::new("mon", at(20, 8, 0), at(20, 9, 0));
        let sat = Task::new("sat", at(25, 8, 0), at(25, 9, 0));
        let layout = layout_week(&[long, mon, sat], &week());

        let rows: Vec<_> = layout.placements.iter().map(|p| p.row).collect();
        assert_eq!(rows, vec![0, 1, 0]);
        assert_eq!(layout.row_count, 2);
    }

    #[test]
    fn first_fit_is_not_minimal() {
        // {a, c} and {b, d} would fit in two rows; input order forces three.
        let a = Task::new("a", at(20, 0, 0), at(20, 2, 0));
        let b = Task::new("b", at(20, 6, 0), at(20, 8, 0));
        let c = Task::new("c", at(20, 3, 0), at(20, 7, 0));
        let d = Task::new("d", at(20, 1, 0), at(20, 5, 0));
        let layout = layout_week(&[a, b, c, d], &week());
        assert_eq!(layout.row_count, 3);
    }

    #[test]
    fn display_is_clamped_but_columns_stay_in_grid() {
        let spanning = Task::new("spanning", at(15, 12, 0), at(30, 12, 0));
        let layout = layout_week(&[spanning.clone()], &week());
        let p = layout.placement(spanning.id).unwrap();

        assert_eq!(p.display, Interval::new(at(20, 0, 0), at(27, 0, 0)));
        assert_eq!((p.first_col, p.last_col), (0, 6));
    }

    #[test]
    fn day_long_task_covers_one_column() {
        let task = Task::new("wed", at(22, 0, 0), at(23, 0, 0));
        let layout = layout_week(&[task.clone()], &week());
        let p = layout.placement(task.id).unwrap();
        assert_eq!((p.first_col, p.last_col), (2, 2));
    }

    #[test]
    fn appending_does_not_reshuffle_earlier_rows() {
        let a = Task::new("a", at(20, 0, 0), at(22, 0, 0));
        let b = Task::new("b", at(21, 0, 0), at(23, 0, 0));
        let before = layout_week(&[a.clone(), b.clone()], &week());

        let c = Task::new("c", at(20, 0, 0), at(26, 0, 0));
        let after = layout_week(&[a, b, c], &week());
        assert_eq!(&after.placements[..2], &before.placements[..]);
    }

    fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
        proptest::collection::vec((0i64..7 * 24 * 60, 1i64..3 * 24 * 60), 0..24).prop_map(
            |spans| {
                spans
                    .into_iter()
                    .enumerate()
                    .map(|(i, (offset, len))| {
                        let start = at(20, 0, 0) + Duration::minutes(offset);
                        Task::new(format!("t{i}"), start, start + Duration::minutes(len))
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn rows_are_pairwise_disjoint(tasks in arb_tasks()) {
            let rows = assign_rows(&tasks, |a, b| overlaps(&a.interval(), &b.interval()));
            for i in 0..tasks.len() {
                for j in (i + 1)..tasks.len() {
                    if rows[i] == rows[j] {
                        prop_assert!(!overlaps(&tasks[i].interval(), &tasks[j].interval()));
                    }
                }
            }
        }

        #[test]
        fn rows_are_dense_and_deterministic(tasks in arb_tasks()) {
            let first = layout_week(&tasks, &week());
            let second = layout_week(&tasks, &week());
            prop_assert_eq!(&first, &second);

            for row in 0..first.row_count {
                prop_assert!(first.placements.iter().any(|p| p.row == row));
            }
        }
    }
}
