//! Column sort engine.
//!
//! Orders the tasks of one column: the prioritized subgroup first (rank
//! descending, then position descending), then plain tasks by position
//! descending. Rank always dominates position for prioritized tasks.

use crate::{position, ColumnId, Position, Task};
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Total order of two tasks within a column.
///
/// Task ids break the (otherwise impossible) tie of equal tier and
/// identical position so re-sorting is always a no-op.
pub fn compare_in_column(a: &Task, b: &Task) -> Ordering {
    match (&a.priority, &b.priority) {
        (Some(pa), Some(pb)) => pb
            .rank
            .cmp(&pa.rank)
            .then_with(|| position::compare(a.position, b.position)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => position::compare(a.position, b.position),
    }
    .then_with(|| a.id.cmp(&b.id))
}

/// Sort a slice in column order. Works with both `&Task` and `Task` elements.
pub fn sort_tasks<T: Borrow<Task>>(tasks: &mut [T]) {
    tasks.sort_by(|a, b| compare_in_column(a.borrow(), b.borrow()));
}

/// Tasks of one column, in display order.
pub fn column_tasks(tasks: &[Task], column_id: ColumnId) -> Vec<&Task> {
    let mut column: Vec<_> = tasks.iter().filter(|t| t.column_id == column_id).collect();
    sort_tasks(&mut column);
    column
}

/// Position of the last task in display order, or `0.0` for an empty column.
pub fn lowest_position<T: Borrow<Task>>(sorted: &[T]) -> Position {
    sorted.last().map_or(0.0, |t| t.borrow().position)
}
