//! Position allocator.
//!
//! Computes a position that slots a task next to a reference task without
//! renumbering the rest of the column. `column` is always a column's tasks in
//! display order (see [`crate::sort::column_tasks`]).
//!
//! A neighbour is only used for a midpoint when it lies on the expected side
//! of the reference; across a subgroup boundary it may not (a prioritized task
//! can hold a lower position than the first plain task), in which case the
//! reference is treated as the edge of its run and a fixed step is used.
//!
//! When a gap has been split down to adjacent floats the reference position is
//! returned unchanged. That collides with the reference, which
//! [`crate::resolution`] detects and repairs by compacting the column.

use crate::position::{self, Position, EMPTY_COLUMN_POSITION, TOP_INCREMENT};
use crate::sort::lowest_position;
use crate::Task;

/// Position that shows the moved task directly above `column[index]`.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn move_up(index: usize, column: &[&Task]) -> Position {
    let reference = column[index].position;
    let above = index.checked_sub(1).map(|i| column[i].position);
    match above {
        Some(above) if position::precedes(above, reference) => {
            position::midpoint(above, reference).unwrap_or(reference)
        }
        _ => step_up(reference),
    }
}

/// Position that shows the moved task directly below `column[index]`.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn move_down(index: usize, column: &[&Task]) -> Position {
    let reference = column[index].position;
    let below = column.get(index + 1).map(|t| t.position);
    match below {
        Some(below) if position::precedes(reference, below) => {
            position::midpoint(reference, below).unwrap_or(reference)
        }
        _ => step_down(reference),
    }
}

/// Position below the last task, or the sentinel when the column is empty.
pub fn append_position(column: &[&Task]) -> Position {
    match column.len().checked_sub(1) {
        Some(last) => move_down(last, column),
        None => EMPTY_COLUMN_POSITION,
    }
}

/// Default position for a newly created task: the visual bottom of the column.
pub fn new_task_position(column: &[&Task]) -> Position {
    if column.is_empty() {
        return EMPTY_COLUMN_POSITION;
    }
    step_down(lowest_position(column))
}

fn step_up(reference: Position) -> Position {
    reference + TOP_INCREMENT
}

fn step_down(reference: Position) -> Position {
    reference - position::bottom_decrement(reference)
}
