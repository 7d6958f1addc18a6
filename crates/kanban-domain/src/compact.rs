//! Column renumbering.
//!
//! Positions are never rebalanced during ordinary moves, so a column that has
//! been reordered many times can run out of representable gaps. Compacting
//! reassigns evenly spaced positions while keeping the display order.

use crate::position::{Position, COMPACT_SPACING};
use crate::{sort, ColumnId, Task, TaskId};

/// Renumber a column's tasks to `n * COMPACT_SPACING, ..., COMPACT_SPACING`
/// in display order.
///
/// Returns the tasks whose position actually changed, with their new value.
pub fn compact_column_positions(tasks: &mut [Task], column_id: ColumnId) -> Vec<(TaskId, Position)> {
    let mut indices: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.column_id == column_id)
        .map(|(i, _)| i)
        .collect();

    indices.sort_by(|&a, &b| sort::compare_in_column(&tasks[a], &tasks[b]));

    let count = indices.len();
    let mut changed = Vec::new();
    for (rank, &idx) in indices.iter().enumerate() {
        let position = (count - rank) as Position * COMPACT_SPACING;
        if tasks[idx].position != position {
            tasks[idx].set_position(position);
            changed.push((tasks[idx].id, position));
        }
    }
    changed
}
