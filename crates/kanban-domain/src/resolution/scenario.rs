//! Drop classification.
//!
//! A drop is mapped to exactly one [`MoveScenario`] before any position is
//! computed, so each branch can be exercised on its own.

use crate::{ColumnId, CursorMidpoints, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveScenario {
    /// Onto another task of the same column.
    Reorder,
    /// Plain task onto a task in its own column that has a priority.
    Rejected,
    /// Plain task onto a prioritized task in another column; lands at the
    /// boundary between the two subgroups.
    EnterPrioritized,
    /// Prioritized task onto a plain task in another column; placed among the
    /// prioritized tasks by rank, ignoring the plain target.
    PrioritizedOntoPlain,
    /// Prioritized task onto a lower-ranked task in another column.
    PriorityTier,
    /// Any other drop onto a task in another column, placed by cursor geometry.
    Geometric { above: bool },
    /// Onto a column with no tasks.
    EmptyColumn,
    /// Plain task onto the open area of a non-empty column.
    AppendToBottom,
    /// Prioritized task onto the open area of a non-empty column.
    ColumnPriorityTier,
}

/// Resolved drop target.
#[derive(Debug, Clone, Copy)]
pub enum DropOver<'a> {
    Task(&'a Task),
    Column { column_id: ColumnId, has_tasks: bool },
}

/// A plain task may not be placed ahead of a prioritized one in the same column.
pub fn can_move_task(over: &Task, active: &Task) -> bool {
    active.is_prioritized() || !over.is_prioritized()
}

/// Classify a drop.
///
/// In the default cross-column case a missing cursor geometry places the
/// task above its target, i.e. it takes the target's place.
pub fn classify(
    active: &Task,
    over: &DropOver<'_>,
    midpoints: Option<CursorMidpoints>,
) -> MoveScenario {
    match *over {
        DropOver::Task(over) if over.column_id == active.column_id => {
            if can_move_task(over, active) {
                MoveScenario::Reorder
            } else {
                MoveScenario::Rejected
            }
        }
        DropOver::Task(over) => match (active.tier(), over.tier()) {
            (None, Some(_)) => MoveScenario::EnterPrioritized,
            (Some(_), None) => MoveScenario::PrioritizedOntoPlain,
            (Some(active_rank), Some(over_rank)) if active_rank > over_rank => {
                MoveScenario::PriorityTier
            }
            _ => MoveScenario::Geometric {
                above: midpoints.map_or(true, |m| m.active_is_above()),
            },
        },
        DropOver::Column {
            has_tasks: false, ..
        } => MoveScenario::EmptyColumn,
        DropOver::Column { .. } if active.is_prioritized() => MoveScenario::ColumnPriorityTier,
        DropOver::Column { .. } => MoveScenario::AppendToBottom,
    }
}
