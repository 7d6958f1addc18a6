//! Move resolution engine.
//!
//! Turns a finished drag into a new column and position for the dragged task.
//! Each call is self-contained: the drop is classified into a
//! [`MoveScenario`], the scenario's placement rule runs against the
//! destination column in display order, and the result comes back as a
//! [`PendingMove`] for the caller to apply and persist.

mod pending;
mod scenario;

pub use pending::{MoveReceipt, PendingMove, TaskPlacement};
pub use scenario::{can_move_task, classify, DropOver, MoveScenario};

use crate::allocator::{append_position, move_down, move_up, new_task_position};
use crate::position::{Position, EMPTY_COLUMN_POSITION};
use crate::{compact_column_positions, sort, ColumnId, DropEvent, DropTarget, Task, TaskId};

#[derive(Debug, Clone, PartialEq)]
pub enum MoveResolution {
    /// Nothing to do: no target, dropped onto itself, or unknown ids.
    Ignored,
    /// The drop breaks the prioritized-before-plain rule and is not accepted.
    Rejected,
    Move(PendingMove),
}

pub fn resolve(tasks: &[Task], drop: &DropEvent) -> MoveResolution {
    let Some(active) = tasks.iter().find(|t| t.id == drop.active_task_id) else {
        tracing::debug!("Drop ignored: task {} not on board", drop.active_task_id);
        return MoveResolution::Ignored;
    };

    let (over, destination, over_id) = match drop.over {
        DropTarget::None => return MoveResolution::Ignored,
        DropTarget::Task(id) if id == active.id => return MoveResolution::Ignored,
        DropTarget::Task(id) => match tasks.iter().find(|t| t.id == id) {
            Some(over) => (DropOver::Task(over), over.column_id, Some(id)),
            None => return MoveResolution::Ignored,
        },
        DropTarget::Column(column_id) => {
            let has_tasks = tasks
                .iter()
                .any(|t| t.column_id == column_id && t.id != active.id);
            (DropOver::Column { column_id, has_tasks }, column_id, None)
        }
    };

    if drop.origin_column_id != active.column_id {
        tracing::debug!(
            "Drag of task {} started in column {} but the board has it in {}",
            active.id,
            drop.origin_column_id,
            active.column_id
        );
    }

    let scenario = classify(active, &over, drop.midpoints);
    tracing::debug!(
        "Drop of task {} into column {} classified as {:?}",
        active.id,
        destination,
        scenario
    );
    if scenario == MoveScenario::Rejected {
        return MoveResolution::Rejected;
    }

    // Reorders place relative to the column as shown, dragged task included.
    let mut column: Vec<Task> = sort::column_tasks(tasks, destination)
        .into_iter()
        .filter(|t| scenario == MoveScenario::Reorder || t.id != active.id)
        .cloned()
        .collect();

    let Some(mut position) = place(scenario, active, over_id, &column) else {
        return MoveResolution::Ignored;
    };

    let mut renumbered = Vec::new();
    let others = column.iter().filter(|t| t.id != active.id).map(|t| t.position);
    if collides(position, others) {
        tracing::warn!(
            "No free position left in column {}; compacting before placing task {}",
            destination,
            active.id
        );
        renumbered = compact_column_positions(&mut column, destination);
        renumbered.retain(|(id, _)| *id != active.id);
        position = match place(scenario, active, over_id, &column) {
            Some(position) => position,
            None => return MoveResolution::Ignored,
        };
    }

    let mut previous = vec![TaskPlacement {
        task_id: active.id,
        column_id: active.column_id,
        position: active.position,
    }];
    previous.extend(renumbered.iter().filter_map(|(id, _)| {
        tasks.iter().find(|t| t.id == *id).map(|t| TaskPlacement {
            task_id: t.id,
            column_id: t.column_id,
            position: t.position,
        })
    }));

    MoveResolution::Move(PendingMove {
        task_id: active.id,
        scenario,
        from_column: active.column_id,
        to_column: destination,
        position,
        renumbered,
        previous,
    })
}

/// Placement rule for each scenario. `column` is the destination in display
/// order; it holds the dragged task only for [`MoveScenario::Reorder`].
fn place(
    scenario: MoveScenario,
    active: &Task,
    over_id: Option<TaskId>,
    column: &[Task],
) -> Option<Position> {
    let column: Vec<&Task> = column.iter().collect();
    let index_of = |id: TaskId| column.iter().position(|t| t.id == id);

    let position = match scenario {
        MoveScenario::Reorder => {
            let over = index_of(over_id?)?;
            let from = index_of(active.id)?;
            if from > over {
                move_up(over, &column)
            } else {
                move_down(over, &column)
            }
        }
        MoveScenario::EnterPrioritized => {
            match column.iter().position(|t| !t.is_prioritized()) {
                Some(first_plain) => move_up(first_plain, &column),
                None => append_position(&column),
            }
        }
        MoveScenario::PrioritizedOntoPlain
        | MoveScenario::PriorityTier
        | MoveScenario::ColumnPriorityTier => place_in_tier(active.tier(), &column),
        MoveScenario::Geometric { above } => {
            let over = index_of(over_id?)?;
            if above {
                move_up(over, &column)
            } else {
                move_down(over, &column)
            }
        }
        MoveScenario::EmptyColumn => EMPTY_COLUMN_POSITION,
        MoveScenario::AppendToBottom => append_position(&column),
        MoveScenario::Rejected => return None,
    };
    Some(position)
}

/// Bottom of the dragged task's own rank, or directly above the first task
/// of a lower rank (plain tasks count as lowest).
fn place_in_tier(tier: Option<i32>, column: &[&Task]) -> Position {
    if let Some(last_same) = column.iter().rposition(|t| t.tier() == tier) {
        return move_down(last_same, column);
    }
    match column.iter().position(|t| t.tier() < tier) {
        Some(first_lower) => move_up(first_lower, column),
        None => append_position(column),
    }
}

/// Bottom-of-column position for a new task, plus any neighbours that had to
/// be renumbered to free it.
///
/// The bottom of the display order is not always the lowest position (a
/// plain task can sit above a prioritized one), so the slot can already be
/// taken; the column is compacted in `tasks` when it is.
pub fn place_new_task(tasks: &mut [Task], column_id: ColumnId) -> (Position, Vec<(TaskId, Position)>) {
    let (position, clash) = bottom_slot(tasks, column_id);
    if !clash {
        return (position, Vec::new());
    }
    tracing::warn!(
        "Bottom slot {} of column {} is taken; compacting before adding a task",
        position,
        column_id
    );
    let renumbered = compact_column_positions(tasks, column_id);
    (bottom_slot(tasks, column_id).0, renumbered)
}

fn bottom_slot(tasks: &[Task], column_id: ColumnId) -> (Position, bool) {
    let column = sort::column_tasks(tasks, column_id);
    let position = new_task_position(&column);
    (position, collides(position, column.iter().map(|t| t.position)))
}

/// True when `position` would share a value with one of `others`, or when
/// `others` already holds a duplicate.
fn collides(position: Position, others: impl IntoIterator<Item = Position>) -> bool {
    if !position.is_finite() {
        return true;
    }
    let mut taken: Vec<Position> = others.into_iter().collect();
    taken.push(position);
    taken.sort_by(|a, b| a.total_cmp(b));
    taken.windows(2).any(|pair| pair[0] == pair[1])
}
