//! In-memory board the UI renders from.
//!
//! Owned by whatever renders the board and passed explicitly into the drag
//! handlers; there is no process-wide board state.

use crate::resolution::{resolve, MoveResolution, PendingMove, TaskPlacement};
use crate::{sort, Column, ColumnId, DropEvent, Task, TaskId};

#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub tasks: Vec<Task>,
    pub columns: Vec<Column>,
}

impl BoardState {
    pub fn new(tasks: Vec<Task>, columns: Vec<Column>) -> Self {
        Self { tasks, columns }
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// A column's tasks in display order.
    pub fn column_tasks(&self, column_id: ColumnId) -> Vec<&Task> {
        sort::column_tasks(&self.tasks, column_id)
    }

    pub fn resolve(&self, drop: &DropEvent) -> MoveResolution {
        resolve(&self.tasks, drop)
    }

    /// Optimistically write a resolved move into local state.
    pub fn apply(&mut self, pending: &PendingMove) {
        for (task_id, position) in &pending.renumbered {
            if let Some(task) = self.task_mut(*task_id) {
                task.set_position(*position);
            }
        }
        if let Some(task) = self.task_mut(pending.task_id) {
            task.move_to_column(pending.to_column, pending.position);
        }

        if let Some(column) = self.column(pending.to_column) {
            let count = self.tasks.iter().filter(|t| t.column_id == column.id).count();
            if column.is_over_limit(count) {
                tracing::warn!(
                    "Column '{}' now holds {} tasks, above its limit of {}",
                    column.name,
                    count,
                    column.limit.unwrap_or_default()
                );
            }
        }
        tracing::info!(
            "Moved task {} to column {} at position {}",
            pending.task_id,
            pending.to_column,
            pending.position
        );
    }

    /// Put tasks back where a snapshot says they were.
    pub fn restore(&mut self, placements: &[TaskPlacement]) {
        for placement in placements {
            if let Some(task) = self.task_mut(placement.task_id) {
                task.move_to_column(placement.column_id, placement.position);
            }
        }
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}
