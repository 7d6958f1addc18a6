use chrono::Utc;
use kanban_core::{KanbanError, KanbanResult};

use super::MoveScenario;
use crate::{ActivityContent, BoardStore, ColumnId, Position, Task, TaskId, UserId};

/// Where a task sat before a move; enough to undo the optimistic update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskPlacement {
    pub task_id: TaskId,
    pub column_id: ColumnId,
    pub position: Position,
}

/// A resolved move, applied locally but not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    pub task_id: TaskId,
    pub scenario: MoveScenario,
    pub from_column: ColumnId,
    pub to_column: ColumnId,
    pub position: Position,
    /// Neighbours renumbered because the destination gap was exhausted.
    pub renumbered: Vec<(TaskId, Position)>,
    /// Placements before the move, moved task first.
    pub previous: Vec<TaskPlacement>,
}

#[derive(Debug)]
pub enum MoveReceipt {
    Persisted {
        task: Task,
        activity_recorded: bool,
    },
    Failed {
        task_id: TaskId,
        error: KanbanError,
        /// Placements the store did not accept, moved task first.
        previous: Vec<TaskPlacement>,
    },
}

impl MoveReceipt {
    pub fn is_persisted(&self) -> bool {
        matches!(self, MoveReceipt::Persisted { .. })
    }
}

impl PendingMove {
    pub fn changes_column(&self) -> bool {
        self.from_column != self.to_column
    }

    /// Write the move to the store, then record who moved it.
    ///
    /// Nothing is retried or sequenced: if the same task is moved again before
    /// this resolves, whichever write lands last wins.
    pub async fn persist<S: BoardStore + ?Sized>(self, store: &S, actor: &UserId) -> MoveReceipt {
        let mut landed = Vec::new();
        let task = match self.write(store, &mut landed).await {
            Ok(task) => task,
            Err(error) => {
                tracing::error!("Failed to persist move of task {}: {}", self.task_id, error);
                // Renumbered neighbours the store already took stay renumbered.
                let previous = self
                    .previous
                    .into_iter()
                    .filter(|p| !landed.contains(&p.task_id))
                    .collect();
                return MoveReceipt::Failed {
                    task_id: self.task_id,
                    error,
                    previous,
                };
            }
        };

        let content =
            ActivityContent::task_moved(actor, self.from_column, self.to_column, Utc::now());
        let activity_recorded = match store
            .record_activity(self.task_id, actor.clone(), content)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to record activity for task {}: {}", self.task_id, e);
                false
            }
        };

        tracing::info!(
            "Persisted move of task {} to column {} at {}",
            self.task_id,
            self.to_column,
            self.position
        );
        MoveReceipt::Persisted {
            task,
            activity_recorded,
        }
    }

    async fn write<S: BoardStore + ?Sized>(
        &self,
        store: &S,
        landed: &mut Vec<TaskId>,
    ) -> KanbanResult<Task> {
        for (task_id, position) in &self.renumbered {
            store.update_task_position(*task_id, *position).await?;
            landed.push(*task_id);
        }
        if self.changes_column() {
            store
                .move_task(self.task_id, self.to_column, self.position)
                .await
        } else {
            store.update_task_position(self.task_id, self.position).await
        }
    }
}
