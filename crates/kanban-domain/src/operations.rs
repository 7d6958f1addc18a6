use async_trait::async_trait;
use kanban_core::KanbanResult;

use crate::{ActivityContent, Column, ColumnId, ColumnUpdate, Position, ProjectId, Task, TaskId, UserId};

/// Remote store the ordering engine talks to.
///
/// Every call may fail; the engine never retries and never waits on one call
/// before letting the UI continue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// All tasks of a project with embedded priority, size, label and assignee summaries.
    async fn fetch_project_tasks(&self, project_id: ProjectId) -> KanbanResult<Vec<Task>>;

    /// Persist a same-column reorder.
    async fn update_task_position(&self, task_id: TaskId, position: Position) -> KanbanResult<Task>;

    /// Persist a column change together with the new position.
    async fn move_task(
        &self,
        task_id: TaskId,
        column_id: ColumnId,
        position: Position,
    ) -> KanbanResult<Task>;

    async fn fetch_column(&self, column_id: ColumnId) -> KanbanResult<Column>;

    async fn patch_column(&self, column_id: ColumnId, update: ColumnUpdate) -> KanbanResult<Column>;

    /// Append an audit entry for a task.
    async fn record_activity(
        &self,
        task_id: TaskId,
        user_id: UserId,
        content: ActivityContent,
    ) -> KanbanResult<()>;
}
