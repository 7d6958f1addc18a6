use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Assignee, ColumnId, Label, Position, Priority, ProjectId, TaskSize};

pub type TaskId = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    /// Owning column. Stored remotely as `status_id`.
    #[serde(alias = "status_id")]
    pub column_id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub position: Position,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub size: Option<TaskSize>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(project_id: ProjectId, column_id: ColumnId, title: String, position: Position) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            column_id,
            title,
            description: None,
            position,
            priority: None,
            size: None,
            labels: Vec::new(),
            assignees: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Tasks with a priority form the prioritized subgroup of their column
    /// and always sort ahead of plain tasks.
    pub fn is_prioritized(&self) -> bool {
        self.priority.is_some()
    }

    /// Ordering tier: the priority rank, or `None` for plain tasks.
    ///
    /// `None` compares below every `Some(rank)`, which matches plain tasks
    /// sitting under the prioritized subgroup.
    pub fn tier(&self) -> Option<i32> {
        self.priority.as_ref().map(|p| p.rank)
    }

    pub fn move_to_column(&mut self, column_id: ColumnId, position: Position) {
        self.column_id = column_id;
        self.position = position;
        self.updated_at = Utc::now();
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let task = Task::new(Uuid::new_v4(), Uuid::new_v4(), "Plain".to_string(), 10.0);
        assert!(!task.is_prioritized());
        assert_eq!(task.tier(), None);

        let urgent = task.with_priority(Priority::new("Urgent".into(), "red".into(), 3));
        assert!(urgent.is_prioritized());
        assert_eq!(urgent.tier(), Some(3));
    }

    #[test]
    fn test_plain_tier_sorts_below_any_rank() {
        assert!(None < Some(i32::MIN));
        assert!(Some(1) < Some(2));
    }

    #[test]
    fn test_status_id_alias() {
        let column_id = Uuid::new_v4();
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "project_id": Uuid::new_v4(),
            "status_id": column_id,
            "title": "Imported",
            "position": 42.5,
            "created_at": Utc::now(),
            "updated_at": Utc::now(),
        });
        let task: Task = serde_json::from_value(json).unwrap();
        assert_eq!(task.column_id, column_id);
        assert_eq!(task.position, 42.5);
        assert!(task.labels.is_empty());
    }

    #[test]
    fn test_move_to_column() {
        let mut task = Task::new(Uuid::new_v4(), Uuid::new_v4(), "Task".to_string(), 1.0);
        let before = task.updated_at;
        let target = Uuid::new_v4();
        task.move_to_column(target, 10000.0);
        assert_eq!(task.column_id, target);
        assert_eq!(task.position, 10000.0);
        assert!(task.updated_at >= before);
    }
}
