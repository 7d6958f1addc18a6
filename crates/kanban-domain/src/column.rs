use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{FieldUpdate, ProjectId};

pub type ColumnId = Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub project_id: ProjectId,
    pub name: String,
    pub color: String,
    /// Advisory maximum task count. Moves are never blocked by it.
    #[serde(default)]
    pub limit: Option<u32>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a column's fields.
#[derive(Debug, Clone, Default)]
pub struct ColumnUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub limit: FieldUpdate<u32>,
}

impl Column {
    pub fn new(project_id: ProjectId, name: String, color: String, position: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            name,
            color,
            limit: None,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update(&mut self, updates: ColumnUpdate) {
        if let Some(name) = updates.name {
            self.name = name;
        }
        if let Some(color) = updates.color {
            self.color = color;
        }
        updates.limit.apply(&mut self.limit);
        self.updated_at = Utc::now();
    }

    pub fn is_over_limit(&self, task_count: usize) -> bool {
        self.limit.is_some_and(|limit| task_count > limit as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_advisory_threshold() {
        let mut column = Column::new(Uuid::new_v4(), "Doing".into(), "#0af".into(), 1);
        assert!(!column.is_over_limit(100));

        column.limit = Some(2);
        assert!(!column.is_over_limit(2));
        assert!(column.is_over_limit(3));
    }

    #[test]
    fn test_update_patches_only_given_fields() {
        let mut column = Column::new(Uuid::new_v4(), "Todo".into(), "gray".into(), 0);
        column.limit = Some(4);

        column.update(ColumnUpdate {
            color: Some("blue".into()),
            ..Default::default()
        });
        assert_eq!(column.name, "Todo");
        assert_eq!(column.color, "blue");
        assert_eq!(column.limit, Some(4));

        column.update(ColumnUpdate {
            limit: FieldUpdate::Clear,
            ..Default::default()
        });
        assert_eq!(column.limit, None);

        column.update(ColumnUpdate {
            limit: FieldUpdate::from_parts(Some(6), true),
            ..Default::default()
        });
        assert_eq!(column.limit, Some(6));
    }
}
