use chrono::{DateTime, Utc};
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{Activity, Column, ColumnId, Priority, Project, Task, TaskId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const FORMAT_VERSION: u32 = 1;

/// Everything the file store holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardDocument {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub priorities: Vec<Priority>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl BoardDocument {
    pub fn task_mut(&mut self, id: TaskId) -> KanbanResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| KanbanError::not_found("Task", id))
    }

    pub fn column(&self, id: ColumnId) -> KanbanResult<&Column> {
        self.columns
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| KanbanError::not_found("Column", id))
    }

    pub fn column_mut(&mut self, id: ColumnId) -> KanbanResult<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| KanbanError::not_found("Column", id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// Process that wrote the file. Writers do not coordinate; the last one wins.
    pub instance_id: Uuid,
    pub saved_at: DateTime<Utc>,
}

/// On-disk wrapper around a [`BoardDocument`].
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub data: BoardDocument,
}

impl JsonEnvelope {
    pub fn new(instance_id: Uuid, data: BoardDocument) -> Self {
        Self {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata {
                instance_id,
                saved_at: Utc::now(),
            },
            data,
        }
    }

    pub fn from_slice(bytes: &[u8]) -> KanbanResult<Self> {
        let envelope: Self = serde_json::from_slice(bytes)
            .map_err(|e| KanbanError::Serialization(e.to_string()))?;
        if envelope.version != FORMAT_VERSION {
            return Err(KanbanError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }
        Ok(envelope)
    }

    pub fn to_vec(&self) -> KanbanResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| KanbanError::Serialization(e.to_string()))
    }
}
