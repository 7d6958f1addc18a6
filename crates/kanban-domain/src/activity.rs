use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ColumnId, TaskId, UserId};

pub type ActivityId = Uuid;

/// One typed piece of an activity entry. The store decides how to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ActivitySegment {
    User(UserId),
    Text(String),
    Column(ColumnId),
    Timestamp(DateTime<Utc>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityContent(pub Vec<ActivitySegment>);

impl ActivityContent {
    /// "<actor> moved this task from <from> to <to> at <at>".
    ///
    /// Same-column reorders use `from == to`.
    pub fn task_moved(actor: &str, from: ColumnId, to: ColumnId, at: DateTime<Utc>) -> Self {
        Self(vec![
            ActivitySegment::User(actor.to_string()),
            ActivitySegment::Text("moved this task from".to_string()),
            ActivitySegment::Column(from),
            ActivitySegment::Text("to".to_string()),
            ActivitySegment::Column(to),
            ActivitySegment::Timestamp(at),
        ])
    }

    pub fn segments(&self) -> &[ActivitySegment] {
        &self.0
    }
}

/// A stored audit entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub task_id: TaskId,
    pub user_id: UserId,
    pub content: ActivityContent,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(task_id: TaskId, user_id: UserId, content: ActivityContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id,
            user_id,
            content,
            created_at: Utc::now(),
        }
    }
}
