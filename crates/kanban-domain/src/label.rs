use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::UserId;

pub type LabelId = Uuid;
pub type SizeId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    pub color: String,
}

impl Label {
    pub fn new(name: String, color: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            color,
        }
    }
}

/// Estimate bucket shown on a task (e.g. S, M, L).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSize {
    pub id: SizeId,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub user_id: UserId,
    #[serde(default)]
    pub display_name: Option<String>,
}
