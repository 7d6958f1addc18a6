use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PriorityId = Uuid;

/// A priority level. Higher `rank` means more urgent.
///
/// Tasks carry a copy of the priority they reference, so `rank` is read
/// straight off the task when ordering a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub id: PriorityId,
    pub name: String,
    pub color: String,
    pub rank: i32,
}

impl Priority {
    pub fn new(name: String, color: String, rank: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            color,
            rank,
        }
    }
}
