//! Neutral drag-and-drop event shapes, independent of any UI toolkit.

use serde::{Deserialize, Serialize};

use crate::{ColumnId, TaskId};

/// The thing picked up at drag start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragItem {
    Task(TaskId),
    Column(ColumnId),
}

/// What the pointer is currently over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropTarget {
    Task(TaskId),
    /// The open drop area of a column.
    Column(ColumnId),
    None,
}

/// Vertical centres of the dragged and hovered boxes, in screen coordinates
/// (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorMidpoints {
    pub active_y: f64,
    pub over_y: f64,
}

impl CursorMidpoints {
    pub fn active_is_above(&self) -> bool {
        self.active_y < self.over_y
    }
}

/// Everything the move resolver needs from a finished drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropEvent {
    pub active_task_id: TaskId,
    pub over: DropTarget,
    pub origin_column_id: ColumnId,
    pub midpoints: Option<CursorMidpoints>,
}
