pub mod activity;
pub mod allocator;
pub mod board_state;
pub mod column;
pub mod compact;
pub mod drag;
pub mod event;
pub mod field_update;
pub mod label;
pub mod notify;
pub mod operations;
pub mod position;
pub mod priority;
pub mod project;
pub mod resolution;
pub mod sort;
pub mod task;

/// Identity of the person performing an action, as issued by the auth provider.
pub type UserId = String;

pub use activity::{Activity, ActivityContent, ActivityId, ActivitySegment};
pub use board_state::BoardState;
pub use column::{Column, ColumnId, ColumnUpdate};
pub use compact::compact_column_positions;
pub use drag::{DragController, DragSession, FailurePolicy};
pub use event::{CursorMidpoints, DragItem, DropEvent, DropTarget};
pub use field_update::FieldUpdate;
pub use label::{Assignee, Label, LabelId, SizeId, TaskSize};
pub use notify::{Notifier, TracingNotifier, MOVE_FAILED_MESSAGE};
pub use operations::BoardStore;
pub use position::{Position, EMPTY_COLUMN_POSITION};
pub use priority::{Priority, PriorityId};
pub use project::{Project, ProjectId};
pub use resolution::{
    place_new_task, MoveReceipt, MoveResolution, MoveScenario, PendingMove, TaskPlacement,
};
pub use task::{Task, TaskId};
