//! Drag session controller.
//!
//! Three events drive a drag: start records the dragged task, over tracks
//! the hovered column (and may fire on every pointer move, so it only ever
//! touches the session), end hands the drop to the resolver and clears the
//! session whatever the outcome.

use kanban_core::AppConfig;

use crate::notify::{Notifier, TracingNotifier, MOVE_FAILED_MESSAGE};
use crate::resolution::{MoveReceipt, MoveResolution, PendingMove};
use crate::{
    BoardState, BoardStore, ColumnId, CursorMidpoints, DragItem, DropEvent, DropTarget, TaskId,
    UserId,
};

/// What to do with the optimistic update when persisting a move fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Leave local state as moved; it may disagree with the store until the
    /// next refetch.
    #[default]
    KeepOptimistic,
    /// Restore the pre-move snapshot.
    Rollback,
}

impl FailurePolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        if config.rollback_on_failure {
            Self::Rollback
        } else {
            Self::KeepOptimistic
        }
    }
}

/// Transient state of the drag in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragSession {
    pub active_task: Option<TaskId>,
    pub origin_column: Option<ColumnId>,
    pub hover_column: Option<ColumnId>,
}

impl DragSession {
    pub fn is_dragging(&self) -> bool {
        self.active_task.is_some()
    }

    fn clear_hover(&mut self) {
        self.hover_column = None;
    }
}

pub struct DragController<N: Notifier = TracingNotifier> {
    session: DragSession,
    policy: FailurePolicy,
    notifier: N,
}

impl DragController<TracingNotifier> {
    pub fn new(policy: FailurePolicy) -> Self {
        Self::with_notifier(policy, TracingNotifier)
    }
}

impl<N: Notifier> DragController<N> {
    pub fn with_notifier(policy: FailurePolicy, notifier: N) -> Self {
        Self {
            session: DragSession::default(),
            policy,
            notifier,
        }
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn on_drag_start(&mut self, item: DragItem, board: &BoardState) {
        let DragItem::Task(task_id) = item else {
            return;
        };
        let Some(task) = board.task(task_id) else {
            return;
        };
        self.session = DragSession {
            active_task: Some(task.id),
            origin_column: Some(task.column_id),
            hover_column: None,
        };
        tracing::debug!("Drag started for task {}", task.id);
    }

    pub fn on_drag_over(&mut self, over: DropTarget, board: &BoardState) {
        let Some(active) = self.session.active_task.and_then(|id| board.task(id)) else {
            return;
        };
        match over {
            DropTarget::Task(id) => {
                let Some(hovered) = board.task(id) else {
                    return;
                };
                // Same column or not, the hovered task's column is the one under the pointer.
                self.session.origin_column = Some(active.column_id);
                self.session.hover_column = Some(hovered.column_id);
            }
            DropTarget::Column(column_id) => {
                self.session.hover_column = Some(column_id);
            }
            DropTarget::None => self.session.clear_hover(),
        }
    }

    /// Resolve the drop and apply it optimistically to `board`.
    ///
    /// Returns the move still to be persisted, or `None` when the drop was
    /// ignored or rejected. A drag released over nothing behaves as a cancel.
    pub fn on_drag_end(
        &mut self,
        over: DropTarget,
        midpoints: Option<CursorMidpoints>,
        board: &mut BoardState,
    ) -> Option<PendingMove> {
        let session = std::mem::take(&mut self.session);
        let active_task_id = session.active_task?;
        let origin_column_id = session
            .origin_column
            .or_else(|| board.task(active_task_id).map(|t| t.column_id))?;

        let drop = DropEvent {
            active_task_id,
            over,
            origin_column_id,
            midpoints,
        };
        match board.resolve(&drop) {
            MoveResolution::Move(pending) => {
                board.apply(&pending);
                Some(pending)
            }
            MoveResolution::Rejected => {
                tracing::debug!("Drop of task {} rejected", active_task_id);
                None
            }
            MoveResolution::Ignored => None,
        }
    }

    /// Surface a failed persist and apply the failure policy.
    pub fn settle(&self, board: &mut BoardState, receipt: &MoveReceipt) {
        if let MoveReceipt::Failed {
            task_id, previous, ..
        } = receipt
        {
            self.notifier.notify_error(MOVE_FAILED_MESSAGE);
            if self.policy == FailurePolicy::Rollback {
                tracing::info!("Rolling back move of task {}", task_id);
                board.restore(previous);
            }
        }
    }

    /// Drag end, persistence and settling in one awaited call.
    ///
    /// UIs that must not wait on the store call [`Self::on_drag_end`] and run
    /// [`PendingMove::persist`] on their own executor instead.
    pub async fn finish_drag<S: BoardStore + ?Sized>(
        &mut self,
        over: DropTarget,
        midpoints: Option<CursorMidpoints>,
        board: &mut BoardState,
        store: &S,
        actor: &UserId,
    ) -> Option<MoveReceipt> {
        let pending = self.on_drag_end(over, midpoints, board)?;
        let receipt = pending.persist(store, actor).await;
        self.settle(board, &receipt);
        Some(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::MockBoardStore;
    use crate::{Column, Priority, Task};
    use kanban_core::KanbanError;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingNotifier {
        messages: RefCell<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify_error(&self, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }
    }

    struct Fixture {
        board: BoardState,
        todo: ColumnId,
        doing: ColumnId,
        done: ColumnId,
        plain: TaskId,
        urgent: TaskId,
        doing_urgent: TaskId,
    }

    fn fixture() -> Fixture {
        let project = Uuid::new_v4();
        let high = Priority::new("High".into(), "red".into(), 2);
        let columns = vec![
            Column::new(project, "Todo".into(), "gray".into(), 0),
            Column::new(project, "Doing".into(), "blue".into(), 1),
            Column::new(project, "Done".into(), "green".into(), 2),
        ];
        let (todo, doing, done) = (columns[0].id, columns[1].id, columns[2].id);
        let tasks = vec![
            Task::new(project, todo, "urgent".into(), 50.0).with_priority(high.clone()),
            Task::new(project, todo, "plain".into(), 10.0),
            Task::new(project, doing, "doing-urgent".into(), 40.0).with_priority(high),
            Task::new(project, doing, "doing-plain".into(), 20.0),
        ];
        let (urgent, plain, doing_urgent) = (tasks[0].id, tasks[1].id, tasks[2].id);
        Fixture {
            board: BoardState::new(tasks, columns),
            todo,
            doing,
            done,
            plain,
            urgent,
            doing_urgent,
        }
    }

    #[test]
    fn test_start_records_task_and_origin() {
        let f = fixture();
        let mut controller = DragController::new(FailurePolicy::KeepOptimistic);

        controller.on_drag_start(DragItem::Column(f.todo), &f.board);
        assert!(!controller.session().is_dragging());

        controller.on_drag_start(DragItem::Task(f.plain), &f.board);
        assert_eq!(controller.session().active_task, Some(f.plain));
        assert_eq!(controller.session().origin_column, Some(f.todo));
        assert_eq!(controller.session().hover_column, None);
    }

    #[test]
    fn test_over_tracks_hovered_column() {
        let f = fixture();
        let mut controller = DragController::new(FailurePolicy::KeepOptimistic);
        controller.on_drag_start(DragItem::Task(f.plain), &f.board);

        controller.on_drag_over(DropTarget::Task(f.urgent), &f.board);
        assert_eq!(controller.session().hover_column, Some(f.todo));

        controller.on_drag_over(DropTarget::Task(f.doing_urgent), &f.board);
        assert_eq!(controller.session().hover_column, Some(f.doing));
        assert_eq!(controller.session().origin_column, Some(f.todo));

        controller.on_drag_over(DropTarget::Column(f.done), &f.board);
        controller.on_drag_over(DropTarget::Column(f.done), &f.board);
        assert_eq!(controller.session().hover_column, Some(f.done));

        controller.on_drag_over(DropTarget::None, &f.board);
        assert_eq!(controller.session().hover_column, None);
    }

    #[test]
    fn test_over_without_drag_is_noop() {
        let f = fixture();
        let mut controller = DragController::new(FailurePolicy::KeepOptimistic);
        controller.on_drag_over(DropTarget::Column(f.done), &f.board);
        assert_eq!(*controller.session(), DragSession::default());
    }

    #[test]
    fn test_end_without_start_does_nothing() {
        let mut f = fixture();
        let before = f.board.tasks.clone();
        let mut controller = DragController::new(FailurePolicy::KeepOptimistic);

        assert!(controller
            .on_drag_end(DropTarget::Column(f.done), None, &mut f.board)
            .is_none());
        assert_eq!(f.board.tasks, before);
    }

    #[test]
    fn test_rejected_drop_leaves_board_untouched() {
        let mut f = fixture();
        let before = f.board.tasks.clone();
        let mut controller = DragController::new(FailurePolicy::KeepOptimistic);

        controller.on_drag_start(DragItem::Task(f.plain), &f.board);
        controller.on_drag_over(DropTarget::Task(f.urgent), &f.board);
        let pending = controller.on_drag_end(DropTarget::Task(f.urgent), None, &mut f.board);

        assert!(pending.is_none());
        assert_eq!(f.board.tasks, before);
        assert_eq!(*controller.session(), DragSession::default());
    }

    #[test]
    fn test_cancel_over_nothing() {
        let mut f = fixture();
        let before = f.board.tasks.clone();
        let mut controller = DragController::new(FailurePolicy::KeepOptimistic);

        controller.on_drag_start(DragItem::Task(f.plain), &f.board);
        controller.on_drag_over(DropTarget::Column(f.done), &f.board);
        assert!(controller
            .on_drag_end(DropTarget::None, None, &mut f.board)
            .is_none());
        assert_eq!(f.board.tasks, before);
        assert!(!controller.session().is_dragging());
    }

    #[test]
    fn test_end_applies_optimistically() {
        let mut f = fixture();
        let mut controller = DragController::new(FailurePolicy::KeepOptimistic);

        controller.on_drag_start(DragItem::Task(f.plain), &f.board);
        controller.on_drag_over(DropTarget::Task(f.doing_urgent), &f.board);
        let pending = controller
            .on_drag_end(DropTarget::Task(f.doing_urgent), None, &mut f.board)
            .unwrap();

        let moved = f.board.task(f.plain).unwrap();
        assert_eq!(moved.column_id, f.doing);
        assert_eq!(moved.position, 30.0);
        assert!(!moved.is_prioritized());
        assert_eq!(pending.from_column, f.todo);
        assert_eq!(controller.session().hover_column, None);

        let order: Vec<_> = f.board.column_tasks(f.doing).iter().map(|t| t.title.clone()).collect();
        assert_eq!(order, ["doing-urgent", "plain", "doing-plain"]);
    }

    fn failing_store() -> MockBoardStore {
        let mut store = MockBoardStore::new();
        store
            .expect_move_task()
            .returning(|_, _, _| Err(KanbanError::Store("timeout".into())));
        store.expect_record_activity().never();
        store
    }

    #[tokio::test]
    async fn test_failed_persist_keeps_optimistic_state() {
        let mut f = fixture();
        let store = failing_store();
        let mut controller =
            DragController::with_notifier(FailurePolicy::KeepOptimistic, RecordingNotifier::default());

        controller.on_drag_start(DragItem::Task(f.plain), &f.board);
        let receipt = controller
            .finish_drag(DropTarget::Column(f.done), None, &mut f.board, &store, &"ada".to_string())
            .await
            .unwrap();

        assert!(!receipt.is_persisted());
        assert_eq!(f.board.task(f.plain).unwrap().column_id, f.done);
        assert_eq!(f.board.task(f.plain).unwrap().position, 10000.0);
        assert_eq!(
            *controller.notifier().messages.borrow(),
            vec![MOVE_FAILED_MESSAGE.to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_persist_rolls_back_when_configured() {
        let mut f = fixture();
        let store = failing_store();
        let config = AppConfig {
            rollback_on_failure: true,
            ..Default::default()
        };
        let mut controller = DragController::with_notifier(
            FailurePolicy::from_config(&config),
            RecordingNotifier::default(),
        );

        controller.on_drag_start(DragItem::Task(f.plain), &f.board);
        controller
            .finish_drag(DropTarget::Column(f.done), None, &mut f.board, &store, &"ada".to_string())
            .await;

        let task = f.board.task(f.plain).unwrap();
        assert_eq!(task.column_id, f.todo);
        assert_eq!(task.position, 10.0);
        assert_eq!(controller.notifier().messages.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_rollback_keeps_neighbours_the_store_accepted() {
        let project = Uuid::new_v4();
        let columns = vec![
            Column::new(project, "A".into(), "gray".into(), 0),
            Column::new(project, "B".into(), "blue".into(), 1),
        ];
        let (a, b) = (columns[0].id, columns[1].id);
        let tasks = vec![
            Task::new(project, a, "dragged".into(), 1.0),
            Task::new(project, b, "n1".into(), 30.0),
            Task::new(project, b, "n2".into(), 30.0),
        ];
        let (dragged, n1, n2) = (tasks[0].id, tasks[1].id, tasks[2].id);
        let mut board = BoardState::new(tasks, columns);

        let accepted = Arc::new(Mutex::new(HashMap::new()));
        let mut store = MockBoardStore::new();
        let sink = Arc::clone(&accepted);
        store.expect_update_task_position().returning(move |id, pos| {
            sink.lock().unwrap().insert(id, pos);
            let mut task = Task::new(Uuid::nil(), Uuid::nil(), "t".into(), pos);
            task.id = id;
            Ok(task)
        });
        store
            .expect_move_task()
            .returning(|_, _, _| Err(KanbanError::Store("timeout".into())));
        store.expect_record_activity().never();
        let mut controller =
            DragController::with_notifier(FailurePolicy::Rollback, RecordingNotifier::default());

        controller.on_drag_start(DragItem::Task(dragged), &board);
        let receipt = controller
            .finish_drag(DropTarget::Column(b), None, &mut board, &store, &"ada".to_string())
            .await
            .unwrap();
        assert!(!receipt.is_persisted());

        let task = board.task(dragged).unwrap();
        assert_eq!((task.column_id, task.position), (a, 1.0));

        let accepted = accepted.lock().unwrap();
        assert_eq!(accepted.len(), 2);
        for id in [n1, n2] {
            assert_eq!(Some(&board.task(id).unwrap().position), accepted.get(&id));
        }
        assert_ne!(
            board.task(n1).unwrap().position,
            board.task(n2).unwrap().position
        );
    }

    #[tokio::test]
    async fn test_successful_persist_is_silent() {
        let mut f = fixture();
        let mut store = MockBoardStore::new();
        store.expect_update_task_position().returning(|id, pos| {
            let mut task = Task::new(Uuid::nil(), Uuid::nil(), "t".into(), pos);
            task.id = id;
            Ok(task)
        });
        store.expect_record_activity().times(1).returning(|_, _, _| Ok(()));
        let mut controller =
            DragController::with_notifier(FailurePolicy::Rollback, RecordingNotifier::default());

        // Prioritized task onto a plain task in its own column: a plain reorder.
        controller.on_drag_start(DragItem::Task(f.urgent), &f.board);
        let receipt = controller
            .finish_drag(DropTarget::Task(f.plain), None, &mut f.board, &store, &"ada".to_string())
            .await
            .unwrap();

        assert!(receipt.is_persisted());
        assert!(controller.notifier().messages.borrow().is_empty());
        assert!(f.board.task(f.urgent).unwrap().position < 10.0);
    }
}
