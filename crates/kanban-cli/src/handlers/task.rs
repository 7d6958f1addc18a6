use crate::cli::{TaskAction, TaskMoveArgs};
use crate::context::CliContext;
use crate::output;
use kanban_domain::{
    BoardState, BoardStore, CursorMidpoints, DragItem, DropTarget, MoveReceipt,
    MOVE_FAILED_MESSAGE,
};
use serde_json::json;

pub async fn handle(ctx: &CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Create {
            column_id,
            title,
            priority_id,
        } => {
            let task = ctx.store.create_task(column_id, title, priority_id).await?;
            output::output_success(&task);
        }
        TaskAction::List { column_id } => {
            let tasks = ctx.store.column_tasks(column_id).await?;
            output::output_list(tasks);
        }
        TaskAction::Move(args) => handle_move(ctx, args).await?,
    }
    Ok(())
}

/// Replays a drag of one task as start, over and end events against the
/// task's project board.
async fn handle_move(ctx: &CliContext, args: TaskMoveArgs) -> anyhow::Result<()> {
    let task = ctx.store.task(args.id).await?;
    let tasks = ctx.store.fetch_project_tasks(task.project_id).await?;
    let columns = ctx.store.list_columns(task.project_id).await?;
    let mut board = BoardState::new(tasks, columns);

    let over = match (args.over_task, args.over_column) {
        (Some(task_id), _) => DropTarget::Task(task_id),
        (None, Some(column_id)) => DropTarget::Column(column_id),
        (None, None) => DropTarget::None,
    };
    let midpoints = args
        .active_mid
        .zip(args.over_mid)
        .map(|(active_y, over_y)| CursorMidpoints { active_y, over_y });
    let actor = ctx.actor(args.actor);

    let mut controller = ctx.drag_controller();
    controller.on_drag_start(DragItem::Task(task.id), &board);
    controller.on_drag_over(over, &board);

    match controller
        .finish_drag(over, midpoints, &mut board, &ctx.store, &actor)
        .await
    {
        None => output::output_success(json!({"moved": false})),
        Some(MoveReceipt::Persisted {
            task,
            activity_recorded,
        }) => output::output_success(json!({
            "moved": true,
            "task": task,
            "activity_recorded": activity_recorded,
        })),
        Some(MoveReceipt::Failed { error, .. }) => {
            output::output_error(&format!("{} ({})", MOVE_FAILED_MESSAGE, error))
        }
    }
    Ok(())
}
