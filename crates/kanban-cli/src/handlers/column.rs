use crate::cli::{ColumnAction, ColumnUpdateArgs};
use crate::context::CliContext;
use crate::output;
use kanban_core::KanbanError;
use kanban_domain::{BoardStore, Column, ColumnUpdate, FieldUpdate};
use serde_json::json;

pub async fn handle(ctx: &CliContext, action: ColumnAction) -> anyhow::Result<()> {
    match action {
        ColumnAction::Create {
            project_id,
            name,
            color,
            limit,
        } => {
            let column = ctx
                .store
                .create_column(project_id, name, color, limit)
                .await?;
            output::output_success(&column);
        }
        ColumnAction::List { project_id } => {
            let columns = ctx.store.list_columns(project_id).await?;
            output::output_list(columns);
        }
        ColumnAction::Get { id } => match ctx.store.fetch_column(id).await {
            Ok(column) => output::output_success(&column),
            Err(KanbanError::NotFound(_)) => {
                output::output_error(&format!("Column not found: {}", id))
            }
            Err(e) => return Err(e.into()),
        },
        ColumnAction::Update(args) => {
            let column = handle_update(ctx, args).await?;
            output::output_success(&column);
        }
        ColumnAction::Compact { id } => {
            let renumbered = ctx.store.compact_column(id).await?;
            let tasks: Vec<_> = renumbered
                .iter()
                .map(|(task_id, position)| json!({"id": task_id, "position": position}))
                .collect();
            output::output_success(json!({"column_id": id, "renumbered": tasks}));
        }
    }
    Ok(())
}

async fn handle_update(ctx: &CliContext, args: ColumnUpdateArgs) -> anyhow::Result<Column> {
    let updates = ColumnUpdate {
        name: args.name,
        color: args.color,
        limit: FieldUpdate::from_parts(args.limit, args.clear_limit),
    };
    Ok(ctx.store.patch_column(args.id, updates).await?)
}
