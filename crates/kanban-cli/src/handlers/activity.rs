use crate::cli::ActivityAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, action: ActivityAction) -> anyhow::Result<()> {
    match action {
        ActivityAction::List { task_id } => {
            let activities = ctx.store.activities(task_id).await?;
            output::output_list(activities);
        }
    }
    Ok(())
}
