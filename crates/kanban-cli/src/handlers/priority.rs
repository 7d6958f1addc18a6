use crate::cli::PriorityAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, action: PriorityAction) -> anyhow::Result<()> {
    match action {
        PriorityAction::Create { name, rank, color } => {
            let priority = ctx.store.create_priority(name, color, rank).await?;
            output::output_success(&priority);
        }
    }
    Ok(())
}
