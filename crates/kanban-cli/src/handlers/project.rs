use crate::cli::ProjectAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, action: ProjectAction) -> anyhow::Result<()> {
    match action {
        ProjectAction::Create { name } => {
            let project = ctx.store.create_project(name).await?;
            output::output_success(&project);
        }
    }
    Ok(())
}
