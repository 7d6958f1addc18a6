mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

/// Debug logs go to `$KANBAN_DEBUG_LOG` when set; otherwise warnings go to
/// stderr so stdout stays pure JSON.
fn init_tracing() -> std::io::Result<()> {
    let Some(log_path) = std::env::var_os("KANBAN_DEBUG_LOG") else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
        return Ok(());
    };

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_max_level(tracing::Level::DEBUG)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "kanban", &mut std::io::stdout());
        return Ok(());
    }

    let file_path = cli
        .file
        .ok_or_else(|| anyhow::anyhow!("--file is required for CLI operations"))?;
    let ctx = CliContext::new(&file_path, cli.config.as_deref());

    match cli.command {
        Commands::Project(cmd) => handlers::project::handle(&ctx, cmd.action).await?,
        Commands::Column(cmd) => handlers::column::handle(&ctx, cmd.action).await?,
        Commands::Priority(cmd) => handlers::priority::handle(&ctx, cmd.action).await?,
        Commands::Task(cmd) => handlers::task::handle(&ctx, cmd.action).await?,
        Commands::Activity(cmd) => handlers::activity::handle(&ctx, cmd.action).await?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}
