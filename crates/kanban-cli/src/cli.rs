use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "Kanban task ordering from the command line", long_about = None)]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")"))]
pub struct Cli {
    /// Path to the board data file (or set KANBAN_FILE env var)
    #[arg(long, value_name = "FILE", env = "KANBAN_FILE", global = true)]
    pub file: Option<String>,

    /// Read settings from this file instead of the user config directory
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project operations
    Project(ProjectCommand),
    /// Column operations
    Column(ColumnCommand),
    /// Priority operations
    Priority(PriorityCommand),
    /// Task operations
    Task(TaskCommand),
    /// Activity feed
    Activity(ActivityCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Project commands
#[derive(Args)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub action: ProjectAction,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a new project
    Create {
        #[arg(long)]
        name: String,
    },
}

// Column commands
#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Create a new column at the end of a project
    Create {
        #[arg(long)]
        project_id: Uuid,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "#808080")]
        color: String,
        /// Advisory task limit
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List columns for a project
    List {
        #[arg(long)]
        project_id: Uuid,
    },
    /// Get a specific column
    Get {
        #[arg(long)]
        id: Uuid,
    },
    /// Update a column
    Update(ColumnUpdateArgs),
    /// Respace task positions in a column
    Compact {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args)]
pub struct ColumnUpdateArgs {
    #[arg(long)]
    pub id: Uuid,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long, conflicts_with = "clear_limit")]
    pub limit: Option<u32>,
    #[arg(long)]
    pub clear_limit: bool,
}

// Priority commands
#[derive(Args)]
pub struct PriorityCommand {
    #[command(subcommand)]
    pub action: PriorityAction,
}

#[derive(Subcommand)]
pub enum PriorityAction {
    /// Create a new priority level
    Create {
        #[arg(long)]
        name: String,
        /// Higher ranks sort first
        #[arg(long, allow_hyphen_values = true)]
        rank: i32,
        #[arg(long, default_value = "#ff0000")]
        color: String,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task at the bottom of a column
    Create {
        #[arg(long)]
        column_id: Uuid,
        #[arg(long)]
        title: String,
        #[arg(long)]
        priority_id: Option<Uuid>,
    },
    /// List a column's tasks in display order
    List {
        #[arg(long)]
        column_id: Uuid,
    },
    /// Drag a task onto another task or a column
    Move(TaskMoveArgs),
}

#[derive(Args)]
pub struct TaskMoveArgs {
    #[arg(long)]
    pub id: Uuid,
    /// Drop onto this task
    #[arg(long, conflicts_with = "over_column", required_unless_present = "over_column")]
    pub over_task: Option<Uuid>,
    /// Drop onto this column's open area
    #[arg(long)]
    pub over_column: Option<Uuid>,
    /// Vertical centre of the dragged task
    #[arg(long, requires = "over_mid", allow_hyphen_values = true)]
    pub active_mid: Option<f64>,
    /// Vertical centre of the hovered task
    #[arg(long, requires = "active_mid", allow_hyphen_values = true)]
    pub over_mid: Option<f64>,
    /// Recorded as the mover in the activity feed
    #[arg(long)]
    pub actor: Option<String>,
}

// Activity commands
#[derive(Args)]
pub struct ActivityCommand {
    #[command(subcommand)]
    pub action: ActivityAction,
}

#[derive(Subcommand)]
pub enum ActivityAction {
    /// List a task's activity, oldest first
    List {
        #[arg(long)]
        task_id: Uuid,
    },
}
