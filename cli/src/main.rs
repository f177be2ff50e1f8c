mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use taskboard_core::repository::data_dir;
use taskboard_core::{FileSnapshotStorage, ProjectStore, StoreConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Projects and their tasks, from the terminal", long_about = None)]
struct Cli {
    /// Directory holding projects.json and config.json (default: ~/.taskboard)
    #[arg(long, global = true, env = "TASKBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Reject due dates earlier than today
    #[arg(long, global = true)]
    no_past_due: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, edit, remove and list projects
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Create, edit, remove and list the tasks of a project
    #[command(subcommand)]
    Task(TaskCommand),
    /// Task counts per status for a project
    Stats {
        /// Project id (any unique prefix)
        project: String,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Add a project
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Change a project's title and/or description
    Edit {
        project: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove a project and all its tasks
    Rm { project: String },
    /// List all projects
    List,
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// Add a task (usage: task add <project> Write docs due:fri status:wip)
    Add {
        project: String,
        /// Title words plus key:value fields (due, status)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
    /// Change a task; only the given title/fields are replaced
    Edit {
        project: String,
        task: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Mark a task Done
    Done { project: String, task: String },
    /// Remove a task
    Rm { project: String, task: String },
    /// List a project's tasks sorted by due date
    List {
        project: String,
        /// all, pending, in-progress or done
        #[arg(short, long, default_value = "all")]
        status: String,
        /// Latest due date first
        #[arg(long)]
        desc: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let dir = data_dir(cli.data_dir)?;
    debug!(data_dir = %dir.display(), "using data directory");
    let mut config = StoreConfig::load_from_dir(&dir)?;
    if cli.no_past_due {
        config.allow_past_due_dates = false;
    }

    let storage = FileSnapshotStorage::new(Some(dir))?;
    let mut store = ProjectStore::open(storage, config);
    if let Some(warning) = store.load_warning() {
        eprintln!("Warning: {}. Starting with an empty board.", warning);
    }

    match cli.command {
        Commands::Project(cmd) => commands::run_project(&mut store, cmd)?,
        Commands::Task(cmd) => commands::run_task(&mut store, cmd)?,
        Commands::Stats { project } => commands::run_stats(&store, &project)?,
    }

    if store.has_unsaved_changes() {
        eprintln!("Warning: changes could not be saved to {}", store.storage().path().display());
    }
    Ok(())
}
