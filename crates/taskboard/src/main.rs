//! CLI entry point for taskboard.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use taskboard_app::AppConfig;
use taskboard_client::TasksClient;
use taskboard_core::{Priority, TaskId};

mod commands;
#[cfg(test)]
mod test_support;
mod tui;
mod view;

/// Terminal client for a REST task board.
#[derive(Parser, Debug)]
#[command(
    name = "taskboard",
    version,
    about = "taskboard: list, filter and edit tasks stored on a REST backend"
)]
struct Cli {
    /// Configuration file (defaults to <config dir>/taskboard/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend origin; overrides the config file and TASKBOARD_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of tasks.
    Ls {
        /// Title substring.
        #[arg(short, long)]
        search: Option<String>,
        /// Only tasks with this priority (low, medium, high).
        #[arg(short, long)]
        priority: Option<Priority>,
        /// Only completed tasks.
        #[arg(long, conflicts_with = "open")]
        done: bool,
        /// Only open tasks.
        #[arg(long)]
        open: bool,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Page size (defaults to list.per_page).
        #[arg(long)]
        per_page: Option<u32>,
        #[arg(long, value_enum, default_value_t = LsFormat::Text)]
        format: LsFormat,
    },

    /// Create a task.
    New {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
        /// Image file to attach; repeat for several.
        #[arg(short = 'i', long = "image")]
        images: Vec<PathBuf>,
    },

    /// Mark a task as completed.
    Done {
        id: TaskId,
        /// Mark the task as open again instead.
        #[arg(long)]
        undo: bool,
    },

    /// Delete a task.
    Rm { id: TaskId },

    /// Launch interactive terminal UI.
    Tui,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LsFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let Cli {
        config,
        api_url,
        cmd,
    } = Cli::parse();

    if should_install_tracing(&cmd) {
        install_tracing();
    }

    let config = AppConfig::load(config.as_deref(), api_url.as_deref())?;
    execute_command(cmd, &config)
}

fn execute_command(command: Command, config: &AppConfig) -> Result<()> {
    let client = TasksClient::from_options(config.api.client_options())?;
    match command {
        Command::Tui => tui::run(client, config),
        other => commands::run(other, client, config),
    }
}

const fn should_install_tracing(cmd: &Command) -> bool {
    !matches!(cmd, Command::Tui)
}

fn install_tracing() {
    // RUST_LOG is honoured; INFO otherwise.
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
