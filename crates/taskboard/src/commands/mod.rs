use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde_json::json;
use taskboard_app::{AppConfig, TaskApi, TaskBoard};
use taskboard_client::{ImageUpload, TasksClient};
use taskboard_core::{Priority, TaskFilters};

use crate::view::{attachment_line, check_new_task, filter_summary, pagination_summary, task_row};
use crate::{Command, LsFormat};

/// Run a one-shot command to completion.
pub fn run(command: Command, client: TasksClient, config: &AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let mut board = TaskBoard::new(client, config.list.per_page);
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    runtime.block_on(execute(command, &mut board, config, &mut out, &mut err))
}

async fn execute<A: TaskApi>(
    command: Command,
    board: &mut TaskBoard<A>,
    config: &AppConfig,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Ls {
            search,
            priority,
            done,
            open,
            page,
            per_page,
            format,
        } => {
            let filters = build_filters(search, priority, done, open);
            let per_page = per_page.unwrap_or(config.list.per_page);
            board.load_query(filters, page, per_page).await;
            flush_notification(board, err)?;
            match format {
                LsFormat::Text => render_task_list(board, out)?,
                LsFormat::Json => {
                    let page = json!({
                        "tasks": board.tasks(),
                        "pagination": board.pagination(),
                    });
                    writeln!(out, "{}", serde_json::to_string_pretty(&page)?)?;
                }
            }
        }
        Command::New {
            title,
            description,
            priority,
            images,
        } => {
            let uploads = read_images(&images, config.upload.max_file_size)?;
            if let Err(reason) = check_new_task(&title, &uploads, &config.upload) {
                board.notifications_mut().show_warning(reason, None);
            } else if let Some(task) = board
                .create_task(title.trim(), &description, priority, uploads)
                .await
            {
                writeln!(out, "created task #{}", task.id)?;
            }
            flush_notification(board, err)?;
            render_task_list(board, out)?;
        }
        Command::Done { id, undo } => {
            board.toggle_task(id, !undo).await;
            flush_notification(board, err)?;
            let state = if undo { "open" } else { "completed" };
            writeln!(out, "marked task #{id} as {state}")?;
            render_task_list(board, out)?;
        }
        Command::Rm { id } => {
            board.delete_task(id).await;
            flush_notification(board, err)?;
            render_task_list(board, out)?;
        }
        Command::Tui => bail!("the tui command runs interactively"),
    }
    Ok(())
}

fn build_filters(
    search: Option<String>,
    priority: Option<Priority>,
    done: bool,
    open: bool,
) -> TaskFilters {
    let completed = match (done, open) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    };
    TaskFilters {
        search: search.filter(|text| !text.is_empty()),
        priority,
        completed,
    }
}

fn read_images(paths: &[PathBuf], max_file_size: u64) -> Result<Vec<ImageUpload>> {
    paths
        .iter()
        .map(|path| {
            ImageUpload::from_path_within(path, max_file_size)
                .with_context(|| format!("failed to read image {}", path.display()))
        })
        .collect()
}

/// Print a success or info notification; turn a warning or error into the
/// command's failure.
fn flush_notification<A>(board: &mut TaskBoard<A>, err: &mut impl Write) -> Result<()> {
    let Some(notification) = board.notifications_mut().take() else {
        return Ok(());
    };
    if notification.severity.is_failure() {
        bail!("{}", notification.message);
    }
    writeln!(err, "{}", notification.message)?;
    Ok(())
}

fn render_task_list<A>(board: &TaskBoard<A>, out: &mut impl Write) -> Result<()> {
    let filters = board.filters();
    if board.tasks().is_empty() {
        if filters.is_empty() {
            writeln!(out, "No tasks found")?;
        } else {
            writeln!(out, "No tasks matched the provided filters")?;
        }
        return Ok(());
    }

    if !filters.is_empty() {
        writeln!(out, "Filters: {}", filter_summary(filters))?;
    }
    for task in board.tasks() {
        writeln!(out, "{}", task_row(task))?;
        for image in &task.images {
            writeln!(out, "    {}", attachment_line(image))?;
        }
    }
    writeln!(out, "{}", pagination_summary(board.pagination()))?;
    Ok(())
}
