use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::runtime::Runtime;
use tracing::subscriber::NoSubscriber;

use taskboard_app::{AppConfig, TaskApi, TaskBoard};
use taskboard_client::TasksClient;

pub mod constants;
mod form;
mod handlers;
mod view;
mod widgets;

use self::constants::TUI_TICK_RATE_MS;
use self::view::{Ui, UiAction};

/// Launch the interactive TUI.
pub fn run(client: TasksClient, config: &AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = tracing::subscriber::with_default(NoSubscriber::default(), || {
        let board = TaskBoard::new(client, config.list.per_page);
        run_event_loop(&mut terminal, &runtime, Ui::new(board, config))
    });

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_event_loop<A: TaskApi>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    runtime: &Runtime,
    mut ui: Ui<A>,
) -> Result<()> {
    // The first frame shows the board's initial loading state.
    perform(terminal, runtime, &mut ui, UiAction::Refresh)?;

    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(TUI_TICK_RATE_MS);

    loop {
        terminal.draw(|f| ui.draw(f))?;
        if ui.should_quit {
            break;
        }

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_default();

        if event::poll(timeout)?
            && let CrosstermEvent::Key(key) = event::read()?
            && let Some(action) = ui.handle_key(key)
        {
            perform(terminal, runtime, &mut ui, action)?;
        }

        if last_tick.elapsed() >= tick_rate {
            if let Some(action) = ui.tick() {
                perform(terminal, runtime, &mut ui, action)?;
            }
            last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Draw a busy frame, then block on `action`.
fn perform<A: TaskApi>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    runtime: &Runtime,
    ui: &mut Ui<A>,
    action: UiAction,
) -> Result<()> {
    ui.busy = true;
    terminal.draw(|f| ui.draw(f))?;
    runtime.block_on(ui.perform(action));
    ui.busy = false;
    Ok(())
}

#[cfg(test)]
mod tests;
