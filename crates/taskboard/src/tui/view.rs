use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
};
use taskboard_app::{
    AppConfig, Debouncer, ListConfig, Notification, NotificationConfig, Severity, TaskBoard,
    UploadPolicy,
};
use taskboard_core::{Task, TaskFilters, TaskId};
use tokio::time::Instant;

use super::form::{Draft, NewTaskForm};

/// What the keyboard is currently driving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Mode {
    Browse,
    /// Editing the search text; changes are applied after the debounce window.
    Search { input: String },
    ConfirmDelete { id: TaskId, title: String },
    /// Showing one task with its attachments.
    Details { id: TaskId },
    NewTask(NewTaskForm),
}

/// Backend work requested by a key press or a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum UiAction {
    Refresh,
    Toggle { id: TaskId, completed: bool },
    Delete { id: TaskId },
    Create(Draft),
    ApplyFilters(TaskFilters),
    ApplySearch(String),
    ChangePage(u32),
    ChangePerPage(u32),
}

/// Notification currently on screen and when it appeared.
struct Toast {
    shown: Notification,
    since: Instant,
}

pub(super) struct Ui<A> {
    pub(super) board: TaskBoard<A>,
    pub(super) selected: usize,
    pub(super) mode: Mode,
    pub(super) search: Debouncer<String>,
    pub(super) list: ListConfig,
    pub(super) notification_config: NotificationConfig,
    pub(super) upload: UploadPolicy,
    toast: Option<Toast>,
    /// Set while an action is being awaited so the frame drawn before it can say so.
    pub(super) busy: bool,
    pub(super) should_quit: bool,
}

impl<A> Ui<A> {
    pub(super) const FILTER_HEIGHT: u16 = 3;
    pub(super) const MAIN_MIN_HEIGHT: u16 = 5;
    pub(super) const PAGINATION_HEIGHT: u16 = 3;
    pub(super) const INSTRUCTIONS_HEIGHT: u16 = 3;
    pub(super) const STATUS_MESSAGE_HEIGHT: u16 = 3;
    pub(super) const STATUS_FOOTER_HEIGHT: u16 =
        Self::PAGINATION_HEIGHT + Self::INSTRUCTIONS_HEIGHT + Self::STATUS_MESSAGE_HEIGHT;

    pub(super) fn new(board: TaskBoard<A>, config: &AppConfig) -> Self {
        Self {
            board,
            selected: 0,
            mode: Mode::Browse,
            search: Debouncer::new(config.filter.debounce()),
            list: config.list.clone(),
            notification_config: config.notification.clone(),
            upload: config.upload.clone(),
            toast: None,
            busy: false,
            should_quit: false,
        }
    }

    pub(super) fn selected_task(&self) -> Option<&Task> {
        self.board.tasks().get(self.selected)
    }

    pub(super) fn select_next(&mut self) {
        if self.selected + 1 < self.board.tasks().len() {
            self.selected += 1;
        }
    }

    pub(super) const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(super) fn clamp_selection(&mut self) {
        let len = self.board.tasks().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Leave the UI, dropping any search input still waiting to be applied.
    pub(super) fn quit(&mut self) {
        self.search.cancel();
        self.should_quit = true;
    }

    pub(super) fn warn(&mut self, message: impl Into<String>) {
        self.board.notifications_mut().show_warning(message, None);
        self.sync_toast(Instant::now());
    }

    /// Restart the display timer when the board holds a different notification.
    pub(super) fn sync_toast(&mut self, now: Instant) {
        let Some(current) = self.board.notification() else {
            self.toast = None;
            return;
        };
        if self.toast.as_ref().is_some_and(|toast| &toast.shown == current) {
            return;
        }
        self.toast = Some(Toast {
            shown: current.clone(),
            since: now,
        });
    }

    /// Dismiss the toast once its display duration has elapsed.
    pub(super) fn expire_toast(&mut self, now: Instant) {
        let Some(toast) = &self.toast else {
            return;
        };
        let ttl = toast.shown.display_duration(&self.notification_config);
        if now.saturating_duration_since(toast.since) >= ttl {
            self.board.clear_notification();
            self.toast = None;
        }
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Self::FILTER_HEIGHT),
                Constraint::Min(Self::MAIN_MIN_HEIGHT),
                Constraint::Length(Self::STATUS_FOOTER_HEIGHT),
            ])
            .split(f.area());

        self.draw_filter_bar(f, chunks[0]);
        self.draw_task_list(f, chunks[1]);
        self.draw_status(f, chunks[2]);

        match &self.mode {
            Mode::ConfirmDelete { .. } => self.draw_confirm_delete(f),
            Mode::Details { id } => self.draw_task_details(f, *id),
            Mode::NewTask(form) => self.draw_new_task_form(f, form),
            Mode::Browse | Mode::Search { .. } => {}
        }
    }
}

pub(super) const fn severity_style(severity: Severity) -> Style {
    let color = match severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Cyan,
    };
    Style::new().fg(color)
}
