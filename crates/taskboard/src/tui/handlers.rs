use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use taskboard_app::TaskApi;
use taskboard_core::{Priority, TaskFilters};
use tokio::time::Instant;

use super::form::NewTaskForm;
use super::view::{Mode, Ui, UiAction};

impl<A: TaskApi> Ui<A> {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return None;
        }

        match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Search { .. } => self.handle_search_key(key),
            Mode::ConfirmDelete { .. } => self.handle_confirm_key(key),
            Mode::Details { .. } => {
                self.mode = Mode::Browse;
                None
            }
            Mode::NewTask(_) => self.handle_form_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_prev();
                None
            }
            KeyCode::Char(' ') => self.selected_task().map(|task| UiAction::Toggle {
                id: task.id,
                completed: !task.completed,
            }),
            KeyCode::Char('i') | KeyCode::Enter => {
                if let Some(task) = self.selected_task() {
                    self.mode = Mode::Details { id: task.id };
                }
                None
            }
            KeyCode::Char('d') => {
                if let Some(task) = self.selected_task() {
                    self.mode = Mode::ConfirmDelete {
                        id: task.id,
                        title: task.title.clone(),
                    };
                }
                None
            }
            KeyCode::Char('n') => {
                self.mode = Mode::NewTask(NewTaskForm::new());
                None
            }
            KeyCode::Char('/') => {
                let input = self.board.filters().search.clone().unwrap_or_default();
                self.mode = Mode::Search { input };
                None
            }
            KeyCode::Char('p') => {
                let mut filters = self.board.filters().clone();
                filters.priority = next_priority_filter(filters.priority);
                Some(UiAction::ApplyFilters(filters))
            }
            KeyCode::Char('c') => {
                let mut filters = self.board.filters().clone();
                filters.completed = next_completion_filter(filters.completed);
                Some(UiAction::ApplyFilters(filters))
            }
            KeyCode::Char('x') => (!self.board.filters().is_empty())
                .then(|| UiAction::ApplyFilters(TaskFilters::default())),
            KeyCode::Char('h') | KeyCode::Left => {
                self.board.pagination().prev_page.map(UiAction::ChangePage)
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.board.pagination().next_page.map(UiAction::ChangePage)
            }
            KeyCode::Char('+') => Some(UiAction::ChangePerPage(
                self.list.next_per_page(self.board.per_page()),
            )),
            KeyCode::Char('-') => Some(UiAction::ChangePerPage(
                self.list.prev_per_page(self.board.per_page()),
            )),
            KeyCode::Char('r') => Some(UiAction::Refresh),
            _ => None,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        let Mode::Search { input } = &mut self.mode else {
            return None;
        };
        match key.code {
            KeyCode::Enter => {
                let term = std::mem::take(input);
                self.search.cancel();
                self.mode = Mode::Browse;
                Some(UiAction::ApplySearch(term))
            }
            KeyCode::Esc => {
                self.search.cancel();
                self.mode = Mode::Browse;
                None
            }
            KeyCode::Backspace => {
                input.pop();
                self.search.push(input.clone());
                None
            }
            KeyCode::Char(ch) => {
                input.push(ch);
                self.search.push(input.clone());
                None
            }
            _ => None,
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        let Mode::ConfirmDelete { id, .. } = self.mode else {
            return None;
        };
        self.mode = Mode::Browse;
        matches!(key.code, KeyCode::Char('y' | 'Y')).then_some(UiAction::Delete { id })
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        let Mode::NewTask(form) = &mut self.mode else {
            return None;
        };
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                form.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.focus_prev();
                None
            }
            KeyCode::Right => {
                form.raise_priority();
                None
            }
            KeyCode::Left => {
                form.lower_priority();
                None
            }
            KeyCode::Backspace => {
                form.backspace();
                None
            }
            KeyCode::Enter => match form.submit(&self.upload) {
                Ok(draft) => {
                    self.mode = Mode::Browse;
                    Some(UiAction::Create(draft))
                }
                Err(reason) => {
                    self.warn(reason);
                    None
                }
            },
            KeyCode::Char(ch) => {
                form.input(ch);
                None
            }
            _ => None,
        }
    }

    pub(super) fn tick(&mut self) -> Option<UiAction> {
        self.tick_at(Instant::now())
    }

    /// Expire the toast and release settled search input.
    pub(super) fn tick_at(&mut self, now: Instant) -> Option<UiAction> {
        self.expire_toast(now);
        self.search.take_ready_at(now).map(UiAction::ApplySearch)
    }

    /// Run `action` against the board.
    pub(super) async fn perform(&mut self, action: UiAction) {
        match action {
            UiAction::Refresh => {
                self.board.refresh().await;
            }
            UiAction::Toggle { id, completed } => {
                self.board.toggle_task(id, completed).await;
            }
            UiAction::Delete { id } => {
                self.board.delete_task(id).await;
            }
            UiAction::Create(draft) => {
                self.board
                    .create_task(&draft.title, &draft.description, draft.priority, draft.images)
                    .await;
            }
            UiAction::ApplyFilters(filters) => {
                self.selected = 0;
                self.board.handle_filters_change(filters).await;
            }
            UiAction::ApplySearch(term) => {
                self.selected = 0;
                let filters = TaskFilters {
                    search: (!term.is_empty()).then_some(term),
                    ..self.board.filters().clone()
                };
                self.board.handle_filters_change(filters).await;
            }
            UiAction::ChangePage(page) => {
                self.selected = 0;
                self.board.handle_page_change(page).await;
            }
            UiAction::ChangePerPage(per_page) => {
                self.selected = 0;
                self.board.handle_per_page_change(per_page).await;
            }
        }
        self.clamp_selection();
        self.sync_toast(Instant::now());
    }
}

/// All, then each priority from highest to lowest.
fn next_priority_filter(current: Option<Priority>) -> Option<Priority> {
    match current {
        None => Priority::ALL.first().copied(),
        Some(priority) => Priority::ALL
            .iter()
            .position(|candidate| *candidate == priority)
            .and_then(|index| Priority::ALL.get(index + 1))
            .copied(),
    }
}

/// All, open, completed.
const fn next_completion_filter(current: Option<bool>) -> Option<bool> {
    match current {
        None => Some(false),
        Some(false) => Some(true),
        Some(true) => None,
    }
}
