use std::fs;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend, buffer::Cell};
use taskboard_app::{AppConfig, Severity, TaskBoard};
use taskboard_client::{AppError, ErrorKind};
use taskboard_core::{Priority, TaskFilters, TaskId};
use tempfile::tempdir;
use tokio::time::Instant;

use super::form::Draft;
use super::view::{Mode, Ui, UiAction};
use crate::test_support::{FakeApi, sample_image};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ch(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

fn type_text(ui: &mut Ui<FakeApi>, text: &str) {
    for c in text.chars() {
        assert_eq!(ui.handle_key(ch(c)), None);
    }
}

fn unmounted(api: &FakeApi) -> Ui<FakeApi> {
    let config = AppConfig::default();
    Ui::new(TaskBoard::new(api.clone(), config.list.per_page), &config)
}

async fn mounted(api: &FakeApi) -> Ui<FakeApi> {
    let mut ui = unmounted(api);
    ui.perform(UiAction::Refresh).await;
    api.clear_requests();
    ui
}

fn render(ui: &Ui<FakeApi>) -> Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(120, 30))?;
    terminal.draw(|f| ui.draw(f))?;
    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width);
    let rows: Vec<String> = buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(Cell::symbol).collect())
        .collect();
    Ok(rows.join("\n"))
}

#[test]
fn first_frame_shows_loading() -> Result<()> {
    let ui = unmounted(&FakeApi::with_titles(&["a"]));
    let screen = render(&ui)?;
    assert!(screen.contains("Loading tasks..."));
    assert!(screen.contains("loading..."));
    Ok(())
}

#[tokio::test]
async fn mounted_board_renders_rows_filters_and_pages() -> Result<()> {
    let api = FakeApi::with_titles(&["Buy milk", "Walk dog"]);
    let ui = mounted(&api).await;

    let screen = render(&ui)?;
    assert!(screen.contains("Buy milk"));
    assert!(screen.contains("Walk dog"));
    assert!(screen.contains("No filters"));
    assert!(screen.contains("1-2 of 2 | page 1/1 | 10/page"));
    assert!(screen.contains("No messages"));
    Ok(())
}

#[tokio::test]
async fn space_toggles_selected_task_silently() {
    let api = FakeApi::with_titles(&["a", "b"]);
    let mut ui = mounted(&api).await;

    assert_eq!(ui.handle_key(ch('j')), None);
    let action = ui.handle_key(ch(' '));
    assert_eq!(
        action,
        Some(UiAction::Toggle {
            id: TaskId(2),
            completed: true
        })
    );
    if let Some(action) = action {
        ui.perform(action).await;
    }

    assert_eq!(api.task(TaskId(2)).map(|task| task.completed), Some(true));
    assert_eq!(
        api.requests(),
        vec![
            "update 2 completed=Some(true)".to_owned(),
            "list page=1 per_page=10".to_owned()
        ]
    );
    assert!(ui.board.notification().is_none());
    assert_eq!(ui.selected, 1);
}

#[tokio::test]
async fn delete_requires_confirmation() -> Result<()> {
    let api = FakeApi::with_titles(&["a", "b"]);
    let mut ui = mounted(&api).await;

    assert_eq!(ui.handle_key(ch('d')), None);
    assert!(matches!(ui.mode, Mode::ConfirmDelete { id, .. } if id == TaskId(1)));
    assert!(render(&ui)?.contains("Delete \"a\"?"));
    assert_eq!(ui.handle_key(ch('n')), None);
    assert_eq!(ui.mode, Mode::Browse);

    ui.handle_key(ch('d'));
    let action = ui.handle_key(ch('y'));
    assert_eq!(action, Some(UiAction::Delete { id: TaskId(1) }));
    if let Some(action) = action {
        ui.perform(action).await;
    }

    assert_eq!(ui.board.tasks().len(), 1);
    assert!(render(&ui)?.contains("Task deleted"));
    Ok(())
}

#[tokio::test]
async fn details_popup_lists_attachments() -> Result<()> {
    let api = FakeApi::with_titles(&["Plain", "Pictures"]);
    let mut cat = sample_image(1);
    cat.filename = "cat.png".to_owned();
    cat.byte_size = 1229;
    api.attach_image(TaskId(2), cat);
    api.attach_image(TaskId(2), sample_image(2));
    let mut ui = mounted(&api).await;

    assert_eq!(ui.handle_key(ch('i')), None);
    assert_eq!(ui.mode, Mode::Details { id: TaskId(1) });
    assert!(render(&ui)?.contains("No images"));
    assert_eq!(ui.handle_key(key(KeyCode::Esc)), None);
    assert_eq!(ui.mode, Mode::Browse);

    ui.handle_key(ch('j'));
    assert_eq!(ui.handle_key(key(KeyCode::Enter)), None);
    let screen = render(&ui)?;
    assert!(screen.contains("#2 Pictures"));
    assert!(screen.contains("Images (2)"));
    assert!(screen.contains("cat.png (1.2 KB) http://localhost:3001/images/1"));
    assert!(screen.contains("2.png (4 Bytes) http://localhost:3001/images/2"));
    assert!(api.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn search_input_is_debounced() {
    let api = FakeApi::with_titles(&["Buy milk", "Walk dog"]);
    let mut ui = mounted(&api).await;
    let delay = ui.search.delay();

    ui.handle_key(ch('/'));
    type_text(&mut ui, "Bu");
    assert_eq!(ui.tick_at(Instant::now()), None);
    assert!(api.requests().is_empty());

    let action = ui.tick_at(Instant::now() + delay);
    assert_eq!(action, Some(UiAction::ApplySearch("Bu".to_owned())));
    if let Some(action) = action {
        ui.perform(action).await;
    }

    assert_eq!(ui.board.filters().search_term(), Some("Bu"));
    assert_eq!(ui.board.tasks().len(), 1);
    assert_eq!(api.requests(), vec!["list page=1 per_page=10".to_owned()]);
    assert!(matches!(ui.mode, Mode::Search { .. }));
}

#[tokio::test]
async fn enter_applies_search_now_and_esc_discards_pending_input() {
    let api = FakeApi::with_titles(&["a"]);
    let mut ui = mounted(&api).await;

    ui.handle_key(ch('/'));
    type_text(&mut ui, "xy");
    assert_eq!(
        ui.handle_key(key(KeyCode::Enter)),
        Some(UiAction::ApplySearch("xy".to_owned()))
    );
    assert!(!ui.search.is_pending());
    assert_eq!(ui.mode, Mode::Browse);

    ui.handle_key(ch('/'));
    type_text(&mut ui, "z");
    assert_eq!(ui.handle_key(key(KeyCode::Esc)), None);
    assert!(!ui.search.is_pending());
    assert_eq!(ui.tick_at(Instant::now() + Duration::from_secs(60)), None);
}

#[tokio::test]
async fn quitting_cancels_pending_search() {
    let api = FakeApi::with_titles(&["a"]);
    let mut ui = mounted(&api).await;

    ui.handle_key(ch('/'));
    type_text(&mut ui, "a");
    assert!(ui.search.is_pending());
    ui.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

    assert!(ui.should_quit);
    assert!(!ui.search.is_pending());
    assert!(api.requests().is_empty());
}

#[tokio::test]
async fn filter_keys_cycle_and_clear() {
    let api = FakeApi::with_titles(&["a"]);
    let mut ui = mounted(&api).await;

    assert_eq!(ui.handle_key(ch('x')), None);

    let action = ui.handle_key(ch('p'));
    assert_eq!(
        action,
        Some(UiAction::ApplyFilters(TaskFilters::default().with_priority(Priority::High)))
    );
    if let Some(action) = action {
        ui.perform(action).await;
    }
    let action = ui.handle_key(ch('c'));
    assert_eq!(
        action,
        Some(UiAction::ApplyFilters(
            TaskFilters::default()
                .with_priority(Priority::High)
                .with_completed(false)
        ))
    );
    if let Some(action) = action {
        ui.perform(action).await;
    }

    assert_eq!(
        ui.handle_key(ch('x')),
        Some(UiAction::ApplyFilters(TaskFilters::default()))
    );
}

#[tokio::test]
async fn paging_keys_follow_pagination() {
    let titles: Vec<String> = (1..=12).map(|n| format!("task {n}")).collect();
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    let api = FakeApi::with_titles(&titles);
    let mut ui = mounted(&api).await;

    assert_eq!(ui.handle_key(ch('h')), None);
    ui.handle_key(ch('j'));
    let action = ui.handle_key(key(KeyCode::Right));
    assert_eq!(action, Some(UiAction::ChangePage(2)));
    if let Some(action) = action {
        ui.perform(action).await;
    }

    assert_eq!(ui.board.current_page(), 2);
    assert_eq!(ui.board.tasks().len(), 2);
    assert_eq!(ui.selected, 0);
    assert_eq!(ui.handle_key(ch('l')), None);
    assert_eq!(ui.handle_key(ch('h')), Some(UiAction::ChangePage(1)));
    assert_eq!(ui.handle_key(ch('+')), Some(UiAction::ChangePerPage(20)));
    assert_eq!(ui.handle_key(ch('-')), Some(UiAction::ChangePerPage(50)));
}

#[tokio::test]
async fn new_task_form_validates_before_sending() -> Result<()> {
    let api = FakeApi::default();
    let mut ui = mounted(&api).await;

    ui.handle_key(ch('n'));
    assert!(render(&ui)?.contains("New task"));
    assert_eq!(ui.handle_key(key(KeyCode::Enter)), None);
    assert!(matches!(ui.mode, Mode::NewTask(_)));
    assert_eq!(
        ui.board.notification().map(|n| (n.severity, n.message.as_str())),
        Some((Severity::Warning, "Title is required"))
    );

    type_text(&mut ui, "Tea");
    ui.handle_key(key(KeyCode::Tab));
    type_text(&mut ui, "green");
    ui.handle_key(key(KeyCode::Tab));
    ui.handle_key(key(KeyCode::Right));
    let action = ui.handle_key(key(KeyCode::Enter));
    assert_eq!(
        action,
        Some(UiAction::Create(Draft {
            title: "Tea".to_owned(),
            description: "green".to_owned(),
            priority: Priority::High,
            images: Vec::new(),
        }))
    );
    assert_eq!(ui.mode, Mode::Browse);
    if let Some(action) = action {
        ui.perform(action).await;
    }

    assert_eq!(
        api.requests(),
        vec![
            "create Tea images=0".to_owned(),
            "list page=1 per_page=10".to_owned()
        ]
    );
    assert!(render(&ui)?.contains("Task added"));
    Ok(())
}

#[tokio::test]
async fn new_task_form_enforces_upload_policy() -> Result<()> {
    let dir = tempdir()?;
    let doc = dir.path().join("notes.txt");
    fs::write(&doc, b"hello")?;
    let api = FakeApi::default();
    let mut ui = mounted(&api).await;

    ui.handle_key(ch('n'));
    type_text(&mut ui, "Read");
    for _ in 0..3 {
        ui.handle_key(key(KeyCode::Tab));
    }
    type_text(&mut ui, &doc.display().to_string());

    assert_eq!(ui.handle_key(key(KeyCode::Enter)), None);
    assert!(api.requests().is_empty());
    let Some(shown) = ui.board.notification() else {
        panic!("policy violation should warn");
    };
    assert_eq!(shown.severity, Severity::Warning);
    assert!(shown.message.contains("unsupported type text/plain"));
    Ok(())
}

#[tokio::test]
async fn fetch_failure_shows_error_toast_that_expires() -> Result<()> {
    let api = FakeApi::with_titles(&["a"]);
    let mut ui = mounted(&api).await;

    api.fail_next(AppError::new(ErrorKind::Server, "boom"));
    ui.perform(UiAction::Refresh).await;

    assert_eq!(ui.board.tasks().len(), 1);
    assert!(render(&ui)?.contains("Failed to load tasks: Server error. Please try again later."));

    assert_eq!(ui.tick_at(Instant::now()), None);
    assert!(ui.board.notification().is_some());
    ui.tick_at(Instant::now() + Duration::from_secs(60));
    assert!(ui.board.notification().is_none());
    Ok(())
}
