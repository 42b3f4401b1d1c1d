use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use taskboard_core::{Priority, Task};

use super::super::constants::{TASK_LIST_HIGHLIGHT_SYMBOL, TITLE_MAX_GRAPHEMES};
use super::super::view::Ui;
use crate::view::{status_marker, truncate_with_ellipsis};

impl<A> Ui<A> {
    pub(in crate::tui) fn draw_task_list(&self, f: &mut Frame<'_>, area: Rect) {
        let tasks = self.board.tasks();
        let items: Vec<ListItem<'_>> = if tasks.is_empty() {
            let message = if self.board.is_loading() {
                "Loading tasks..."
            } else if self.board.filters().is_empty() {
                "No tasks yet"
            } else {
                "No tasks matched the current filters"
            };
            vec![ListItem::new(Line::from(message))]
        } else {
            tasks.iter().map(task_item).collect()
        };

        let list = List::new(items)
            .block(Block::default().title("Tasks").borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(TASK_LIST_HIGHLIGHT_SYMBOL);
        let mut state = ListState::default();
        if !tasks.is_empty() {
            state.select(Some(self.selected));
        }
        f.render_stateful_widget(list, area, &mut state);
    }
}

fn task_item(task: &Task) -> ListItem<'_> {
    let title_style = if task.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let title = Line::from(vec![
        Span::raw(format!("{} ", status_marker(task.completed))),
        Span::styled(
            format!("{:<6} ", task.priority.label()),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::styled(truncate_with_ellipsis(&task.title, TITLE_MAX_GRAPHEMES), title_style),
    ]);

    let mut meta = format!("#{}", task.id);
    match task.images.len() {
        0 => {}
        1 => meta.push_str(" | 1 image"),
        n => meta.push_str(&format!(" | {n} images")),
    }
    if let Some(description) = task.description.as_deref().filter(|text| !text.is_empty()) {
        meta.push_str(" | ");
        meta.push_str(&truncate_with_ellipsis(description, TITLE_MAX_GRAPHEMES));
    }
    let meta = Line::from(Span::styled(meta, Style::default().fg(Color::DarkGray)));

    ListItem::new(vec![title, meta])
}

const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}
