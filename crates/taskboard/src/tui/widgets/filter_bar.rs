use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::super::view::{Mode, Ui, severity_style};
use crate::view::{filter_summary, page_strip, pagination_summary};

impl<A> Ui<A> {
    pub(in crate::tui) fn draw_filter_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let (title, text, style) = match &self.mode {
            Mode::Search { input } => (
                "Search (Enter apply, Esc cancel)",
                format!("{input}_"),
                Style::default().fg(Color::Yellow),
            ),
            _ => (
                "Filters",
                filter_summary(self.board.filters()),
                Style::default(),
            ),
        };
        let bar = Paragraph::new(text)
            .style(style)
            .block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(bar, area);
    }

    pub(in crate::tui) fn draw_status(&self, f: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Self::PAGINATION_HEIGHT),
                Constraint::Length(Self::INSTRUCTIONS_HEIGHT),
                Constraint::Min(Self::STATUS_MESSAGE_HEIGHT),
            ])
            .split(area);

        let pagination = Paragraph::new(self.pagination_text())
            .block(Block::default().title("Pages").borders(Borders::ALL));
        f.render_widget(pagination, rows[0]);

        let instructions = Paragraph::new(self.instructions())
            .block(Block::default().title("Keys").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(instructions, rows[1]);

        let (text, style) = self
            .board
            .notification()
            .map_or(("No messages", Style::default()), |shown| {
                (shown.message.as_str(), severity_style(shown.severity))
            });
        let message = Paragraph::new(text)
            .style(style)
            .block(Block::default().title("Status").borders(Borders::ALL));
        f.render_widget(message, rows[2]);
    }

    fn pagination_text(&self) -> String {
        let pagination = self.board.pagination();
        let mut text = format!(
            "{} | {}/page",
            pagination_summary(pagination),
            self.board.per_page()
        );
        let strip = page_strip(pagination);
        if !strip.is_empty() {
            text.push_str(" | ");
            text.push_str(&strip);
        }
        if self.busy || self.board.is_loading() {
            text.push_str(" | loading...");
        }
        text
    }

    pub(in crate::tui) const fn instructions(&self) -> &'static str {
        match self.mode {
            Mode::Browse => {
                "j/k move  space toggle  i details  d delete  n new  / search  p/c filter  x clear  h/l page  +/- size  r reload  q quit"
            }
            Mode::Search { .. } => "type to search  Enter apply now  Esc cancel",
            Mode::ConfirmDelete { .. } => "y delete  any other key cancels",
            Mode::Details { .. } => "any key closes",
            Mode::NewTask(_) => "Tab/Shift-Tab field  Left/Right priority  Enter create  Esc cancel",
        }
    }
}
