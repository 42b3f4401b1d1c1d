use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use taskboard_core::TaskId;

use super::super::constants::{
    CONFIRM_HEIGHT, CONFIRM_MIN_WIDTH, CONFIRM_WIDTH_PERCENT, DETAILS_MIN_WIDTH,
    DETAILS_WIDTH_PERCENT, FORM_HEIGHT, FORM_MIN_WIDTH, FORM_WIDTH_PERCENT,
};
use super::super::form::{FormField, NewTaskForm};
use super::super::view::{Mode, Ui};
use super::util::centered_rect;
use crate::view::{attachment_line, completion_label};

impl<A> Ui<A> {
    pub(in crate::tui) fn draw_confirm_delete(&self, f: &mut Frame<'_>) {
        let Mode::ConfirmDelete { id, title } = &self.mode else {
            return;
        };
        let popup_area = centered_rect(
            f.area(),
            CONFIRM_WIDTH_PERCENT,
            CONFIRM_MIN_WIDTH,
            CONFIRM_HEIGHT,
        );
        let block = Block::default()
            .title(format!("Delete task #{id}"))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let body = Paragraph::new(vec![
            Line::from(format!("Delete \"{title}\"?")),
            Line::from(Span::styled(
                "y: delete / other: cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(block)
        .wrap(Wrap { trim: true });

        f.render_widget(Clear, popup_area);
        f.render_widget(body, popup_area);
    }

    pub(in crate::tui) fn draw_task_details(&self, f: &mut Frame<'_>, id: TaskId) {
        let Some(task) = self.board.tasks().iter().find(|task| task.id == id) else {
            return;
        };
        let dim = Style::default().fg(Color::DarkGray);

        let mut lines = vec![
            Line::from(format!(
                "Priority: {}  Status: {}",
                task.priority.label(),
                completion_label(Some(task.completed))
            )),
            task.description
                .as_deref()
                .filter(|text| !text.is_empty())
                .map_or_else(
                    || Line::from(Span::styled("No description", dim)),
                    |description| Line::from(description.to_owned()),
                ),
            Line::default(),
        ];
        if task.images.is_empty() {
            lines.push(Line::from(Span::styled("No images", dim)));
        } else {
            lines.push(Line::from(Span::styled(
                format!("Images ({})", task.images.len()),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.extend(task.images.iter().map(|image| Line::from(attachment_line(image))));
        }

        let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
        let popup_area = centered_rect(f.area(), DETAILS_WIDTH_PERCENT, DETAILS_MIN_WIDTH, height);
        let block = Block::default()
            .title(format!("#{} {}", task.id, task.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        f.render_widget(Clear, popup_area);
        f.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            popup_area,
        );
    }

    pub(in crate::tui) fn draw_new_task_form(&self, f: &mut Frame<'_>, form: &NewTaskForm) {
        let popup_area = centered_rect(f.area(), FORM_WIDTH_PERCENT, FORM_MIN_WIDTH, FORM_HEIGHT);
        let block = Block::default()
            .title("New task")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let mut lines = Vec::new();
        for field in FormField::ALL {
            let focused = field == form.focus;
            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let value = match field {
                FormField::Priority => format!("< {} >", form.value(field)),
                _ if focused => format!("{}_", form.value(field)),
                _ => form.value(field).to_owned(),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<12}", field.label()), label_style),
                Span::raw(value),
            ]));
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            format!(
                "Images: comma-separated paths, up to {} files of {} bytes",
                self.upload.max_images, self.upload.max_file_size
            ),
            Style::default().fg(Color::DarkGray),
        )));

        f.render_widget(Clear, popup_area);
        f.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            popup_area,
        );
    }
}
