use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Centered yes/no modal.
pub struct ConfirmDialog<'a> {
    title: &'a str,
    message: &'a str,
    busy: bool,
}

impl<'a> ConfirmDialog<'a> {
    #[must_use]
    pub const fn new(title: &'a str, message: &'a str) -> Self {
        Self {
            title,
            message,
            busy: false,
        }
    }

    /// Replaces the key hints with a progress line.
    #[must_use]
    pub const fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, dialog_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Max(50),
            Constraint::Fill(1),
        ])
        .areas(center);

        Clear.render(dialog_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" {} ", self.title));
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let [message_area, _, hint_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.message)
            .wrap(Wrap { trim: true })
            .render(message_area, buf);

        let hint = if self.busy {
            Line::from(Span::styled(
                "Canceling...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(vec![
                Span::styled(" y ", Style::default().fg(Color::Black).bg(Color::Red)),
                Span::raw(" Confirm  "),
                Span::styled(" n ", Style::default().fg(Color::White).bg(Color::DarkGray)),
                Span::raw(" Keep booking"),
            ])
        };
        Paragraph::new(hint).render(hint_area, buf);
    }
}
