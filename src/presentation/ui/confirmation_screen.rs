use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::domain::entities::BookingId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationAction {
    None,
    BrowseWorkshops,
}

/// Shown after a booking was created.
pub struct ConfirmationScreen {
    booking_id: BookingId,
}

impl ConfirmationScreen {
    #[must_use]
    pub const fn new(booking_id: BookingId) -> Self {
        Self { booking_id }
    }

    #[must_use]
    pub const fn booking_id(&self) -> &BookingId {
        &self.booking_id
    }

    pub fn handle_key(&self, key: KeyEvent) -> ConfirmationAction {
        match key.code {
            KeyCode::Enter | KeyCode::Char('b') => ConfirmationAction::BrowseWorkshops,
            _ => ConfirmationAction::None,
        }
    }
}

impl Widget for &ConfirmationScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(11),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, content_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(56),
            Constraint::Fill(1),
        ])
        .areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                "✔ Booking Confirmed!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from("Thank you for your booking. Your confirmation ID is:"),
            Line::from(Span::styled(
                format!(" {} ", self.booking_id),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )),
            Line::default(),
            Line::from(Span::styled(
                "You will receive an email confirmation shortly.",
                Style::default().fg(Color::Gray),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Enter: Browse More Workshops",
                Style::default().fg(Color::Cyan),
            )),
        ];

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .render(content_area, buf);
    }
}
