//! Workshop listing with per-card booking controls.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::application::Route;
use crate::application::use_cases::{
    BookingCommand, BookingFlow, BookingState, DEFAULT_ERROR_DISPLAY,
};
use crate::domain::entities::{AuthToken, BookingConfirmation, TimeSlotId, Workshop, WorkshopId};
use crate::domain::errors::ApiError;

/// Shown instead of an empty list.
pub const EMPTY_WORKSHOPS_MESSAGE: &str =
    "No workshops available at the moment. Please check back later!";

/// One workshop with its slot selection and booking state.
pub struct WorkshopCard {
    workshop: Workshop,
    selected_slot: Option<usize>,
    flow: BookingFlow,
}

impl WorkshopCard {
    fn new(workshop: Workshop, error_display: Duration) -> Self {
        let selected_slot = (!workshop.time_slots().is_empty()).then_some(0);
        let flow = BookingFlow::new(workshop.id().clone()).with_error_display(error_display);

        Self {
            workshop,
            selected_slot,
            flow,
        }
    }

    #[must_use]
    pub const fn workshop(&self) -> &Workshop {
        &self.workshop
    }

    #[must_use]
    pub const fn flow(&self) -> &BookingFlow {
        &self.flow
    }

    fn selected_slot_id(&self) -> Option<&TimeSlotId> {
        self.selected_slot
            .and_then(|i| self.workshop.time_slots().get(i))
            .map(|slot| slot.id())
    }

    fn select_next_slot(&mut self) {
        let count = self.workshop.time_slots().len();
        if count > 0 {
            self.selected_slot = Some(self.selected_slot.map_or(0, |i| (i + 1) % count));
        }
    }

    fn select_previous_slot(&mut self) {
        let count = self.workshop.time_slots().len();
        if count > 0 {
            self.selected_slot = Some(self.selected_slot.map_or(0, |i| (i + count - 1) % count));
        }
    }

    fn height(&self) -> u16 {
        let slot_lines = self.workshop.time_slots().len().max(1);
        // title, date, description, label, slots, error, button, borders
        u16::try_from(slot_lines).unwrap_or(u16::MAX).saturating_add(8)
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let mut lines = vec![
            Line::from(Span::styled(
                self.workshop.title(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.workshop.display_date(),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(Span::styled(
                self.workshop.description(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(vec![
                Span::raw("Select a Time Slot "),
                Span::styled("*", Style::default().fg(Color::Red)),
            ]),
        ];

        if self.workshop.time_slots().is_empty() {
            lines.push(Line::from(Span::styled(
                "  No time slots available",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (i, slot) in self.workshop.time_slots().iter().enumerate() {
            let selected = self.selected_slot == Some(i);
            let marker = if selected { "(•)" } else { "( )" };
            let style = if selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {marker} {}  ", slot.time_range()), style),
                Span::styled(
                    format!("{} spots left", slot.available_spots()),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
        }

        lines.push(Line::from(Span::styled(
            self.flow.error_message().unwrap_or_default(),
            Style::default().fg(Color::Red),
        )));

        let button = if self.flow.can_submit() {
            Span::styled(
                " Book Now ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                " Booking... ",
                Style::default()
                    .fg(Color::Gray)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        };
        lines.push(Line::from(button));

        lines
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkshopsAction {
    None,
    /// Book the selected slot of the focused card.
    Book,
}

pub struct WorkshopsScreen {
    loading: bool,
    cards: Vec<WorkshopCard>,
    selected: usize,
    error_display: Duration,
}

impl WorkshopsScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            loading: true,
            cards: Vec::new(),
            selected: 0,
            error_display: DEFAULT_ERROR_DISPLAY,
        }
    }

    /// Sets how long a failed booking stays visible on its card.
    #[must_use]
    pub const fn with_error_display(mut self, duration: Duration) -> Self {
        self.error_display = duration;
        self
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn cards(&self) -> &[WorkshopCard] {
        &self.cards
    }

    /// Returns the focused card's booking state.
    #[must_use]
    pub fn selected_state(&self) -> Option<&BookingState> {
        self.cards.get(self.selected).map(|c| c.flow.state())
    }

    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    /// Replaces the listing. Cards start `Idle` with their first slot selected.
    pub fn set_workshops(&mut self, workshops: Vec<Workshop>) {
        self.loading = false;
        self.cards = workshops
            .into_iter()
            .map(|w| WorkshopCard::new(w, self.error_display))
            .collect();
        self.selected = 0;
    }

    /// Starts a booking on the focused card.
    ///
    /// Returns the command to send, or `None` if the card refused the attempt.
    pub fn begin_booking(&mut self, token: Option<&AuthToken>) -> Option<BookingCommand> {
        let card = self.cards.get_mut(self.selected)?;
        let slot = card.selected_slot_id().cloned();
        card.flow.begin(slot.as_ref(), token)
    }

    /// Applies a booking result to the card it was started from.
    pub fn complete_booking(
        &mut self,
        workshop_id: &WorkshopId,
        result: Result<BookingConfirmation, ApiError>,
    ) -> Option<Route> {
        let card = self
            .cards
            .iter_mut()
            .find(|c| c.workshop.id() == workshop_id)?;
        let route = card.flow.complete(result);
        if route.is_some() {
            card.flow.reset();
        }
        route
    }

    /// Expires failure messages. Returns `true` if anything changed.
    pub fn tick(&mut self) -> bool {
        self.cards
            .iter_mut()
            .fold(false, |changed, card| card.flow.tick() || changed)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> WorkshopsAction {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.cards.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => {
                if let Some(card) = self.cards.get_mut(self.selected) {
                    card.select_next_slot();
                }
            }
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => {
                if let Some(card) = self.cards.get_mut(self.selected) {
                    card.select_previous_slot();
                }
            }
            KeyCode::Enter | KeyCode::Char('b') if !self.cards.is_empty() => {
                return WorkshopsAction::Book;
            }
            _ => {}
        }

        WorkshopsAction::None
    }

    fn first_visible(&self, height: u16) -> usize {
        let mut used = 0u16;
        let mut first = self.selected;
        for (i, card) in self.cards.iter().enumerate().take(self.selected + 1).rev() {
            used = used.saturating_add(card.height());
            if used > height && i != self.selected {
                break;
            }
            first = i;
        }
        first
    }

    fn render_message(message: &str, style: Style, area: Rect, buf: &mut Buffer) {
        let y = area.y + area.height / 2;
        Paragraph::new(message)
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(Rect::new(area.x, y, area.width, area.height - area.height / 2), buf);
    }
}

impl Default for WorkshopsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &WorkshopsScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        if self.loading {
            WorkshopsScreen::render_message(
                "Loading workshops...",
                Style::default().fg(Color::Yellow),
                area,
                buf,
            );
            return;
        }

        if self.cards.is_empty() {
            WorkshopsScreen::render_message(
                EMPTY_WORKSHOPS_MESSAGE,
                Style::default().fg(Color::Gray),
                area,
                buf,
            );
            return;
        }

        let mut y = area.y;
        for (i, card) in self.cards.iter().enumerate().skip(self.first_visible(area.height)) {
            if y >= area.bottom() {
                break;
            }
            let height = card.height().min(area.bottom() - y);
            let card_area = Rect::new(area.x, y, area.width, height);

            let border_style = if i == self.selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let capacity = format!(" capacity {} ", card.workshop.max_capacity());
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title_bottom(Line::from(capacity).right_aligned());

            Paragraph::new(card.lines())
                .block(block)
                .render(card_area, buf);

            y = y.saturating_add(height);
        }
    }
}
