//! Customer bookings with cancellation.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::application::state::BookingList;
use crate::application::use_cases::CancelBookingUseCase;
use crate::domain::entities::{Booking, BookingId, BookingStatus};
use crate::domain::errors::ApiError;
use crate::presentation::widgets::ConfirmDialog;

pub const LOGIN_TO_VIEW_MESSAGE: &str = "Please login to see your bookings.";
pub const NO_BOOKINGS_MESSAGE: &str = "You have no bookings yet.";
pub const CANCEL_PROMPT: &str = "Are you sure you want to cancel this booking?";

#[derive(Debug, Clone, PartialEq, Eq)]
enum BookingsView {
    LoginRequired,
    Loading,
    Failed(String),
    Loaded(BookingList),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingsAction {
    None,
    /// User confirmed canceling this booking.
    Cancel(BookingId),
    BrowseWorkshops,
}

#[derive(Debug)]
struct CancelDialog {
    booking_id: BookingId,
    in_flight: bool,
}

pub struct BookingsScreen {
    view: BookingsView,
    selected: usize,
    dialog: Option<CancelDialog>,
}

fn status_style(status: BookingStatus) -> Style {
    let (fg, bg) = match status {
        BookingStatus::Pending => (Color::Black, Color::Yellow),
        BookingStatus::Confirmed => (Color::Black, Color::Green),
        BookingStatus::Canceled => (Color::White, Color::Red),
    };
    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
}

fn booking_item(booking: &Booking) -> ListItem<'_> {
    let mut status_line = vec![Span::styled(
        format!(" {} ", booking.status()),
        status_style(booking.status()),
    )];
    if booking.status().is_cancelable() {
        status_line.push(Span::styled(
            "  c: Cancel Booking",
            Style::default().fg(Color::DarkGray),
        ));
    }

    ListItem::new(Text::from(vec![
        Line::from(Span::styled(
            booking.workshop().title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            booking.schedule_label(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(status_line),
        Line::default(),
    ]))
}

impl BookingsScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: BookingsView::LoginRequired,
            selected: 0,
            dialog: None,
        }
    }

    pub fn set_login_required(&mut self) {
        self.view = BookingsView::LoginRequired;
        self.dialog = None;
    }

    pub fn set_loading(&mut self) {
        self.view = BookingsView::Loading;
        self.dialog = None;
    }

    pub fn set_failed(&mut self, message: impl Into<String>) {
        self.view = BookingsView::Failed(message.into());
    }

    pub fn set_bookings(&mut self, bookings: BookingList) {
        self.view = BookingsView::Loaded(bookings);
        self.selected = 0;
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.view, BookingsView::Loading)
    }

    /// Returns the listing once loaded.
    #[must_use]
    pub fn bookings(&self) -> Option<&BookingList> {
        match &self.view {
            BookingsView::Loaded(list) => Some(list),
            _ => None,
        }
    }

    /// Returns whether the confirmation dialog is open.
    #[must_use]
    pub const fn is_modal(&self) -> bool {
        self.dialog.is_some()
    }

    /// Marks the confirmed cancel as sent.
    pub fn set_canceling(&mut self) {
        if let Some(dialog) = &mut self.dialog {
            dialog.in_flight = true;
        }
    }

    /// Closes the dialog without sending anything.
    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Applies a cancel result. On success only that booking becomes
    /// `CANCELED`; on failure the listing is unchanged. The dialog closes
    /// either way.
    pub fn finish_cancel(&mut self, booking_id: &BookingId, result: &Result<(), ApiError>) {
        if self
            .dialog
            .as_ref()
            .is_some_and(|d| &d.booking_id == booking_id)
        {
            self.dialog = None;
        }

        if let BookingsView::Loaded(list) = &mut self.view {
            CancelBookingUseCase::apply(list, booking_id, result);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> BookingsAction {
        if let Some(dialog) = &self.dialog {
            if dialog.in_flight {
                return BookingsAction::None;
            }
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    BookingsAction::Cancel(dialog.booking_id.clone())
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.dialog = None;
                    BookingsAction::None
                }
                _ => BookingsAction::None,
            };
        }

        let BookingsView::Loaded(list) = &self.view else {
            return BookingsAction::None;
        };

        match key.code {
            KeyCode::Enter if list.is_empty() => return BookingsAction::BrowseWorkshops,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < list.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('c') | KeyCode::Delete => {
                if let Some(booking) = list.get(self.selected)
                    && booking.status().is_cancelable()
                {
                    self.dialog = Some(CancelDialog {
                        booking_id: booking.id().clone(),
                        in_flight: false,
                    });
                }
            }
            _ => {}
        }

        BookingsAction::None
    }

    fn render_centered(text: Text<'_>, area: Rect, buf: &mut Buffer) {
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(u16::try_from(text.height()).unwrap_or(u16::MAX)),
            Constraint::Fill(1),
        ])
        .areas(area);
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(center, buf);
    }

    fn render_list(&self, list: &BookingList, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" My Bookings ");

        if list.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Self::render_centered(
                Text::from(vec![
                    Line::from(NO_BOOKINGS_MESSAGE),
                    Line::default(),
                    Line::from(Span::styled(
                        "Press Enter to Browse Workshops",
                        Style::default().fg(Color::Cyan),
                    )),
                ]),
                inner,
                buf,
            );
            return;
        }

        let items: Vec<ListItem<'_>> = list.bookings().iter().map(booking_item).collect();
        let widget = List::new(items)
            .block(block)
            .highlight_symbol("▌ ")
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(widget, area, buf, &mut state);
    }
}

impl Default for BookingsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &BookingsScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.view {
            BookingsView::LoginRequired => BookingsScreen::render_centered(
                Text::from(vec![
                    Line::from(LOGIN_TO_VIEW_MESSAGE),
                    Line::from(Span::styled(
                        "Press C-l to log in",
                        Style::default().fg(Color::Cyan),
                    )),
                ]),
                area,
                buf,
            ),
            BookingsView::Loading => BookingsScreen::render_centered(
                Text::styled(
                    "Loading your bookings...",
                    Style::default().fg(Color::Yellow),
                ),
                area,
                buf,
            ),
            BookingsView::Failed(message) => BookingsScreen::render_centered(
                Text::styled(message.as_str(), Style::default().fg(Color::Red)),
                area,
                buf,
            ),
            BookingsView::Loaded(list) => self.render_list(list, area, buf),
        }

        if let Some(dialog) = &self.dialog {
            ConfirmDialog::new("Cancel Booking", CANCEL_PROMPT)
                .busy(dialog.in_flight)
                .render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{TimeSlotSummary, WorkshopSummary};
    use crate::presentation::ui::test_utils::buffer_text;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn booking(id: &str, status: BookingStatus) -> Booking {
        Booking::new(
            id,
            status,
            WorkshopSummary {
                title: format!("Workshop {id}"),
                date: "2026-11-02".into(),
            },
            TimeSlotSummary {
                start_time: "10:00".into(),
                end_time: "11:00".into(),
            },
        )
    }

    fn loaded(bookings: Vec<Booking>) -> BookingsScreen {
        let mut screen = BookingsScreen::new();
        screen.set_bookings(BookingList::new(bookings));
        screen
    }

    fn rendered(screen: &BookingsScreen) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn test_login_required_message() {
        assert!(rendered(&BookingsScreen::new()).contains(LOGIN_TO_VIEW_MESSAGE));
    }

    #[test]
    fn test_empty_list_offers_browse() {
        let mut screen = loaded(Vec::new());

        assert!(rendered(&screen).contains(NO_BOOKINGS_MESSAGE));
        assert_eq!(
            screen.handle_key(key(KeyCode::Enter)),
            BookingsAction::BrowseWorkshops
        );
    }

    #[test]
    fn test_renders_status_and_schedule() {
        let screen = loaded(vec![booking("b1", BookingStatus::Confirmed)]);
        let text = rendered(&screen);

        assert!(text.contains("Workshop b1"));
        assert!(text.contains("Monday, November 2, 2026 at 10:00 - 11:00"));
        assert!(text.contains("CONFIRMED"));
        assert!(text.contains("Cancel Booking"));
    }

    #[test]
    fn test_confirm_flow_emits_cancel() {
        let mut screen = loaded(vec![booking("b1", BookingStatus::Confirmed)]);

        assert_eq!(screen.handle_key(key(KeyCode::Char('c'))), BookingsAction::None);
        assert!(screen.is_modal());
        assert!(rendered(&screen).contains(CANCEL_PROMPT));

        assert_eq!(
            screen.handle_key(key(KeyCode::Char('y'))),
            BookingsAction::Cancel(BookingId::from("b1"))
        );
    }

    #[test]
    fn test_dismiss_dialog() {
        let mut screen = loaded(vec![booking("b1", BookingStatus::Pending)]);
        screen.handle_key(key(KeyCode::Char('c')));

        screen.handle_key(key(KeyCode::Esc));

        assert!(!screen.is_modal());
    }

    #[test]
    fn test_canceled_booking_offers_no_cancel() {
        let mut screen = loaded(vec![booking("b1", BookingStatus::Canceled)]);

        screen.handle_key(key(KeyCode::Char('c')));

        assert!(!screen.is_modal());
    }

    #[test]
    fn test_finish_cancel_success_updates_only_target() {
        let mut screen = loaded(vec![
            booking("b1", BookingStatus::Confirmed),
            booking("b2", BookingStatus::Pending),
        ]);
        screen.handle_key(key(KeyCode::Char('c')));
        screen.set_canceling();

        screen.finish_cancel(&BookingId::from("b1"), &Ok(()));

        let list = screen.bookings().unwrap();
        assert_eq!(list.get(0).unwrap().status(), BookingStatus::Canceled);
        assert_eq!(list.get(1).unwrap().status(), BookingStatus::Pending);
        assert!(!screen.is_modal());
    }

    #[test]
    fn test_finish_cancel_failure_keeps_listing() {
        let mut screen = loaded(vec![booking("b1", BookingStatus::Confirmed)]);
        screen.handle_key(key(KeyCode::Char('c')));
        screen.set_canceling();

        screen.finish_cancel(&BookingId::from("b1"), &Err(ApiError::network("down")));

        assert_eq!(
            screen.bookings().unwrap().get(0).unwrap().status(),
            BookingStatus::Confirmed
        );
        assert!(!screen.is_modal());
    }

    #[test]
    fn test_in_flight_dialog_ignores_keys() {
        let mut screen = loaded(vec![booking("b1", BookingStatus::Confirmed)]);
        screen.handle_key(key(KeyCode::Char('c')));
        screen.set_canceling();

        assert_eq!(screen.handle_key(key(KeyCode::Char('y'))), BookingsAction::None);
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), BookingsAction::None);
        assert!(screen.is_modal());
    }
}
