//! Registration screen.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::application::Route;
use crate::application::dto::RegisterRequest;
use crate::presentation::widgets::TextInput;

/// Shown once the account was created.
pub const REGISTER_SUCCESS_MESSAGE: &str = "Registration successful! Please log in.";

const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterState {
    Input,
    Submitting,
    Error,
    Succeeded { since: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegisterField {
    Name,
    Email,
    Password,
}

impl RegisterField {
    const fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Password,
            Self::Password => Self::Name,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Name => Self::Password,
            Self::Email => Self::Name,
            Self::Password => Self::Email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterAction {
    None,
    Submit(RegisterRequest),
}

pub struct RegisterScreen {
    name_input: TextInput,
    email_input: TextInput,
    password_input: TextInput,
    focus: RegisterField,
    state: RegisterState,
    error_message: Option<String>,
    redirect_delay: Duration,
}

impl RegisterScreen {
    #[must_use]
    pub fn new() -> Self {
        let mut name_input = TextInput::new(" Name ");
        name_input.set_focused(true);

        Self {
            name_input,
            email_input: TextInput::new(" Email ").placeholder("you@example.com"),
            password_input: TextInput::new(" Password ")
                .password()
                .placeholder("At least 6 characters"),
            focus: RegisterField::Name,
            state: RegisterState::Input,
            error_message: None,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }

    /// Sets how long the success message stays before leaving the screen.
    #[must_use]
    pub const fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    #[must_use]
    pub const fn state(&self) -> RegisterState {
        self.state
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn set_submitting(&mut self) {
        self.state = RegisterState::Submitting;
        self.error_message = None;
        self.set_inputs_disabled(true);
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = RegisterState::Error;
        self.error_message = Some(message.into());
        self.set_inputs_disabled(false);
    }

    /// Shows the success message and starts the redirect timer.
    pub fn set_success(&mut self) {
        self.set_success_at(Instant::now());
    }

    fn set_success_at(&mut self, now: Instant) {
        self.state = RegisterState::Succeeded { since: now };
        self.error_message = None;
    }

    /// Returns the login route once the success message has been shown long enough.
    pub fn tick(&mut self) -> Option<Route> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<Route> {
        match self.state {
            RegisterState::Succeeded { since }
                if now.saturating_duration_since(since) >= self.redirect_delay =>
            {
                Some(Route::Login)
            }
            _ => None,
        }
    }

    fn set_inputs_disabled(&mut self, disabled: bool) {
        self.name_input.set_disabled(disabled);
        self.email_input.set_disabled(disabled);
        self.password_input.set_disabled(disabled);
    }

    fn focus_on(&mut self, field: RegisterField) {
        self.focus = field;
        self.name_input.set_focused(field == RegisterField::Name);
        self.email_input.set_focused(field == RegisterField::Email);
        self.password_input
            .set_focused(field == RegisterField::Password);
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            RegisterField::Name => &mut self.name_input,
            RegisterField::Email => &mut self.email_input,
            RegisterField::Password => &mut self.password_input,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> RegisterAction {
        if matches!(
            self.state,
            RegisterState::Submitting | RegisterState::Succeeded { .. }
        ) {
            return RegisterAction::None;
        }

        match key.code {
            KeyCode::Enter if self.focus == RegisterField::Password => {
                return RegisterAction::Submit(RegisterRequest::new(
                    self.name_input.value(),
                    self.email_input.value(),
                    self.password_input.value(),
                ));
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => self.focus_on(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.focus_on(self.focus.previous()),
            KeyCode::Char(c) => self.focused_input().input_char(c),
            KeyCode::Backspace => self.focused_input().backspace(),
            KeyCode::Delete => self.focused_input().delete(),
            KeyCode::Left => self.focused_input().move_left(),
            KeyCode::Right => self.focused_input().move_right(),
            KeyCode::Home => self.focused_input().move_start(),
            KeyCode::End => self.focused_input().move_end(),
            _ => {}
        }

        RegisterAction::None
    }
}

impl Default for RegisterScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &RegisterScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(15),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, content_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(50),
            Constraint::Fill(1),
        ])
        .areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Create Account ");
        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let [name_area, email_area, password_area, _, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        (&self.name_input).render(name_area, buf);
        (&self.email_input).render(email_area, buf);
        (&self.password_input).render(password_area, buf);

        let status = match self.state {
            RegisterState::Input => Line::from(vec![
                Span::styled("Tab: Next field", Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled("Enter: Register", Style::default().fg(Color::DarkGray)),
            ]),
            RegisterState::Submitting => Line::from(Span::styled(
                "Registering...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            RegisterState::Error => Line::from(Span::styled(
                self.error_message.as_deref().unwrap_or_default(),
                Style::default().fg(Color::Red),
            )),
            RegisterState::Succeeded { .. } => Line::from(Span::styled(
                REGISTER_SUCCESS_MESSAGE,
                Style::default().fg(Color::Green),
            )),
        };
        Paragraph::new(status).render(status_area, buf);
    }
}
