//! Login screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::application::dto::LoginRequest;
use crate::presentation::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Input,
    Submitting,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Submit(LoginRequest),
}

/// Login screen UI.
pub struct LoginScreen {
    email_input: TextInput,
    password_input: TextInput,
    focus: LoginField,
    state: LoginState,
    error_message: Option<String>,
}

impl LoginScreen {
    /// Creates new login screen.
    #[must_use]
    pub fn new() -> Self {
        let mut email_input = TextInput::new(" Email ").placeholder("you@example.com");
        email_input.set_focused(true);
        let password_input = TextInput::new(" Password ").password();

        Self {
            email_input,
            password_input,
            focus: LoginField::Email,
            state: LoginState::Input,
            error_message: None,
        }
    }

    /// Returns current state.
    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Disables the form while the request is in flight.
    pub fn set_submitting(&mut self) {
        self.state = LoginState::Submitting;
        self.error_message = None;
        self.set_inputs_disabled(true);
    }

    /// Sets error state and re-enables the form.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = LoginState::Error;
        self.error_message = Some(message.into());
        self.set_inputs_disabled(false);
    }

    fn set_inputs_disabled(&mut self, disabled: bool) {
        self.email_input.set_disabled(disabled);
        self.password_input.set_disabled(disabled);
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            LoginField::Email => &mut self.email_input,
            LoginField::Password => &mut self.password_input,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
        self.email_input.set_focused(self.focus == LoginField::Email);
        self.password_input
            .set_focused(self.focus == LoginField::Password);
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        if self.state == LoginState::Submitting {
            return LoginAction::None;
        }

        match key.code {
            KeyCode::Enter if self.focus == LoginField::Email => self.toggle_focus(),
            KeyCode::Enter => {
                return LoginAction::Submit(LoginRequest::new(
                    self.email_input.value(),
                    self.password_input.value(),
                ));
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.toggle_focus(),
            KeyCode::Char(c) => self.focused_input().input_char(c),
            KeyCode::Backspace => self.focused_input().backspace(),
            KeyCode::Delete => self.focused_input().delete(),
            KeyCode::Left => self.focused_input().move_left(),
            KeyCode::Right => self.focused_input().move_right(),
            KeyCode::Home => self.focused_input().move_start(),
            KeyCode::End => self.focused_input().move_end(),
            _ => {}
        }

        LoginAction::None
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(12),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(area);

        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(50),
            Constraint::Fill(1),
        ]);
        let [_, content_area, _] = horizontal.areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Login ");

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let inner_layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ]);
        let areas = inner_layout.areas::<5>(inner);

        (&self.email_input).render(areas[0], buf);
        (&self.password_input).render(areas[1], buf);

        let status = match self.state {
            LoginState::Input => Line::from(vec![
                Span::styled("Tab: Next field", Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled("Enter: Login", Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled("C-r: Register", Style::default().fg(Color::DarkGray)),
            ]),
            LoginState::Submitting => Line::from(Span::styled(
                "Logging in...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            LoginState::Error => {
                let msg = self.error_message.as_deref().unwrap_or_default();
                Line::from(Span::styled(msg, Style::default().fg(Color::Red)))
            }
        };
        Paragraph::new(status).render(areas[3], buf);
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}
