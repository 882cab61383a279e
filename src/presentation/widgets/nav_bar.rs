use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::application::{Route, SessionState};

pub struct NavBarStyle {
    pub background: Style,
    pub app_name: Style,
    pub label_style: Style,
    pub active_label_style: Style,
    pub key_style: Style,
    pub pending_style: Style,
}

impl Default for NavBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            app_name: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            label_style: Style::default().fg(Color::White),
            active_label_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            key_style: Style::default().fg(Color::White).bg(Color::DarkGray),
            pending_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        }
    }
}

/// Top navigation bar. Entries depend on the session state; account entries
/// are withheld until the stored session has been read.
pub struct NavBar<'a> {
    route: &'a Route,
    session: &'a SessionState,
    style: NavBarStyle,
}

struct NavItem {
    label: &'static str,
    key: &'static str,
    route: Option<Route>,
}

impl<'a> NavBar<'a> {
    #[must_use]
    pub fn new(route: &'a Route, session: &'a SessionState) -> Self {
        Self {
            route,
            session,
            style: NavBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn style(mut self, style: NavBarStyle) -> Self {
        self.style = style;
        self
    }

    fn items(&self) -> Vec<NavItem> {
        let browse = NavItem {
            label: "Browse Workshops",
            key: "C-w",
            route: Some(Route::Workshops),
        };

        match self.session {
            SessionState::Initializing => vec![browse],
            SessionState::Authenticated(_) => vec![
                browse,
                NavItem {
                    label: "My Bookings",
                    key: "C-b",
                    route: Some(Route::MyBookings),
                },
                NavItem {
                    label: "Logout",
                    key: "C-o",
                    route: None,
                },
            ],
            SessionState::Anonymous => vec![
                browse,
                NavItem {
                    label: "Login",
                    key: "C-l",
                    route: Some(Route::Login),
                },
                NavItem {
                    label: "Register",
                    key: "C-r",
                    route: Some(Route::Register),
                },
            ],
        }
    }

    fn build_spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![
            Span::styled(" Workshops ", self.style.app_name),
            Span::raw("  "),
        ];

        for item in self.items() {
            let active = item.route.as_ref() == Some(self.route);
            let label_style = if active {
                self.style.active_label_style
            } else {
                self.style.label_style
            };

            spans.push(Span::styled(item.label, label_style));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!(" {} ", item.key), self.style.key_style));
            spans.push(Span::raw("  "));
        }

        if self.session.is_initializing() {
            spans.push(Span::styled("Checking session...", self.style.pending_style));
        }

        spans
    }
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        Paragraph::new(Line::from(self.build_spans())).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::entities::AuthToken;

    fn rendered(route: &Route, session: &SessionState) -> String {
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        NavBar::new(route, session).render(area, &mut buf);

        (0..area.width).map(|x| buf[(x, 0)].symbol()).collect()
    }

    #[test]
    fn test_anonymous_entries() {
        let line = rendered(&Route::Workshops, &SessionState::Anonymous);

        assert!(line.contains("Browse Workshops"));
        assert!(line.contains("Login"));
        assert!(line.contains("Register"));
        assert!(!line.contains("My Bookings"));
    }

    #[test]
    fn test_authenticated_entries() {
        let session = SessionState::Authenticated(AuthToken::new("tok").unwrap());
        let line = rendered(&Route::MyBookings, &session);

        assert!(line.contains("My Bookings"));
        assert!(line.contains("Logout"));
        assert!(!line.contains("Register"));
    }

    #[test]
    fn test_account_entries_hidden_while_session_is_restored() {
        let line = rendered(&Route::Workshops, &SessionState::Initializing);

        assert!(line.contains("Browse Workshops"));
        assert!(line.contains("Checking session..."));
        assert!(!line.contains("Login"));
        assert!(!line.contains("My Bookings"));
    }
}
