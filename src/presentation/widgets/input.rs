//! Text input widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Single-line text field. The cursor is a char index.
#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    cursor: usize,
    focused: bool,
    disabled: bool,
    masked: bool,
    placeholder: String,
    label: String,
}

impl TextInput {
    /// Creates new input with label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            disabled: false,
            masked: false,
            placeholder: String::new(),
            label: label.into(),
        }
    }

    /// Enables password masking.
    #[must_use]
    pub fn password(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Sets placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Sets focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Returns focus state.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Disables editing while a request is in flight.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_count();
    }

    /// Clears value.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Inserts character at cursor.
    pub fn input_char(&mut self, c: char) {
        if self.disabled {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes character before cursor.
    pub fn backspace(&mut self) {
        if self.disabled || self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    /// Deletes character at cursor.
    pub fn delete(&mut self) {
        if self.disabled || self.cursor >= self.char_count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    /// Moves cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Moves cursor to start.
    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    /// Moves cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Terminal column of the cursor within the unscrolled text.
    fn cursor_column(&self) -> usize {
        if self.masked {
            return self.cursor;
        }
        self.value
            .chars()
            .take(self.cursor)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    fn display_text(&self) -> String {
        if self.value.is_empty() {
            self.placeholder.clone()
        } else if self.masked {
            "•".repeat(self.char_count())
        } else {
            self.value.clone()
        }
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let text_style = if self.value.is_empty() || self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label.as_str());

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 {
            return;
        }

        // Scroll horizontally so the cursor cell stays inside the field.
        let width = usize::from(inner.width);
        let column = self.cursor_column();
        let offset = column.saturating_sub(width - 1);

        Paragraph::new(self.display_text())
            .style(text_style)
            .scroll((0, u16::try_from(offset).unwrap_or(u16::MAX)))
            .render(inner, buf);

        if self.focused && !self.disabled {
            let x = inner.x + u16::try_from(column - offset).unwrap_or(0);
            buf[(x, inner.y)].set_style(Style::default().bg(Color::White).fg(Color::Black));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_basic() {
        let mut input = TextInput::new("Test");
        assert!(input.value().is_empty());

        input.input_char('a');
        input.input_char('b');
        assert_eq!(input.value(), "ab");

        input.backspace();
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_masked_display() {
        let mut input = TextInput::new("Password").password();
        input.set_value("secret");

        assert_eq!(input.display_text(), "••••••");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new("Name");
        input.set_value("Zoë");
        input.move_left();
        input.backspace();
        input.input_char('e');

        assert_eq!(input.value(), "Zeë");
        input.move_end();
        input.delete();
        assert_eq!(input.value(), "Zeë");
    }

    #[test]
    fn test_disabled_input_ignores_edits() {
        let mut input = TextInput::new("Email");
        input.set_value("a@b.c");
        input.set_disabled(true);

        input.input_char('x');
        input.backspace();

        assert_eq!(input.value(), "a@b.c");
    }

    #[test]
    fn test_wide_chars_advance_cursor_by_display_width() {
        let mut input = TextInput::new("Name");
        input.set_value("日本");

        assert_eq!(input.cursor_column(), 4);
        input.move_left();
        assert_eq!(input.cursor_column(), 2);
    }

    #[test]
    fn test_long_value_scrolls_to_cursor() {
        let mut input = TextInput::new("Email");
        input.set_focused(true);
        input.set_value("someone.with.a.long.address@example.com");
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);

        (&input).render(area, &mut buf);

        let row: String = (1..11).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row, "ample.com ");
    }
}
