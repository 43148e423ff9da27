//! Text input widget
//!
//! A labelled text field with cursor support and an optional format check
//! that runs when focus leaves the field.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::models::{FieldDefinition, FormData};
use crate::wizard::pattern_error;

use super::KeyOutcome;

/// Editable text field bound to a text [`FieldDefinition`]
#[derive(Debug, Clone)]
pub struct TextInput {
    pub field: FieldDefinition,
    /// Current text content
    pub content: String,
    /// Cursor position, in characters
    pub cursor: usize,
    pub focused: bool,
    /// Inline format error from the last blur
    pub error: Option<String>,
}

impl TextInput {
    pub fn new(field: FieldDefinition, data: Option<&FormData>) -> Self {
        let content = field.initial_value(data);
        let cursor = content.chars().count();
        Self {
            field,
            content,
            cursor,
            focused: false,
            error: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(c);
                KeyOutcome::Changed(self.content.clone())
            }
            KeyCode::Backspace => self.edited(Self::backspace),
            KeyCode::Delete => self.edited(Self::delete),
            KeyCode::Left => {
                self.move_left();
                KeyOutcome::Consumed
            }
            KeyCode::Right => {
                self.move_right();
                KeyOutcome::Consumed
            }
            KeyCode::Home => {
                self.cursor = 0;
                KeyOutcome::Consumed
            }
            KeyCode::End => {
                self.cursor = self.len();
                KeyOutcome::Consumed
            }
            _ => KeyOutcome::Ignored,
        }
    }

    fn edited(&mut self, edit: fn(&mut Self) -> bool) -> KeyOutcome {
        if edit(self) {
            KeyOutcome::Changed(self.content.clone())
        } else {
            KeyOutcome::Consumed
        }
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.content.remove(at);
        true
    }

    /// Delete character at cursor
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.content.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    /// Run the format check; called when focus leaves the field
    pub fn blur(&mut self) {
        self.focused = false;
        self.error = pattern_error(&self.field, &self.content);
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    /// Rows needed: label, input, error
    pub fn height(&self) -> u16 {
        3
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let label_style = if self.focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let mut label = vec![Span::styled(self.field.label.as_str(), label_style)];
        if self.field.required {
            label.push(Span::styled(" *", Style::default().fg(Color::Red)));
        }
        buf.set_line(area.x, area.y, &Line::from(label), area.width);

        if area.height < 2 {
            return;
        }
        let input_y = area.y + 1;
        let text_style = if self.focused {
            Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let prompt = "> ";
        buf.set_string(area.x, input_y, prompt, Style::default().fg(Color::DarkGray));
        let input_x = area.x + prompt.len() as u16;
        let input_width = area.width.saturating_sub(prompt.len() as u16) as usize;
        buf.set_stringn(input_x, input_y, &self.content, input_width, text_style);

        if self.focused {
            let cursor_x = input_x + self.cursor as u16;
            if cursor_x < area.x + area.width {
                let cursor_char = self.content.chars().nth(self.cursor).unwrap_or('_');
                buf.set_string(
                    cursor_x,
                    input_y,
                    cursor_char.to_string(),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                );
            }
        }

        if area.height >= 3 {
            if let Some(error) = &self.error {
                buf.set_stringn(
                    area.x,
                    input_y + 1,
                    error,
                    area.width as usize,
                    Style::default().fg(Color::Red),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldPattern;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn email_input() -> TextInput {
        let field = FieldDefinition::text("contact.email", "Email")
            .pattern(Some(FieldPattern::new(r"^\S+@\S+$", "Invalid email").unwrap()));
        TextInput::new(field, Some(&FormData::new()))
    }

    #[test]
    fn test_initial_content_from_data() {
        let field = FieldDefinition::text("contact.first_name", "First Name");
        let data: FormData = [("contact.first_name", "Ada")].into_iter().collect();
        let input = TextInput::new(field, Some(&data));

        assert_eq!(input.value(), "Ada");
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn test_typing_emits_changes() {
        let mut input = email_input();
        assert_eq!(input.handle_key(key(KeyCode::Char('a'))), KeyOutcome::Changed("a".into()));
        assert_eq!(input.handle_key(key(KeyCode::Char('b'))), KeyOutcome::Changed("ab".into()));
        assert_eq!(input.handle_key(key(KeyCode::Left)), KeyOutcome::Consumed);
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), KeyOutcome::Changed("b".into()));
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), KeyOutcome::Consumed);
        assert_eq!(input.handle_key(key(KeyCode::Tab)), KeyOutcome::Ignored);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = email_input();
        input.insert('é');
        input.insert('x');
        input.move_left();
        input.insert('ü');
        assert_eq!(input.value(), "éüx");
        assert!(input.delete());
        assert_eq!(input.value(), "éü");
    }

    #[test]
    fn test_blur_sets_and_clears_error() {
        let mut input = email_input();
        for c in "ada".chars() {
            input.insert(c);
        }
        input.blur();
        assert_eq!(input.error.as_deref(), Some("Invalid email"));

        for c in "@example.com".chars() {
            input.insert(c);
        }
        input.blur();
        assert!(input.error.is_none());
    }

    #[test]
    fn test_empty_value_has_no_error() {
        let mut input = email_input();
        input.blur();
        assert!(input.error.is_none());
    }
}
