//! Checkbox widget

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::models::{checkbox_value, FieldDefinition, FormData, CHECKBOX_ON};

use super::KeyOutcome;

/// Boolean field toggled with Space, stored as "on"/"off"
#[derive(Debug, Clone)]
pub struct CheckboxInput {
    pub field: FieldDefinition,
    pub checked: bool,
    pub focused: bool,
}

impl CheckboxInput {
    pub fn new(field: FieldDefinition, data: Option<&FormData>) -> Self {
        let checked = field.initial_value(data) == CHECKBOX_ON;
        Self {
            field,
            checked,
            focused: false,
        }
    }

    /// Space toggles and emits the stored value
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Char(' ') => {
                self.checked = !self.checked;
                KeyOutcome::Changed(self.value().to_string())
            }
            _ => KeyOutcome::Ignored,
        }
    }

    pub fn value(&self) -> &'static str {
        checkbox_value(self.checked)
    }

    pub fn height(&self) -> u16 {
        2
    }
}

impl Widget for &CheckboxInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let mark = if self.checked { "[x] " } else { "[ ] " };
        let mark_style = if self.focused {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Green)
        };
        let label_style = if self.focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let line = Line::from(vec![
            Span::styled(mark, mark_style),
            Span::styled(self.field.label.as_str(), label_style),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
