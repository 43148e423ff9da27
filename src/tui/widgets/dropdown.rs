//! Dropdown widget
//!
//! Closed it shows the selected option (or the placeholder); open it lists
//! every option with a highlight cursor.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::models::{FieldDefinition, FieldKind, FormData, SelectOption};

use super::KeyOutcome;

#[derive(Debug, Clone)]
pub struct DropdownInput {
    pub field: FieldDefinition,
    /// Selected option value, empty when nothing is selected
    pub selected: String,
    pub open: bool,
    pub highlight: usize,
    pub focused: bool,
}

impl DropdownInput {
    pub fn new(field: FieldDefinition, data: Option<&FormData>) -> Self {
        let selected = field.initial_value(data);
        Self {
            field,
            selected,
            open: false,
            highlight: 0,
            focused: false,
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        match &self.field.kind {
            FieldKind::Dropdown { options, .. } => options,
            FieldKind::Text { .. } | FieldKind::Checkbox { .. } => &[],
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if !self.open {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open();
                    KeyOutcome::Consumed
                }
                _ => KeyOutcome::Ignored,
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.highlight = self.highlight.saturating_sub(1);
                KeyOutcome::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.highlight + 1 < self.options().len() {
                    self.highlight += 1;
                }
                KeyOutcome::Consumed
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.open = false;
                match self.options().get(self.highlight).map(|o| o.value.clone()) {
                    Some(value) => {
                        self.selected = value.clone();
                        KeyOutcome::Changed(value)
                    }
                    None => KeyOutcome::Consumed,
                }
            }
            KeyCode::Esc => {
                self.open = false;
                KeyOutcome::Consumed
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Open the list with the current selection highlighted
    pub fn open(&mut self) {
        self.highlight = self
            .options()
            .iter()
            .position(|o| o.value == self.selected)
            .unwrap_or(0);
        self.open = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
        self.open = false;
    }

    /// Selected value, if any
    pub fn value(&self) -> Option<&str> {
        Some(self.selected.as_str()).filter(|v| !v.is_empty())
    }

    /// Text shown in the closed box
    pub fn display_label(&self) -> &str {
        if let Some(label) = self.field.option_label(&self.selected) {
            return label;
        }
        match &self.field.kind {
            FieldKind::Dropdown { placeholder, .. } => &placeholder.label,
            FieldKind::Text { .. } | FieldKind::Checkbox { .. } => "",
        }
    }

    pub fn height(&self) -> u16 {
        if self.open {
            2 + self.options().len() as u16
        } else {
            2
        }
    }
}

impl Widget for &DropdownInput {
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
        let value_style = match (self.value(), self.focused) {
            (_, true) => Style::default().fg(Color::Black).bg(Color::Cyan),
            (Some(_), false) => Style::default().fg(Color::Yellow),
            (None, false) => Style::default().fg(Color::DarkGray),
        };
        let arrow = if self.open { "▲" } else { "▼" };
        let closed = Line::from(vec![
            Span::styled(format!("[{}] ", self.display_label()), value_style),
            Span::styled(arrow, Style::default().fg(Color::DarkGray)),
        ]);
        buf.set_line(area.x, area.y + 1, &closed, area.width);

        if !self.open {
            return;
        }
        for (i, option) in self.options().iter().enumerate() {
            let y = area.y + 2 + i as u16;
            if y >= area.y + area.height {
                break;
            }
            let (marker, style) = if i == self.highlight {
                ("> ", Style::default().fg(Color::Black).bg(Color::Yellow))
            } else if option.value == self.selected {
                ("* ", Style::default().fg(Color::Green))
            } else {
                ("  ", Style::default().fg(Color::White))
            };
            buf.set_stringn(
                area.x,
                y,
                format!("{}{}", marker, option.label),
                area.width as usize,
                style,
            );
        }
    }
}
