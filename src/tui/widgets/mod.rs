//! Field widgets for the wizard
//!
//! One widget per field, chosen by the field's kind.

pub mod checkbox;
pub mod dropdown;
pub mod input;
pub mod notification;

pub use checkbox::CheckboxInput;
pub use dropdown::DropdownInput;
pub use input::TextInput;
pub use notification::{Notification, NotificationType};

use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::models::{FieldDefinition, FieldKind, FormData};

/// What a widget did with a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not handled; the app may use it for navigation
    Ignored,
    /// Handled without changing the value
    Consumed,
    /// Value changed to the contained string
    Changed(String),
}

/// A field's widget
#[derive(Debug, Clone)]
pub enum FieldWidget {
    Text(TextInput),
    Checkbox(CheckboxInput),
    Dropdown(DropdownInput),
}

impl FieldWidget {
    /// Build the widget for a field, seeded from form data
    pub fn from_field(field: &FieldDefinition, data: Option<&FormData>) -> Self {
        let field = field.clone();
        match field.kind {
            FieldKind::Text { .. } => Self::Text(TextInput::new(field, data)),
            FieldKind::Checkbox { .. } => Self::Checkbox(CheckboxInput::new(field, data)),
            FieldKind::Dropdown { .. } => Self::Dropdown(DropdownInput::new(field, data)),
        }
    }

    pub fn field(&self) -> &FieldDefinition {
        match self {
            Self::Text(w) => &w.field,
            Self::Checkbox(w) => &w.field,
            Self::Dropdown(w) => &w.field,
        }
    }

    /// Adopt a re-derived definition (label, visibility) keeping widget state
    pub fn sync_field(&mut self, field: &FieldDefinition) {
        let slot = match self {
            Self::Text(w) => &mut w.field,
            Self::Checkbox(w) => &mut w.field,
            Self::Dropdown(w) => &mut w.field,
        };
        *slot = field.clone();
    }

    pub fn name(&self) -> &str {
        &self.field().name
    }

    pub fn is_hidden(&self) -> bool {
        self.field().hidden
    }

    /// Value contributed on submit; `None` leaves the key out
    pub fn submit_value(&self) -> Option<String> {
        match self {
            Self::Text(w) => Some(w.value().to_string()),
            Self::Checkbox(w) => Some(w.value().to_string()),
            Self::Dropdown(w) => w.value().map(str::to_string),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match self {
            Self::Text(w) => w.handle_key(key),
            Self::Checkbox(w) => w.handle_key(key),
            Self::Dropdown(w) => w.handle_key(key),
        }
    }

    pub fn focus(&mut self) {
        match self {
            Self::Text(w) => w.focused = true,
            Self::Checkbox(w) => w.focused = true,
            Self::Dropdown(w) => w.focused = true,
        }
    }

    pub fn blur(&mut self) {
        match self {
            Self::Text(w) => w.blur(),
            Self::Checkbox(w) => w.focused = false,
            Self::Dropdown(w) => w.blur(),
        }
    }

    /// True while a dropdown list is open and owns the arrow keys
    pub fn is_capturing(&self) -> bool {
        matches!(self, Self::Dropdown(w) if w.open)
    }

    pub fn height(&self) -> u16 {
        match self {
            Self::Text(w) => w.height(),
            Self::Checkbox(w) => w.height(),
            Self::Dropdown(w) => w.height(),
        }
    }
}

impl Widget for &FieldWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self {
            FieldWidget::Text(w) => w.render(area, buf),
            FieldWidget::Checkbox(w) => w.render(area, buf),
            FieldWidget::Dropdown(w) => w.render(area, buf),
        }
    }
}
