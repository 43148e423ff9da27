//! Field definitions
//!
//! Metadata describing one input control within a step. The kind of
//! control is a closed enum so every widget dispatch is exhaustive.

use regex::Regex;
use serde::{Serialize, Serializer};

use super::form_data::FormData;
use crate::error::RegisterError;

/// Value a checkbox stores when checked
pub const CHECKBOX_ON: &str = "on";
/// Value a checkbox stores when unchecked
pub const CHECKBOX_OFF: &str = "off";

/// Widest a field can be, in twelfths of the form row
pub const MAX_COL_SPAN: u8 = 12;

/// One choice in a dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Format check for a text field, reported inline
#[derive(Debug, Clone)]
pub struct FieldPattern {
    regex: Regex,
    message: String,
}

impl FieldPattern {
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, RegisterError> {
        let regex = Regex::new(pattern)
            .map_err(|e| RegisterError::Config(format!("Invalid field pattern: {}", e)))?;
        Ok(Self {
            regex,
            message: message.into(),
        })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Serialize for FieldPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("FieldPattern", 2)?;
        state.serialize_field("pattern", self.as_str())?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

/// What kind of control a field is, with the data its widget needs
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text {
        default_value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pattern: Option<FieldPattern>,
    },
    Checkbox {
        default_checked: bool,
    },
    Dropdown {
        options: Vec<SelectOption>,
        placeholder: SelectOption,
    },
}

impl FieldKind {
    /// Short type name, as shown in listings
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Checkbox { .. } => "checkbox",
            Self::Dropdown { .. } => "dropdown",
        }
    }
}

/// One input control within a step
#[derive(Debug, Clone, Serialize)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    pub required: bool,
    /// Computed from earlier answers, never stored
    pub hidden: bool,
    pub col_span: u8,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDefinition {
    fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: false,
            hidden: false,
            col_span: MAX_COL_SPAN,
            kind,
        }
    }

    /// A free text field with an empty default
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Text {
                default_value: String::new(),
                pattern: None,
            },
        )
    }

    pub fn checkbox(name: impl Into<String>, label: impl Into<String>, default_checked: bool) -> Self {
        Self::new(name, label, FieldKind::Checkbox { default_checked })
    }

    /// A dropdown with the "Select an option" placeholder
    pub fn dropdown(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Dropdown {
                options,
                placeholder: SelectOption::new("", "Select an option"),
            },
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn col_span(mut self, span: u8) -> Self {
        self.col_span = span.clamp(1, MAX_COL_SPAN);
        self
    }

    /// Attach a format check; ignored for non-text fields
    pub fn pattern(mut self, field_pattern: Option<FieldPattern>) -> Self {
        if let FieldKind::Text { pattern, .. } = &mut self.kind {
            *pattern = field_pattern;
        }
        self
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self.kind, FieldKind::Checkbox { .. })
    }

    /// Starting value for the widget: stored data first, static default otherwise
    pub fn initial_value(&self, data: Option<&FormData>) -> String {
        if let Some(stored) = data.and_then(|d| d.get(&self.name)) {
            return stored.to_string();
        }

        match &self.kind {
            FieldKind::Text { default_value, .. } => default_value.clone(),
            FieldKind::Checkbox { default_checked } => checkbox_value(*default_checked).to_string(),
            FieldKind::Dropdown { .. } => String::new(),
        }
    }

    /// Find the option label for a stored dropdown value
    pub fn option_label(&self, value: &str) -> Option<&str> {
        match &self.kind {
            FieldKind::Dropdown { options, .. } => options
                .iter()
                .find(|o| o.value == value)
                .map(|o| o.label.as_str()),
            FieldKind::Text { .. } | FieldKind::Checkbox { .. } => None,
        }
    }

    /// Stored values a dropdown accepts, in display order
    pub fn option_values(&self) -> Vec<&str> {
        match &self.kind {
            FieldKind::Dropdown { options, .. } => options.iter().map(|o| o.value.as_str()).collect(),
            FieldKind::Text { .. } | FieldKind::Checkbox { .. } => Vec::new(),
        }
    }
}

/// Stored representation of a checkbox state
pub fn checkbox_value(checked: bool) -> &'static str {
    if checked {
        CHECKBOX_ON
    } else {
        CHECKBOX_OFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_value_prefers_stored_data() {
        let field = FieldDefinition::text("contact.first_name", "First Name");
        let data: FormData = [("contact.first_name", "Ada")].into_iter().collect();

        assert_eq!(field.initial_value(Some(&data)), "Ada");
        assert_eq!(field.initial_value(Some(&FormData::new())), "");
        assert_eq!(field.initial_value(None), "");
    }

    #[test]
    fn test_checkbox_initial_value_uses_default() {
        let field = FieldDefinition::checkbox("contact.accepts_marketing", "Marketing", true);
        assert_eq!(field.initial_value(None), CHECKBOX_ON);

        let data: FormData = [("contact.accepts_marketing", "off")].into_iter().collect();
        assert_eq!(field.initial_value(Some(&data)), CHECKBOX_OFF);
    }

    #[test]
    fn test_col_span_is_clamped() {
        let field = FieldDefinition::text("a", "A").col_span(40);
        assert_eq!(field.col_span, 12);
        let field = FieldDefinition::text("a", "A").col_span(0);
        assert_eq!(field.col_span, 1);
    }

    #[test]
    fn test_pattern_only_applies_to_text() {
        let pattern = FieldPattern::new(r"^\d+$", "Digits only").unwrap();
        let field = FieldDefinition::checkbox("c", "C", false).pattern(Some(pattern));
        assert!(matches!(field.kind, FieldKind::Checkbox { .. }));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = FieldPattern::new("(unclosed", "bad").unwrap_err();
        assert!(matches!(err, RegisterError::Config(_)));
    }

    #[test]
    fn test_option_label() {
        let field = FieldDefinition::dropdown(
            "company.industry",
            "Industry",
            vec![SelectOption::new("retail", "Retail")],
        );
        assert_eq!(field.option_label("retail"), Some("Retail"));
        assert_eq!(field.option_label("other"), None);
        assert_eq!(field.option_values(), vec!["retail"]);
        assert!(FieldDefinition::text("a", "A").option_values().is_empty());
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let field = FieldDefinition::text("contact.email", "Email").required();
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["name"], "contact.email");
        assert_eq!(json["required"], true);
    }
}
