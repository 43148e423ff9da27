//! Continue gating
//!
//! Validation is synchronous and recomputed after every data or field-list
//! change. A step is answered when every required non-checkbox field holds
//! a non-empty trimmed value and every checkbox has any stored value.

use crate::models::{FieldDefinition, FieldKind, FormData};

/// Whether the "Continue" action is available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueState {
    /// Continue disabled
    Invalid,
    /// Continue enabled
    Valid,
}

impl ContinueState {
    pub fn is_enabled(self) -> bool {
        self == Self::Valid
    }
}

/// Compute the Continue state for a step's fields
pub fn continue_state(
    fields: &[FieldDefinition],
    data: Option<&FormData>,
    strict_patterns: bool,
) -> ContinueState {
    if data.is_none() || !unanswered_fields(fields, data, strict_patterns).is_empty() {
        ContinueState::Invalid
    } else {
        ContinueState::Valid
    }
}

/// Fields that keep Continue disabled
pub fn unanswered_fields<'a>(
    fields: &'a [FieldDefinition],
    data: Option<&FormData>,
    strict_patterns: bool,
) -> Vec<&'a FieldDefinition> {
    fields
        .iter()
        .filter(|field| !is_answered(field, data, strict_patterns))
        .collect()
}

fn is_answered(field: &FieldDefinition, data: Option<&FormData>, strict_patterns: bool) -> bool {
    let value = data.and_then(|d| d.get(&field.name));

    match &field.kind {
        // Checked and unchecked both count as answered
        FieldKind::Checkbox { .. } => value.is_some(),
        FieldKind::Text { .. } | FieldKind::Dropdown { .. } => {
            let filled = value.is_some_and(|v| !v.trim().is_empty());
            if field.required && !filled {
                return false;
            }
            if strict_patterns && filled {
                return value.and_then(|v| pattern_error(field, v)).is_none();
            }
            true
        }
    }
}

/// Inline format error for a text value, if it fails the field's pattern
///
/// Empty values are never reported; required-ness is the gate's concern.
pub fn pattern_error(field: &FieldDefinition, value: &str) -> Option<String> {
    let FieldKind::Text {
        pattern: Some(pattern),
        ..
    } = &field.kind
    else {
        return None;
    };

    if value.is_empty() || pattern.is_match(value) {
        None
    } else {
        Some(pattern.message().to_string())
    }
}
