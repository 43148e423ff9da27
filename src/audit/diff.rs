//! Diffs between persisted form data snapshots

use serde::{Deserialize, Serialize};

use crate::models::FormData;

/// A single field whose value changed on submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    /// Previous value, `None` if the key was new
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    pub after: String,
}

/// Added and modified keys between two snapshots
///
/// Form data only grows through merges, so removals are not reported.
pub fn diff_form_data(before: &FormData, after: &FormData) -> Vec<FieldChange> {
    after
        .iter()
        .filter_map(|(field, value)| match before.get(field) {
            Some(previous) if previous == value => None,
            previous => Some(FieldChange {
                field: field.to_string(),
                before: previous.map(str::to_string),
                after: value.to_string(),
            }),
        })
        .collect()
}

/// Quote a value for display, truncating long strings
pub fn format_value(value: &str) -> String {
    if value.chars().count() > 50 {
        let head: String = value.chars().take(47).collect();
        format!("\"{}...\"", head)
    } else {
        format!("\"{}\"", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> FormData {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_added_and_modified() {
        let before = data(&[("a", "1"), ("b", "2")]);
        let after = data(&[("a", "1"), ("b", "3"), ("c", "4")]);

        let changes = diff_form_data(&before, &after);
        assert_eq!(
            changes,
            vec![
                FieldChange { field: "b".into(), before: Some("2".into()), after: "3".into() },
                FieldChange { field: "c".into(), before: None, after: "4".into() },
            ]
        );
    }

    #[test]
    fn test_no_changes() {
        let snapshot = data(&[("a", "1")]);
        assert!(diff_form_data(&snapshot, &snapshot).is_empty());
    }

    #[test]
    fn test_format_value_truncates() {
        assert_eq!(format_value("short"), "\"short\"");
        let long = "x".repeat(60);
        let formatted = format_value(&long);
        assert!(formatted.ends_with("...\""));
        assert_eq!(formatted.len(), 47 + 5);
    }
}
