//! Submission log entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::diff::{format_value, FieldChange};

/// One submitted step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionEntry {
    /// When the step was submitted (UTC)
    pub timestamp: DateTime<Utc>,

    /// Wizard session the submission belongs to
    pub session_id: Uuid,

    /// Catalog id of the submitted step
    pub step_id: String,

    /// Fields whose persisted value changed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<FieldChange>,
}

impl SubmissionEntry {
    pub fn new(session_id: Uuid, step_id: impl Into<String>, changes: Vec<FieldChange>) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id,
            step_id: step_id.into(),
            changes,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} session {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.step_id,
            short_session(&self.session_id),
        );

        if self.changes.is_empty() {
            output.push_str("\n  No changes");
        }

        for change in &self.changes {
            let before = change
                .before
                .as_deref()
                .map_or_else(|| "(added)".to_string(), format_value);
            output.push_str(&format!(
                "\n  {}: {} -> {}",
                change.field,
                before,
                format_value(&change.after)
            ));
        }

        output
    }
}

fn short_session(id: &Uuid) -> String {
    id.simple().to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_round_trip() {
        let entry = SubmissionEntry::new(
            Uuid::new_v4(),
            "step-1",
            vec![FieldChange {
                field: "contact.first_name".into(),
                before: None,
                after: "Ada".into(),
            }],
        );

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: SubmissionEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, parsed);
    }

    #[test]
    fn test_human_readable() {
        let entry = SubmissionEntry::new(
            Uuid::nil(),
            "step-3",
            vec![FieldChange {
                field: "contact.referral_source".into(),
                before: Some("blog".into()),
                after: "podcast".into(),
            }],
        );

        let text = entry.format_human_readable();
        assert!(text.contains("step-3 session 00000000"));
        assert!(text.contains("contact.referral_source: \"blog\" -> \"podcast\""));
    }

    #[test]
    fn test_human_readable_without_changes() {
        let entry = SubmissionEntry::new(Uuid::nil(), "step-2", Vec::new());
        assert!(entry.format_human_readable().ends_with("No changes"));
    }
}
