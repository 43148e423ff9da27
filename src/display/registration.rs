//! Registration display formatting
//!
//! Formats form data and the step catalog for terminal output.

use tabled::{settings::Style, Table, Tabled};

use crate::models::{FieldKind, FormData, StepDefinition};
use crate::wizard::{continue_state, derive_steps, unanswered_fields};

#[derive(Tabled)]
struct DataRow {
    #[tabled(rename = "Step")]
    step: String,
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Table of every stored key, grouped by the step that defines it
pub fn format_form_data(data: &FormData) -> String {
    if data.is_empty() {
        return "No registration data saved yet.\n".to_string();
    }

    let steps = derive_steps(Some(data));
    let mut rows: Vec<DataRow> = steps
        .iter()
        .flat_map(|step| {
            step.fields.iter().filter_map(move |field| {
                data.get(&field.name).map(|value| DataRow {
                    step: step.id.clone(),
                    field: field.name.clone(),
                    value: display_value(field, value),
                })
            })
        })
        .collect();

    // Keys no step defines are still part of the stored object
    rows.extend(
        data.iter()
            .filter(|(key, _)| !steps.iter().any(|s| s.field(key).is_some()))
            .map(|(key, value)| DataRow {
                step: "-".to_string(),
                field: key.to_string(),
                value: value.to_string(),
            }),
    );

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

fn display_value(field: &crate::models::FieldDefinition, value: &str) -> String {
    match &field.kind {
        FieldKind::Dropdown { .. } => match field.option_label(value) {
            Some(label) if label != value => format!("{} ({})", label, value),
            _ => value.to_string(),
        },
        FieldKind::Text { .. } | FieldKind::Checkbox { .. } => value.to_string(),
    }
}

/// Step catalog with field visibility and the Continue state of each step
pub fn format_step_list(steps: &[StepDefinition], data: &FormData, strict: bool) -> String {
    let mut output = String::new();

    for step in steps {
        let state = continue_state(&step.fields, Some(data), strict);
        output.push_str(&format!(
            "{} ({}) - continue {}\n",
            step.title,
            step.id,
            if state.is_enabled() { "enabled" } else { "disabled" }
        ));
        output.push_str(&format!("  {}\n", step.description));

        let missing = unanswered_fields(&step.fields, Some(data), strict);
        for field in &step.fields {
            let mut flags = vec![field.kind.type_name()];
            if field.required {
                flags.push("required");
            }
            if field.hidden {
                flags.push("hidden");
            }
            let marker = if missing.iter().any(|m| m.name == field.name) {
                "!"
            } else {
                " "
            };
            output.push_str(&format!(
                "  {} {:<32} [{}] {}\n",
                marker,
                field.name,
                flags.join(", "),
                field.label
            ));
        }
        output.push('\n');
    }

    output
}

/// Closing summary printed after the last step
pub fn format_summary(data: &FormData) -> String {
    let mut output = String::from("Registration complete. Saved answers:\n\n");
    output.push_str(&format_form_data(data));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> FormData {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_empty_form_data() {
        assert_eq!(format_form_data(&FormData::new()), "No registration data saved yet.\n");
    }

    #[test]
    fn test_form_data_table() {
        let output = format_form_data(&data(&[
            ("contact.first_name", "Ada"),
            ("company.selling_subscriptions", "true"),
            ("custom.note", "hi"),
        ]));

        assert!(output.contains("Step"));
        assert!(output.contains("contact.first_name"));
        assert!(output.contains("Yes (true)"));
        assert!(output.contains("custom.note"));
    }

    #[test]
    fn test_step_list_marks_missing_fields() {
        let form = data(&[("contact.first_name", "Ada")]);
        let steps = derive_steps(Some(&form));
        let output = format_step_list(&steps, &form, false);

        assert!(output.contains("Step 1 (step-1) - continue disabled"));
        assert!(output.contains("! contact.last_name"));
        assert!(output.contains("  contact.first_name"));
        assert!(output.contains("[text, hidden]"));
        assert!(output.contains("Great to meet you, Ada."));
    }
}
