//! CSV export
//!
//! One row per stored field, annotated with the step and label it belongs
//! to. Keys that no step defines are listed last with an empty step.

use std::io::Write;

use crate::error::{RegisterError, RegisterResult};
use crate::models::FieldKind;
use crate::wizard::derive_steps;

use super::json::RegistrationExport;

/// Write the export as CSV (`Step,Field,Label,Value`)
pub fn export_csv<W: Write>(export: &RegistrationExport, writer: &mut W) -> RegisterResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let map_err = |e: csv::Error| RegisterError::Export(e.to_string());

    csv_writer
        .write_record(["Step", "Field", "Label", "Value"])
        .map_err(map_err)?;

    let data = &export.data;
    let steps = derive_steps(Some(data));

    for step in &steps {
        for field in &step.fields {
            let Some(value) = data.get(&field.name) else {
                continue;
            };
            let shown = match &field.kind {
                FieldKind::Dropdown { .. } => field.option_label(value).unwrap_or(value),
                FieldKind::Text { .. } | FieldKind::Checkbox { .. } => value,
            };
            csv_writer
                .write_record([step.id.as_str(), field.name.as_str(), field.label.as_str(), shown])
                .map_err(map_err)?;
        }
    }

    for (key, value) in data.iter() {
        if steps.iter().any(|step| step.field(key).is_some()) {
            continue;
        }
        csv_writer.write_record(["", key, "", value]).map_err(map_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| RegisterError::Export(e.to_string()))?;

    Ok(())
}
