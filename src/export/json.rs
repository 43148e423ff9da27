//! JSON export
//!
//! Exports the accumulated registration data with schema versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{RegisterError, RegisterResult};
use crate::models::FormData;
use crate::wizard::{continue_state, derive_steps};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Snapshot of a registration, as exported
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Local store key the data was read from
    pub storage_key: String,

    /// Ids of steps whose Continue gate is currently satisfied
    pub completed_steps: Vec<String>,

    /// Accumulated form data
    pub data: FormData,
}

impl RegistrationExport {
    pub fn new(storage_key: impl Into<String>, data: FormData, strict_patterns: bool) -> Self {
        let completed_steps = derive_steps(Some(&data))
            .into_iter()
            .filter(|step| continue_state(&step.fields, Some(&data), strict_patterns).is_enabled())
            .map(|step| step.id)
            .collect();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            storage_key: storage_key.into(),
            completed_steps,
            data,
        }
    }
}

/// Write the export as pretty JSON
pub fn export_json<W: Write>(export: &RegistrationExport, writer: &mut W) -> RegisterResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| RegisterError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| RegisterError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_steps() {
        let data: FormData = [
            ("company.employee_count", "1-10"),
            ("company.annual_revenue", "$0-100,000"),
            ("company.selling_subscriptions", "true"),
            ("company.industry", "retail"),
        ]
        .into_iter()
        .collect();

        let export = RegistrationExport::new("registrationFormData", data, false);
        assert_eq!(export.completed_steps, vec!["step-2".to_string()]);
    }

    #[test]
    fn test_json_export() {
        let data: FormData = [("contact.first_name", "Ada")].into_iter().collect();
        let export = RegistrationExport::new("registrationFormData", data, false);

        let mut output = Vec::new();
        export_json(&export, &mut output).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed["data"]["contact.first_name"], "Ada");
    }
}
