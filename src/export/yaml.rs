//! YAML export
//!
//! Human-readable variant of the JSON export.

use std::io::Write;

use crate::error::{RegisterError, RegisterResult};

use super::json::RegistrationExport;

/// Write the export as YAML with a short header
pub fn export_yaml<W: Write>(export: &RegistrationExport, writer: &mut W) -> RegisterResult<()> {
    let header = format!(
        "# Scriber registration export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| RegisterError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| RegisterError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FormData;

    #[test]
    fn test_yaml_export() {
        let data: FormData = [("contact.email", "ada@example.com")].into_iter().collect();
        let export = RegistrationExport::new("registrationFormData", data, false);

        let mut output = Vec::new();
        export_yaml(&export, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("# Scriber registration export"));
        assert!(text.contains("contact.email: ada@example.com"));

        let parsed: RegistrationExport = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed.data.get("contact.email"), Some("ada@example.com"));
    }
}
