//! CLI command for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::Settings;
use crate::error::{RegisterError, RegisterResult};
use crate::export::{write_export, ExportFormat, RegistrationExport};
use crate::storage::LocalStore;
use crate::wizard::RegistrationStore;

/// Export the persisted registration data to a file or stdout
pub fn handle_export<S: LocalStore>(
    registration: &RegistrationStore<S>,
    settings: &Settings,
    format: ExportFormat,
    output: Option<&Path>,
) -> RegisterResult<()> {
    let export = RegistrationExport::new(
        registration.storage_key(),
        registration.persisted(),
        settings.strict_patterns,
    );

    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                RegisterError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(&export, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| RegisterError::Export(e.to_string()))?;

            tracing::info!(path = %path.display(), ?format, "exported registration data");
            eprintln!(
                "Exported {} fields to {}",
                export.data.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_export(&export, format, &mut handle)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use tempfile::TempDir;

    #[test]
    fn test_export_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("registration.yaml");
        let key = "registrationFormData";
        let registration = RegistrationStore::new(
            MemoryStore::with_item(key, r#"{"contact.first_name":"Ada"}"#),
            key,
        );

        handle_export(&registration, &Settings::default(), ExportFormat::Yaml, Some(&path)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("contact.first_name: Ada"));
        assert!(contents.contains("storage_key: registrationFormData"));
    }
}
