//! User settings for scriber-register
//!
//! Holds the storage key used for registration data, the pattern
//! validation policy and logging preferences.

use serde::{Deserialize, Serialize};

use super::paths::RegisterPaths;
use crate::error::RegisterError;

/// Storage key the registration form data lives under
pub const DEFAULT_STORAGE_KEY: &str = "registrationFormData";

/// Logging preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether the TUI writes logs to a file (stderr would corrupt the screen)
    #[serde(default = "default_true")]
    pub to_file: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: true,
        }
    }
}

/// User settings for scriber-register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Local store key that holds the accumulated form data
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// When set, a non-empty value that fails its field pattern disables Continue
    #[serde(default)]
    pub strict_patterns: bool,

    /// Logging preferences
    #[serde(default)]
    pub logging: LoggingSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            storage_key: default_storage_key(),
            strict_patterns: false,
            logging: LoggingSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &RegisterPaths) -> Result<Self, RegisterError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| RegisterError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| RegisterError::Config(format!("Failed to parse settings file: {}", e)))?;

        if settings.storage_key.trim().is_empty() {
            return Err(RegisterError::Config("storage_key must not be empty".into()));
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &RegisterPaths) -> Result<(), RegisterError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| RegisterError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| RegisterError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.storage_key, "registrationFormData");
        assert!(!settings.strict_patterns);
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.to_file);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegisterPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.strict_patterns = true;
        settings.storage_key = "wizard".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.strict_patterns);
        assert_eq!(loaded.storage_key, "wizard");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegisterPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"strict_patterns": true}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.strict_patterns);
        assert_eq!(loaded.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(loaded.schema_version, 1);
    }

    #[test]
    fn test_empty_storage_key_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegisterPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"storage_key": "  "}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, RegisterError::Config(_)));
    }
}
