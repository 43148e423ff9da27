//! Path management for scriber-register
//!
//! ## Path Resolution Order
//!
//! 1. `SCRIBER_REGISTER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (`~/.config/scriber-register` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::RegisterError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "SCRIBER_REGISTER_DATA_DIR";

/// Manages all paths used by the wizard
#[derive(Debug, Clone)]
pub struct RegisterPaths {
    /// Base directory for all wizard data
    base_dir: PathBuf,
}

impl RegisterPaths {
    /// Create a new RegisterPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, RegisterError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create RegisterPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the log directory (`<base>/logs/`)
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the local key/value store
    pub fn local_store_file(&self) -> PathBuf {
        self.data_dir().join("local_storage.json")
    }

    /// Get the path to the submission log
    pub fn submission_log(&self) -> PathBuf {
        self.base_dir.join("submissions.log")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), RegisterError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| RegisterError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| RegisterError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, RegisterError> {
    ProjectDirs::from("us", "Scriber", "scriber-register")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| RegisterError::Config("Could not determine a home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegisterPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.logs_dir(), temp_dir.path().join("logs"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);
        let paths = RegisterPaths::new().unwrap();
        env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegisterPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegisterPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.local_store_file(),
            temp_dir.path().join("data").join("local_storage.json")
        );
        assert_eq!(
            paths.submission_log(),
            temp_dir.path().join("submissions.log")
        );
    }
}
