//! CLI command handlers
//!
//! Bridges clap argument parsing with the wizard layer for the
//! non-interactive commands.

pub mod export;
pub mod history;
pub mod registration;

pub use export::handle_export;
pub use history::handle_history;
pub use registration::{
    handle_reset, handle_route, handle_show, handle_steps, handle_submit,
};

use crate::config::{RegisterPaths, Settings};
use crate::error::{RegisterError, RegisterResult};
use crate::models::FormData;
use crate::storage::{open_local_store, FileStore};
use crate::wizard::{RegistrationStore, StepRoute};

/// Open and load the session state over the on-disk local store
pub fn open_registration(
    paths: &RegisterPaths,
    settings: &Settings,
) -> RegisterResult<RegistrationStore<FileStore>> {
    let store = open_local_store(paths)?;
    let mut registration = RegistrationStore::new(store, settings.storage_key.clone());
    registration.load();
    Ok(registration)
}

/// Accept a step number, a step id (`step-2`) or a register path
pub fn parse_step(arg: &str) -> RegisterResult<StepRoute> {
    let arg = arg.trim();

    if arg.starts_with('/') {
        return StepRoute::parse(arg);
    }

    let number = arg.strip_prefix("step-").unwrap_or(arg);
    match number.parse::<u32>() {
        Ok(n) if n > 0 => Ok(StepRoute::new(n)),
        _ => Err(RegisterError::Route(format!(
            "'{}' is not a step number, step id or register path",
            arg
        ))),
    }
}

/// Parse `key=value` arguments into form data
pub fn parse_assignments(pairs: &[String]) -> RegisterResult<FormData> {
    pairs
        .iter()
        .map(|pair| {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                RegisterError::Validation(format!("Expected key=value, got '{}'", pair))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(RegisterError::Validation(format!(
                    "Missing field name in '{}'",
                    pair
                )));
            }
            Ok((key.to_string(), value.to_string()))
        })
        .collect::<RegisterResult<Vec<_>>>()
        .map(FormData::from_iter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_step_forms() {
        assert_eq!(parse_step("2").unwrap(), StepRoute::new(2));
        assert_eq!(parse_step("step-3").unwrap(), StepRoute::new(3));
        assert_eq!(
            parse_step("/account/register/step-1").unwrap(),
            StepRoute::new(1)
        );
        assert!(parse_step("0").is_err());
        assert!(parse_step("two").is_err());
    }

    #[test]
    fn test_parse_assignments() {
        let data = parse_assignments(&[
            "contact.first_name=Ada".to_string(),
            "contact.note=a=b".to_string(),
            "contact.empty=".to_string(),
        ])
        .unwrap();

        assert_eq!(data.get("contact.first_name"), Some("Ada"));
        assert_eq!(data.get("contact.note"), Some("a=b"));
        assert_eq!(data.get("contact.empty"), Some(""));
    }

    #[test]
    fn test_parse_assignments_rejects_bad_pairs() {
        assert!(parse_assignments(&["no-equals".to_string()])
            .unwrap_err()
            .is_validation());
        assert!(parse_assignments(&["=value".to_string()]).is_err());
    }

    #[test]
    fn test_open_registration_loads() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegisterPaths::with_base_dir(temp_dir.path().to_path_buf());

        let registration = open_registration(&paths, &Settings::default()).unwrap();
        assert!(registration.is_loaded());
        assert_eq!(registration.storage_key(), "registrationFormData");
    }
}
