//! Registration CLI commands
//!
//! Inspect, submit and reset registration data without the TUI.

use serde::Serialize;
use uuid::Uuid;

use crate::audit::{record_submission, SubmissionLog};
use crate::config::{RegisterPaths, Settings};
use crate::display::{format_form_data, format_step_list, format_summary};
use crate::error::RegisterResult;
use crate::models::StepDefinition;
use crate::storage::LocalStore;
use crate::wizard::{continue_state, derive_steps, step_count, submit_step, RegistrationStore, StepRoute};

use super::{parse_assignments, parse_step};

#[derive(Serialize)]
struct StepReport<'a> {
    #[serde(flatten)]
    step: &'a StepDefinition,
    continue_enabled: bool,
}

/// Print the derived step catalog
pub fn handle_steps<S: LocalStore>(
    registration: &RegistrationStore<S>,
    settings: &Settings,
    json: bool,
) -> RegisterResult<()> {
    let data = registration.form_data().cloned().unwrap_or_default();
    let steps = derive_steps(Some(&data));

    if json {
        let reports: Vec<_> = steps
            .iter()
            .map(|step| StepReport {
                step,
                continue_enabled: continue_state(&step.fields, Some(&data), settings.strict_patterns)
                    .is_enabled(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print!("{}", format_step_list(&steps, &data, settings.strict_patterns));
    }

    Ok(())
}

/// Print the accumulated data as a table
pub fn handle_show<S: LocalStore>(registration: &RegistrationStore<S>) -> RegisterResult<()> {
    let data = registration.form_data().cloned().unwrap_or_default();
    print!("{}", format_form_data(&data));
    Ok(())
}

/// Submit one step from `key=value` pairs
pub fn handle_submit<S: LocalStore>(
    registration: &mut RegistrationStore<S>,
    paths: &RegisterPaths,
    settings: &Settings,
    step: &str,
    pairs: &[String],
) -> RegisterResult<()> {
    let route = parse_step(step)?;
    let values = parse_assignments(pairs)?;

    let submission = submit_step(registration, route, &values, settings.strict_patterns)?;

    let log = SubmissionLog::new(paths.submission_log());
    if let Err(e) = record_submission(&log, Uuid::new_v4(), &submission) {
        tracing::warn!(error = %e, "failed to record submission");
    }

    println!("Saved {}", submission.step_id);
    if submission.next.number() > step_count() {
        println!();
        print!("{}", format_summary(&submission.after));
    } else {
        println!("Next: {}", submission.next.path());
    }

    Ok(())
}

/// Resolve a path to its canonical route
pub fn handle_route(path: &str) -> RegisterResult<()> {
    let route = StepRoute::parse(path)?;

    println!("{}", route.path());
    println!("  Step: {}", route.step_id());
    if StepRoute::is_legacy_path(path) {
        println!("  (rewritten from legacy path {})", path.trim());
    }

    Ok(())
}

/// Clear the persisted registration data
pub fn handle_reset<S: LocalStore>(
    registration: &mut RegistrationStore<S>,
    force: bool,
) -> RegisterResult<()> {
    let saved = registration.persisted();
    if saved.is_empty() {
        println!("No registration data to clear.");
        return Ok(());
    }

    if !force {
        println!(
            "This will clear {} saved answers under '{}'.",
            saved.len(),
            registration.storage_key()
        );
        println!();
        println!("To proceed, run again with --force flag:");
        println!("  scriber-register reset --force");
        return Ok(());
    }

    registration.clear()?;
    println!("Cleared {} saved answers.", saved.len());
    Ok(())
}
