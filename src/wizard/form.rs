//! Step submission
//!
//! The renderer-side sequence shared by the TUI and the `submit` command:
//! locate the step for a route, merge submitted values, persist them and
//! advance the route.

use crate::error::{RegisterError, RegisterResult};
use crate::models::{FieldDefinition, FieldKind, FormData, StepDefinition, CHECKBOX_OFF, CHECKBOX_ON};
use crate::storage::LocalStore;

use super::catalog::derive_steps;
use super::route::StepRoute;
use super::state::RegistrationStore;
use super::validation::unanswered_fields;

/// Find the step a route points at; `None` renders nothing
pub fn locate_step(steps: &[StepDefinition], route: StepRoute) -> Option<&StepDefinition> {
    let id = route.step_id();
    steps.iter().find(|step| step.id == id)
}

/// Outcome of a successful step submission
#[derive(Debug, Clone)]
pub struct Submission {
    pub step_id: String,
    /// Persisted data before the save
    pub before: FormData,
    /// Persisted data after the save
    pub after: FormData,
    /// Where navigation goes next
    pub next: StepRoute,
}

/// Persist already collected step values and advance the route
pub fn commit_step<S: LocalStore>(
    store: &mut RegistrationStore<S>,
    route: StepRoute,
    values: &FormData,
) -> RegisterResult<Submission> {
    let before = store.persisted();
    let after = store.save_form_data(values)?;

    tracing::info!(step = %route.step_id(), next = %route.next(), "step submitted");

    Ok(Submission {
        step_id: route.step_id(),
        before,
        after,
        next: route.next(),
    })
}

/// Apply `values` to a step, check the Continue gate and submit it
///
/// Used by non-interactive callers. Every key must name a field of the
/// step, and choice fields only take values their widgets can produce.
/// Hidden fields are left out of the submission.
pub fn submit_step<S: LocalStore>(
    store: &mut RegistrationStore<S>,
    route: StepRoute,
    values: &FormData,
    strict_patterns: bool,
) -> RegisterResult<Submission> {
    if !store.is_loaded() {
        store.load();
    }
    let current = store.form_data().cloned().unwrap_or_default();

    let steps = derive_steps(Some(&current));
    let step = locate_step(&steps, route).ok_or_else(|| RegisterError::step_not_found(route.step_id()))?;

    if let Some(unknown) = values.keys().find(|key| step.field(key).is_none()) {
        return Err(RegisterError::Validation(format!(
            "{} is not a field of {}",
            unknown, step.id
        )));
    }
    for (key, value) in values.iter() {
        if let Some(field) = step.field(key) {
            check_choice(field, value)?;
        }
    }

    let edited = current.merged(values);
    store.set_form_data(edited.clone());

    // Visibility may depend on the values just applied
    let steps = derive_steps(Some(&edited));
    let step = locate_step(&steps, route).ok_or_else(|| RegisterError::step_not_found(route.step_id()))?;

    let missing = unanswered_fields(&step.fields, Some(&edited), strict_patterns);
    if !missing.is_empty() {
        let names: Vec<_> = missing.iter().map(|f| f.name.as_str()).collect();
        return Err(RegisterError::Validation(format!(
            "Continue is disabled until these fields are answered: {}",
            names.join(", ")
        )));
    }

    let collected = collect_from_data(step, &edited);
    commit_step(store, route, &collected)
}

/// Reject checkbox and dropdown values outside their fixed choices
///
/// An empty dropdown value is left to the Continue gate.
fn check_choice(field: &FieldDefinition, value: &str) -> RegisterResult<()> {
    let valid = match &field.kind {
        FieldKind::Text { .. } => true,
        FieldKind::Checkbox { .. } => value == CHECKBOX_ON || value == CHECKBOX_OFF,
        FieldKind::Dropdown { .. } => value.is_empty() || field.option_label(value).is_some(),
    };
    if valid {
        return Ok(());
    }

    let allowed = if field.is_checkbox() {
        format!("{}, {}", CHECKBOX_ON, CHECKBOX_OFF)
    } else {
        field.option_values().join(", ")
    };
    Err(RegisterError::Validation(format!(
        "{} is not a valid value for {} (expected one of: {})",
        value, field.name, allowed
    )))
}

/// Present values of a step's visible fields, read from form data
fn collect_from_data(step: &StepDefinition, data: &FormData) -> FormData {
    step.visible_fields()
        .filter_map(|field| {
            let value = match &field.kind {
                FieldKind::Text { .. } => Some(data.get(&field.name).unwrap_or_default()),
                FieldKind::Checkbox { .. } | FieldKind::Dropdown { .. } => data
                    .get(&field.name)
                    .filter(|v| !v.is_empty()),
            }?;
            Some((field.name.clone(), value.to_string()))
        })
        .collect()
}
