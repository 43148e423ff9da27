//! Application state for the TUI
//!
//! The App owns the session's `RegistrationStore`, the derived step list and
//! one widget per field of the current step.

use uuid::Uuid;

use crate::audit::{record_submission, SubmissionLog};
use crate::error::RegisterResult;
use crate::models::{FormData, StepDefinition};
use crate::storage::LocalStore;
use crate::wizard::{
    commit_step, continue_state, derive_steps, locate_step, step_count, unanswered_fields,
    ContinueState, RegistrationStore, StepRoute,
};

use super::keybindings::KeyContext;
use super::widgets::{FieldWidget, Notification};

/// Something that can hold focus on a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// Index into `App::widgets`
    Field(usize),
    Continue,
    Back,
}

/// Main application state
pub struct App<S: LocalStore> {
    pub store: RegistrationStore<S>,

    /// Current step route
    pub route: StepRoute,

    /// Catalog derived from the current form data
    pub steps: Vec<StepDefinition>,

    /// Widgets for every field of the current step, hidden ones included
    pub widgets: Vec<FieldWidget>,

    /// Index into `focus_targets()`
    pub focus: usize,

    /// Transient status bar message
    pub status: Option<Notification>,

    pub should_quit: bool,

    /// Set when the last step was submitted
    pub completed: bool,

    pub strict_patterns: bool,

    session_id: Uuid,
    submission_log: Option<SubmissionLog>,
}

impl<S: LocalStore> App<S> {
    /// Create the app, loading the store if needed, positioned at `route`
    pub fn new(mut store: RegistrationStore<S>, route: StepRoute, strict_patterns: bool) -> Self {
        if !store.is_loaded() {
            store.load();
        }
        let steps = derive_steps(store.form_data());

        let mut app = Self {
            store,
            route,
            steps,
            widgets: Vec::new(),
            focus: 0,
            status: None,
            should_quit: false,
            completed: false,
            strict_patterns,
            session_id: Uuid::new_v4(),
            submission_log: None,
        };
        app.go_to(route);
        if !app.store.persisted().is_empty() {
            app.status = Some(Notification::info("Resumed with your saved answers"));
        }
        app
    }

    /// Record every submission in `log`
    pub fn with_submission_log(mut self, log: SubmissionLog) -> Self {
        self.submission_log = Some(log);
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn current_step(&self) -> Option<&StepDefinition> {
        locate_step(&self.steps, self.route)
    }

    pub fn form_data(&self) -> Option<&FormData> {
        self.store.form_data()
    }

    /// Continue state of the current step; invalid when no step matches
    pub fn continue_state(&self) -> ContinueState {
        match self.current_step() {
            Some(step) => continue_state(&step.fields, self.form_data(), self.strict_patterns),
            None => ContinueState::Invalid,
        }
    }

    /// Back is not offered on the first step
    pub fn can_go_back(&self) -> bool {
        self.route.number() > 1
    }

    /// Focusable items in order: visible fields, Continue, then Back
    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        if self.current_step().is_none() {
            return Vec::new();
        }

        let mut targets: Vec<_> = self
            .widgets
            .iter()
            .enumerate()
            .filter(|(_, w)| !w.is_hidden())
            .map(|(i, _)| FocusTarget::Field(i))
            .collect();
        targets.push(FocusTarget::Continue);
        if self.can_go_back() {
            targets.push(FocusTarget::Back);
        }
        targets
    }

    pub fn focused(&self) -> Option<FocusTarget> {
        self.focus_targets().get(self.focus).copied()
    }

    pub fn focused_widget_mut(&mut self) -> Option<&mut FieldWidget> {
        match self.focused() {
            Some(FocusTarget::Field(i)) => self.widgets.get_mut(i),
            _ => None,
        }
    }

    /// Which key hints apply to the focused item
    pub fn key_context(&self) -> KeyContext {
        match self.focused() {
            Some(FocusTarget::Field(i)) => match self.widgets.get(i) {
                Some(FieldWidget::Text(_)) => KeyContext::TextField,
                Some(FieldWidget::Checkbox(_)) => KeyContext::Checkbox,
                Some(FieldWidget::Dropdown(w)) if w.open => KeyContext::DropdownOpen,
                Some(FieldWidget::Dropdown(_)) => KeyContext::Dropdown,
                None => KeyContext::Global,
            },
            Some(FocusTarget::Continue | FocusTarget::Back) => KeyContext::Button,
            None => KeyContext::Global,
        }
    }

    pub fn focus_next(&mut self) {
        let count = self.focus_targets().len();
        if count > 0 {
            self.move_focus((self.focus + 1) % count);
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.focus_targets().len();
        if count > 0 {
            self.move_focus((self.focus + count - 1) % count);
        }
    }

    fn move_focus(&mut self, next: usize) {
        if let Some(widget) = self.focused_widget_mut() {
            widget.blur();
        }
        self.focus = next;
        if let Some(widget) = self.focused_widget_mut() {
            widget.focus();
        }
    }

    /// Apply a widget change to the in-memory snapshot and re-derive steps
    pub fn on_field_change(&mut self, name: &str, value: String) {
        let next = self
            .store
            .form_data()
            .cloned()
            .unwrap_or_default()
            .with(name, value);
        self.store.set_form_data(next);
        self.refresh_steps();
    }

    /// Re-derive the catalog and push new labels and visibility into widgets
    pub fn refresh_steps(&mut self) {
        let focused = self.focused();

        self.steps = derive_steps(self.store.form_data());
        if let Some(step) = locate_step(&self.steps, self.route) {
            for widget in &mut self.widgets {
                if let Some(field) = step.field(widget.name()) {
                    widget.sync_field(field);
                }
            }
        }

        // Keep focus on the same target when visibility shifts the order
        let targets = self.focus_targets();
        self.focus = focused
            .and_then(|f| targets.iter().position(|t| *t == f))
            .unwrap_or_else(|| self.focus.min(targets.len().saturating_sub(1)));
    }

    /// Navigate to `route` and build fresh widgets for its step
    pub fn go_to(&mut self, route: StepRoute) {
        self.route = route;
        self.steps = derive_steps(self.store.form_data());

        let data = self.store.form_data();
        self.widgets = locate_step(&self.steps, route)
            .map(|step| {
                step.fields
                    .iter()
                    .map(|field| FieldWidget::from_field(field, data))
                    .collect()
            })
            .unwrap_or_default();

        self.focus = 0;
        if let Some(widget) = self.focused_widget_mut() {
            widget.focus();
        }
        tracing::debug!(route = %route, "navigated");
    }

    /// Back one step, no validation
    pub fn go_back(&mut self) {
        if self.can_go_back() {
            self.go_to(self.route.previous());
        }
    }

    /// Submit the current step if Continue is enabled
    pub fn submit(&mut self) -> RegisterResult<()> {
        let Some(step) = self.current_step() else {
            return Ok(());
        };

        if !self.continue_state().is_enabled() {
            let missing: Vec<_> =
                unanswered_fields(&step.fields, self.form_data(), self.strict_patterns)
                    .iter()
                    .map(|f| short_label(&f.label))
                    .collect();
            self.status = Some(Notification::warning(format!(
                "Continue is disabled. Still needed: {}",
                missing.join(", ")
            )));
            return Ok(());
        }

        let values: FormData = self
            .widgets
            .iter()
            .filter(|w| !w.is_hidden())
            .filter_map(|w| w.submit_value().map(|v| (w.name().to_string(), v)))
            .collect();

        let submission = commit_step(&mut self.store, self.route, &values)?;

        if let Some(log) = &self.submission_log {
            if let Err(e) = record_submission(log, self.session_id, &submission) {
                tracing::warn!(error = %e, "failed to record submission");
            }
        }

        if submission.next.number() > step_count() {
            tracing::info!("registration complete");
            self.completed = true;
            self.should_quit = true;
            return Ok(());
        }

        self.go_to(submission.next);
        self.status = Some(Notification::success(format!("Saved {}", submission.step_id)));
        Ok(())
    }

    /// Drop the status message once it has expired
    pub fn tick(&mut self) {
        if self.status.as_ref().is_some_and(Notification::is_expired) {
            self.status = None;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

/// First clause of a long label, for status hints
fn short_label(label: &str) -> String {
    let cut = label.find(" (").unwrap_or(label.len());
    label[..cut].to_string()
}
