//! Event handler for the TUI
//!
//! Routes keyboard events to the focused widget first and falls back to
//! wizard navigation for keys the widget ignores.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::RegisterResult;
use crate::storage::LocalStore;

use super::app::{App, FocusTarget};
use super::event::Event;
use super::widgets::{KeyOutcome, Notification};

/// Handle an incoming event
pub fn handle_event<S: LocalStore>(app: &mut App<S>, event: Event) -> RegisterResult<()> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Key(_) | Event::Resize(_, _) => Ok(()),
        Event::Tick => {
            app.tick();
            Ok(())
        }
    }
}

/// Handle a key press
pub fn handle_key<S: LocalStore>(app: &mut App<S>, key: KeyEvent) -> RegisterResult<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    // An open dropdown owns every key until it closes
    let capturing = app.focused_widget_mut().is_some_and(|w| w.is_capturing());
    if capturing {
        handle_widget_key(app, key);
        return Ok(());
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            app.focus_next();
            return Ok(());
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus_prev();
            return Ok(());
        }
        _ => {}
    }

    match app.focused() {
        Some(FocusTarget::Field(_)) => {
            if handle_widget_key(app, key) == KeyOutcome::Ignored {
                match key.code {
                    KeyCode::Enter => app.focus_next(),
                    KeyCode::Esc => app.quit(),
                    _ => {}
                }
            }
        }
        Some(FocusTarget::Continue) => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => submit(app),
            KeyCode::Esc => app.quit(),
            _ => {}
        },
        Some(FocusTarget::Back) => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => app.go_back(),
            KeyCode::Esc => app.quit(),
            _ => {}
        },
        None => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                app.quit();
            }
        }
    }

    Ok(())
}

/// Forward a key to the focused widget and apply any value change
fn handle_widget_key<S: LocalStore>(app: &mut App<S>, key: KeyEvent) -> KeyOutcome {
    let Some(widget) = app.focused_widget_mut() else {
        return KeyOutcome::Ignored;
    };

    let outcome = widget.handle_key(key);
    if let KeyOutcome::Changed(value) = &outcome {
        let name = widget.name().to_string();
        app.on_field_change(&name, value.clone());
    }
    outcome
}

fn submit<S: LocalStore>(app: &mut App<S>) {
    if let Err(e) = app.submit() {
        tracing::error!(error = %e, step = %app.route.step_id(), "submission failed");
        app.status = Some(Notification::error(format!("Could not save: {}", e)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::wizard::catalog::{ACCEPTS_MARKETING, FIRST_NAME, INDUSTRY};
    use crate::wizard::{RegistrationStore, StepRoute};

    const KEY: &str = "registrationFormData";

    fn app_at(step: u32) -> App<MemoryStore> {
        let store = RegistrationStore::new(MemoryStore::new(), KEY);
        App::new(store, StepRoute::new(step), false)
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn type_text(app: &mut App<MemoryStore>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn focus_continue(app: &mut App<MemoryStore>) {
        while app.focused() != Some(FocusTarget::Continue) {
            press(app, KeyCode::Tab);
        }
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app_at(1);
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_updates_snapshot() {
        let mut app = app_at(1);
        type_text(&mut app, "Ada");

        assert_eq!(app.form_data().unwrap().get(FIRST_NAME), Some("Ada"));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_fill_contact_step_and_continue() {
        let mut app = app_at(1);

        type_text(&mut app, "Ada");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Lovelace");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Analytical Engines");
        press(&mut app, KeyCode::Tab);

        // Continue stays disabled until the checkbox has a stored value
        assert!(!app.continue_state().is_enabled());
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.form_data().unwrap().get(ACCEPTS_MARKETING), Some("on"));
        assert!(app.continue_state().is_enabled());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused(), Some(FocusTarget::Continue));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.route, StepRoute::new(2));
        let saved = app.store.persisted();
        assert_eq!(saved.get(FIRST_NAME), Some("Ada"));
        assert_eq!(saved.get(ACCEPTS_MARKETING), Some("on"));
    }

    #[test]
    fn test_invalid_email_shows_inline_error_on_blur() {
        let mut app = app_at(1);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "not-an-email");
        press(&mut app, KeyCode::Tab);

        let email = app.widgets.iter().find_map(|w| match w {
            crate::tui::widgets::FieldWidget::Text(t) if t.field.name == "contact.email" => Some(t),
            _ => None,
        });
        assert_eq!(
            email.unwrap().error.as_deref(),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_dropdown_selection_flows_to_snapshot() {
        let mut app = app_at(2);
        // Industry is the fourth dropdown
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.form_data().unwrap().get(INDUSTRY), Some("manufacturing"));
        assert_eq!(app.focused(), Some(FocusTarget::Field(3)));
    }

    #[test]
    fn test_esc_in_open_dropdown_does_not_quit() {
        let mut app = app_at(2);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_back_from_second_step() {
        let mut app = app_at(2);
        focus_continue(&mut app);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused(), Some(FocusTarget::Back));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, StepRoute::new(1));
    }

    #[test]
    fn test_disabled_continue_keeps_step() {
        let mut app = app_at(2);
        focus_continue(&mut app);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.route, StepRoute::new(2));
        assert!(app.status.is_some());
    }
}
