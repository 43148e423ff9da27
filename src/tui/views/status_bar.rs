//! Status bar view
//!
//! Shows the current route, whether Continue is available, the latest
//! status message and key hints for the focused item.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::storage::LocalStore;
use crate::tui::app::App;
use crate::tui::keybindings::hint_line;

/// Render the status bar
pub fn render<S: LocalStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.route.path()),
        Style::default().fg(Color::Cyan),
    )];

    if app.current_step().is_some() {
        let (label, color) = if app.continue_state().is_enabled() {
            ("Ready", Color::Green)
        } else {
            ("Incomplete", Color::Yellow)
        };
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(status) = &app.status {
        let kind = status.notification_type;
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("{} {}", kind.icon(), status.message),
            Style::default().fg(kind.color()),
        ));
    }

    // Key hints (right-aligned)
    let hints = format!(" {} ", hint_line(app.key_context()));
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hints_len = hints.chars().count();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints_len);
    if padding_len > 0 {
        spans.push(Span::raw(" ".repeat(padding_len)));
        spans.push(Span::styled(hints, Style::default().fg(Color::White)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
