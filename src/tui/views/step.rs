//! Step view
//!
//! Renders the step located for the current route: its description, the
//! field grid and the Back / Continue buttons. No matching step renders
//! nothing.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::storage::LocalStore;
use crate::tui::app::{App, FocusTarget};
use crate::tui::layout::{grid_rows, row_cells, StepLayout};
use crate::wizard::step_count;

pub fn render<S: LocalStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let Some(step) = app.current_step() else {
        return;
    };

    let block = Block::default()
        .title(format!(" {} of {} ", step.title, step_count()))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let description_height = wrapped_height(&step.description, inner.width);
    let layout = StepLayout::new(inner, description_height);

    let description = Paragraph::new(step.description.as_str())
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    frame.render_widget(description, layout.description);

    render_fields(frame, app, layout.fields);
    render_buttons(frame, app, layout.buttons);
}

fn render_fields<S: LocalStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let spans: Vec<(usize, u8)> = app
        .widgets
        .iter()
        .enumerate()
        .filter(|(_, w)| !w.is_hidden())
        .map(|(i, w)| (i, w.field().col_span))
        .collect();

    let bottom = area.y + area.height;
    let mut y = area.y;
    for row in grid_rows(&spans) {
        let height = row
            .iter()
            .map(|&(i, _)| app.widgets[i].height())
            .max()
            .unwrap_or(1);
        if y >= bottom {
            break;
        }
        let row_area = Rect::new(area.x, y, area.width, height.min(bottom - y));
        for (&(i, _), cell) in row.iter().zip(row_cells(row_area, &row)) {
            frame.render_widget(&app.widgets[i], cell);
        }
        y += height;
    }
}

fn render_buttons<S: LocalStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let focused = app.focused();
    let enabled = app.continue_state().is_enabled();

    let mut spans = Vec::new();
    if app.can_go_back() {
        spans.push(button("Back", focused == Some(FocusTarget::Back), true));
        spans.push(Span::raw("  "));
    }
    spans.push(button("Continue", focused == Some(FocusTarget::Continue), enabled));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn button(label: &str, focused: bool, enabled: bool) -> Span<'static> {
    let style = match (focused, enabled) {
        (true, true) => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Black).bg(Color::DarkGray),
        (false, true) => Style::default().fg(Color::Green),
        (false, false) => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
    };
    Span::styled(format!("[ {} ]", label), style)
}

/// Rows a wrapped paragraph needs, estimated by character count
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    let chars = text.chars().count();
    chars.div_ceil(width).max(1) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height("", 40), 1);
        assert_eq!(wrapped_height("short", 40), 1);
        assert_eq!(wrapped_height(&"x".repeat(81), 40), 3);
    }
}
