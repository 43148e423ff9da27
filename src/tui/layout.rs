//! Layout definitions for the TUI
//!
//! The screen is a step panel above a one-line status bar. Inside the
//! panel, fields flow left to right on a twelve-column grid.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::models::field::MAX_COL_SPAN;

/// Layout regions for the TUI
pub struct AppLayout {
    /// Step panel
    pub main: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Step panel
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            main: vertical[0],
            status_bar: vertical[1],
        }
    }
}

/// Layout inside the step panel
pub struct StepLayout {
    /// Step description
    pub description: Rect,
    /// Field grid
    pub fields: Rect,
    /// Back / Continue row
    pub buttons: Rect,
}

impl StepLayout {
    pub fn new(area: Rect, description_height: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(description_height + 1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            description: chunks[0],
            fields: chunks[1],
            buttons: chunks[2],
        }
    }
}

/// Group fields into grid rows by column span
///
/// `spans` pairs an item index with its span. A field that does not fit in
/// the remaining columns starts a new row.
pub fn grid_rows(spans: &[(usize, u8)]) -> Vec<Vec<(usize, u8)>> {
    let mut rows: Vec<Vec<(usize, u8)>> = Vec::new();
    let mut used = 0u8;

    for &(index, span) in spans {
        let span = span.clamp(1, MAX_COL_SPAN);
        match rows.last_mut() {
            Some(row) if used + span <= MAX_COL_SPAN => row.push((index, span)),
            _ => {
                rows.push(vec![(index, span)]);
                used = 0;
            }
        }
        used += span;
    }

    rows
}

/// Split a row area into cells by column span
pub fn row_cells(area: Rect, row: &[(usize, u8)]) -> Vec<Rect> {
    let mut constraints: Vec<Constraint> = row
        .iter()
        .map(|&(_, span)| Constraint::Ratio(span as u32, MAX_COL_SPAN as u32))
        .collect();
    let used: u32 = row.iter().map(|&(_, span)| span as u32).sum();
    if used < MAX_COL_SPAN as u32 {
        constraints.push(Constraint::Ratio(MAX_COL_SPAN as u32 - used, MAX_COL_SPAN as u32));
    }

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .spacing(2)
        .split(area)
        .iter()
        .take(row.len())
        .copied()
        .collect()
}
