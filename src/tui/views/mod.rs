//! TUI views
//!
//! The step panel and the status bar.

pub mod status_bar;
pub mod step;

use ratatui::Frame;

use crate::storage::LocalStore;

use super::app::App;
use super::layout::AppLayout;

/// Render the entire application
pub fn render<S: LocalStore>(frame: &mut Frame, app: &App<S>) {
    let layout = AppLayout::new(frame.area());

    step::render(frame, app, layout.main);
    status_bar::render(frame, app, layout.status_bar);
}
