//! Terminal User Interface module
//!
//! Runs the registration wizard with ratatui: one step at a time, widgets
//! per field, Continue gated on the step's answers.

pub mod app;
pub mod event;
pub mod handler;
pub mod keybindings;
pub mod layout;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_wizard;
