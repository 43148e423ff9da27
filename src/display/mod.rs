//! Display formatting for terminal output
//!
//! Formats registration data and the step catalog for the CLI.

pub mod registration;

pub use registration::{format_form_data, format_step_list, format_summary};
