//! Registration wizard
//!
//! The wizard state machine: step catalog, state holder, routing,
//! Continue gating and step submission.

pub mod catalog;
pub mod form;
pub mod route;
pub mod state;
pub mod validation;

pub use catalog::{derive_steps, step_count};
pub use form::{commit_step, locate_step, submit_step, Submission};
pub use route::StepRoute;
pub use state::RegistrationStore;
pub use validation::{continue_state, pattern_error, unanswered_fields, ContinueState};
