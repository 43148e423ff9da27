//! Core data models for the registration wizard

pub mod field;
pub mod form_data;
pub mod step;

pub use field::{
    checkbox_value, FieldDefinition, FieldKind, FieldPattern, SelectOption, CHECKBOX_OFF,
    CHECKBOX_ON,
};
pub use form_data::FormData;
pub use step::{step_id, StepDefinition};
