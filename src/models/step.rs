//! Step definitions

use serde::Serialize;

use super::field::FieldDefinition;

/// Catalog id for a 1-based step number (`step-3`)
pub fn step_id(number: u32) -> String {
    format!("step-{}", number)
}

/// One page of the wizard
#[derive(Debug, Clone, Serialize)]
pub struct StepDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub fields: Vec<FieldDefinition>,
}

impl StepDefinition {
    pub fn new(
        number: u32,
        description: impl Into<String>,
        fields: Vec<FieldDefinition>,
    ) -> Self {
        Self {
            id: step_id(number),
            title: format!("Step {}", number),
            description: description.into(),
            fields,
        }
    }

    /// Fields that are currently shown
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| !f.hidden)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}
