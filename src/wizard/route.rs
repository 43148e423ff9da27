//! Step routing
//!
//! A step is addressed as `/account/register/steps/<n>`. The hyphenated
//! legacy forms `/account/register/step-<n>` and `/account/register/steps-<n>`
//! are rewritten to the canonical path.

use std::fmt;
use std::str::FromStr;

use crate::error::RegisterError;
use crate::models::step_id;

/// Path prefix shared by every registration route
pub const REGISTER_PREFIX: &str = "/account/register";

/// Navigation position: the 1-based step number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StepRoute(u32);

impl StepRoute {
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// The first step of the wizard
    pub fn first() -> Self {
        Self(1)
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// Catalog id this route points at
    pub fn step_id(self) -> String {
        step_id(self.0)
    }

    /// Canonical path
    pub fn path(self) -> String {
        format!("{}/steps/{}", REGISTER_PREFIX, self.0)
    }

    /// Route reached by "Continue"
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Route reached by "Back"
    pub fn previous(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Parse a canonical or legacy path
    pub fn parse(path: &str) -> Result<Self, RegisterError> {
        let trimmed = path.trim().trim_end_matches('/');
        let rest = trimmed
            .strip_prefix(REGISTER_PREFIX)
            .ok_or_else(|| RegisterError::Route(path.to_string()))?;

        let number = rest
            .strip_prefix("/steps/")
            .or_else(|| rest.strip_prefix("/steps-"))
            .or_else(|| rest.strip_prefix("/step-"))
            .ok_or_else(|| RegisterError::Route(path.to_string()))?;

        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RegisterError::Route(path.to_string()));
        }

        // steps are numbered from 1
        match number.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Self(n)),
            _ => Err(RegisterError::Route(path.to_string())),
        }
    }

    /// Whether `path` uses a legacy hyphenated form that gets rewritten
    pub fn is_legacy_path(path: &str) -> bool {
        let trimmed = path.trim().trim_end_matches('/');
        trimmed
            .strip_prefix(REGISTER_PREFIX)
            .is_some_and(|rest| rest.starts_with("/step-") || rest.starts_with("/steps-"))
    }
}

impl Default for StepRoute {
    fn default() -> Self {
        Self::first()
    }
}

impl fmt::Display for StepRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for StepRoute {
    type Err = RegisterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
