//! Structured validation results
//!
//! Bad input is described, not raised. Hard errors flip `is_valid`;
//! advisory warnings share the message list but leave it untouched.

use serde::{Deserialize, Serialize};

/// Outcome of a validation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// True only when no hard error was recorded
    pub is_valid: bool,
    /// Hard errors and advisory warnings, in the order they were found
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Empty, valid report
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Record a hard failure
    pub fn reject(&mut self, message: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(message.into());
    }

    /// Record an advisory message without invalidating
    pub fn warn(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Whether any message at all was recorded
    pub fn has_messages(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}
