//! Validation helpers for config sections

use crate::ValidationError;
use std::fmt::Display;

/// A named configuration section that can validate itself
pub trait ConfigSection {
    /// Validates the section, returning every invalid field
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Name of the section as it appears in the config file
    fn section_name(&self) -> &'static str;
}

/// Field-level validation helpers
pub struct Validator;

impl Validator {
    /// Checks that a value lies within `[min, max]`
    pub fn in_range<T: PartialOrd + Display + Copy>(
        value: T,
        min: T,
        max: T,
        field: &str,
    ) -> Option<ValidationError> {
        if value < min || value > max {
            Some(ValidationError::new(
                field,
                format!("must be between {} and {}, got {}", min, max, value),
            ))
        } else {
            None
        }
    }

    /// Checks that a string is not empty or whitespace
    pub fn non_empty(value: &str, field: &str) -> Option<ValidationError> {
        if value.trim().is_empty() {
            Some(ValidationError::new(field, "must not be empty"))
        } else {
            None
        }
    }

    /// Collects the failures from a set of field checks
    pub fn collect_errors(
        checks: Vec<Option<ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = checks.into_iter().flatten().collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
