use thiserror::Error;

use crate::models::FieldId;
use crate::validation::ValidationErrors;

/// Errors returned by the wizard and prototype sequencing operations
///
/// None of these are fatal: every variant is field- or step-scoped and
/// can be corrected by entering a value or navigating elsewhere.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("'{0}' is required and cannot be skipped")]
    SkipNotAllowed(String),

    #[error("Index {index} is out of range (there are {len} steps)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Field '{field}' does not belong to section '{section}'")]
    FieldNotInSection { field: FieldId, section: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field '{field}' expects a {expected} value")]
    FieldTypeMismatch { field: FieldId, expected: &'static str },
}

impl From<ValidationErrors> for WizardError {
    fn from(errors: ValidationErrors) -> Self {
        WizardError::Validation(errors)
    }
}
