//! Field validation rules
//!
//! A text answer is satisfied when it is non-empty after trimming. A select
//! answer is satisfied only when it is one of the enumerated options; any
//! other non-empty value is reported as an unknown option.

use std::fmt;
use thiserror::Error;

use crate::models::FieldId;

/// Why a field failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required field is empty or unselected
    Missing,
    /// A select answer is outside its option set
    UnknownOption(String),
}

/// A single field-scoped validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Wire key of the offending field or question
    pub field: String,
    pub kind: ValidationErrorKind,
    /// Message suitable for showing next to the input
    pub message: String,
}

impl ValidationError {
    pub fn missing(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ValidationErrorKind::Missing,
            message: message.into(),
        }
    }

    pub fn unknown_option(field: impl Into<String>, value: &str) -> Self {
        Self {
            field: field.into(),
            kind: ValidationErrorKind::UnknownOption(value.to_string()),
            message: format!("'{}' is not one of the available options", value),
        }
    }
}

/// Ordered collection of field errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Gets the error reported for a field, if any
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Drops any error reported for a field
    pub fn clear_field(&mut self, field: &str) {
        self.0.retain(|e| e.field != field);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.message.clone()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Returns true if a text answer is present and non-blank
pub fn is_satisfied(value: Option<&str>) -> bool {
    value.map_or(false, |v| !v.trim().is_empty())
}

/// Input kind of a field or question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Text,
    Select(&'static [&'static str]),
}

impl RuleKind {
    pub fn options(&self) -> Option<&'static [&'static str]> {
        match self {
            RuleKind::Text => None,
            RuleKind::Select(options) => Some(options),
        }
    }
}

/// Checks one answer against its kind and required flag
pub fn check_answer(
    field: &str,
    value: Option<&str>,
    required: bool,
    kind: RuleKind,
    missing_message: &str,
) -> Option<ValidationError> {
    if !is_satisfied(value) {
        return required.then(|| ValidationError::missing(field, missing_message));
    }

    match (kind, value) {
        (RuleKind::Select(options), Some(v)) if !options.contains(&v) => {
            Some(ValidationError::unknown_option(field, v))
        }
        _ => None,
    }
}

/// Validation rule for one document field within a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: FieldId,
    pub required: bool,
    pub kind: RuleKind,
    pub message: &'static str,
}

impl FieldRule {
    /// Required free-text field
    pub const fn text(field: FieldId, message: &'static str) -> Self {
        Self {
            field,
            required: true,
            kind: RuleKind::Text,
            message,
        }
    }

    /// Required select field
    pub const fn select(
        field: FieldId,
        options: &'static [&'static str],
        message: &'static str,
    ) -> Self {
        Self {
            field,
            required: true,
            kind: RuleKind::Select(options),
            message,
        }
    }

    /// Optional select field; only an out-of-set value is an error
    pub const fn optional_select(field: FieldId, options: &'static [&'static str]) -> Self {
        Self {
            field,
            required: false,
            kind: RuleKind::Select(options),
            message: "",
        }
    }

    pub fn check(&self, value: Option<&str>) -> Option<ValidationError> {
        check_answer(self.field.key(), value, self.required, self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: &[&str] = &["Red", "Green"];

    #[test]
    fn test_is_satisfied() {
        assert!(!is_satisfied(None));
        assert!(!is_satisfied(Some("")));
        assert!(!is_satisfied(Some(" \t\n")));
        assert!(is_satisfied(Some(" x ")));
    }

    #[test]
    fn test_required_text_rule() {
        let rule = FieldRule::text(FieldId::AppName, "Application name is required");
        let err = rule.check(Some("  ")).unwrap();
        assert_eq!(err.field, "appName");
        assert_eq!(err.kind, ValidationErrorKind::Missing);
        assert_eq!(err.message, "Application name is required");
        assert!(rule.check(Some("TaskMaster")).is_none());
    }

    #[test]
    fn test_select_rule_rejects_unknown_option() {
        let rule = FieldRule::select(FieldId::Platform, COLORS, "Pick one");
        assert!(rule.check(Some("Red")).is_none());

        let err = rule.check(Some("Blue")).unwrap();
        assert_eq!(err.kind, ValidationErrorKind::UnknownOption("Blue".into()));

        let err = rule.check(None).unwrap();
        assert_eq!(err.kind, ValidationErrorKind::Missing);
    }

    #[test]
    fn test_optional_select_rule() {
        let rule = FieldRule::optional_select(FieldId::Timeline, COLORS);
        assert!(rule.check(None).is_none());
        assert!(rule.check(Some("Green")).is_none());
        assert!(rule.check(Some("Purple")).is_some());
    }

    #[test]
    fn test_errors_clear_field() {
        let mut errors: ValidationErrors = vec![
            ValidationError::missing("appName", "a"),
            ValidationError::missing("description", "b"),
        ]
        .into_iter()
        .collect();
        assert_eq!(errors.to_string(), "a; b");

        errors.clear_field("appName");
        assert_eq!(errors.len(), 1);
        assert!(!errors.contains("appName"));
        assert!(errors.contains("description"));
    }
}
