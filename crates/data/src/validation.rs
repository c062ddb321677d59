//! Field validation results shared by records and console forms

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of validating a record or a form
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<FieldError>,
    pub warnings: Vec<FieldWarning>,
}

/// A blocking problem with one field
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// A non-blocking remark about one field
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FieldWarning {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: FieldWarning) {
        self.warnings.push(warning);
    }

    /// Records `error` when `condition` does not hold.
    pub fn check(&mut self, condition: bool, error: impl FnOnce() -> FieldError) {
        if !condition {
            self.errors.push(error());
        }
    }

    /// Appends every error and warning of `other`.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// First error message reported for `field`, if any.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Pairs of (field, message), the shape form feedback components consume.
    pub fn field_messages(&self) -> Vec<(String, String)> {
        self.errors
            .iter()
            .map(|e| (e.field.clone(), e.message.clone()))
            .collect()
    }

    pub fn into_result(self) -> Result<(), ValidationResult> {
        if self.is_valid() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(field.clone(), format!("Field '{field}' is required"), "REQUIRED_FIELD")
    }

    pub fn invalid_format(field: impl Into<String>, expected: impl Into<String>) -> Self {
        let field = field.into();
        let expected = expected.into();
        Self::new(
            field.clone(),
            format!("Field '{field}' has invalid format. Expected: {expected}"),
            "INVALID_FORMAT",
        )
    }

    pub fn out_of_range(field: impl Into<String>, min: impl fmt::Display, max: impl fmt::Display) -> Self {
        let field = field.into();
        Self::new(
            field.clone(),
            format!("Field '{field}' must be between {min} and {max}"),
            "OUT_OF_RANGE",
        )
    }

    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(
            field.clone(),
            format!("Field '{field}' is invalid: {}", reason.into()),
            "INVALID_VALUE",
        )
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FieldWarning {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Required non-blank text.
pub fn require_text(result: &mut ValidationResult, field: &str, value: &str) {
    result.check(!value.trim().is_empty(), || FieldError::required(field));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_collects_errors() {
        let mut result = ValidationResult::success();
        result.check(true, || FieldError::required("name"));
        assert!(result.is_valid());

        result.check(false, || FieldError::required("name"));
        require_text(&mut result, "city", "   ");
        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.error_for("city"), Some("Field 'city' is required"));
        assert_eq!(result.error_for("phone"), None);
    }

    #[test]
    fn test_display_joins_messages() {
        let mut result = ValidationResult::success();
        result.add_error(FieldError::required("name"));
        result.add_error(FieldError::out_of_range("stars", 1, 5));
        assert_eq!(
            result.to_string(),
            "name: Field 'name' is required; stars: Field 'stars' must be between 1 and 5"
        );
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let mut result = ValidationResult::success();
        result.add_warning(FieldWarning::new("page_size", "large pages render slowly", "PERFORMANCE"));
        assert!(result.is_valid());
        assert!(result.into_result().is_ok());
    }
}
