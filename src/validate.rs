//! Option value validators
//!
//! Checks run on single option values before they reach the merge.

use std::fmt;

use serde_json::Value;

/// Placeholder the entity name is substituted into
pub const NAME_PLACEHOLDER: &str = "{}";

/// Option value validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Naming pattern must contain {{}}")]
    InvalidNamePattern,

    #[error("Value is not a number")]
    NotANumber,
}

/// Validate that a naming pattern contains `{}`
pub fn validate_name_pattern(value: &str) -> Result<&str, ValidationError> {
    if value.contains(NAME_PLACEHOLDER) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidNamePattern)
    }
}

/// Validate that a string holds a finite number, e.g. `"12"`, `" 0.5 "`,
/// `"1e3"`, `"1_000"`
pub fn validate_is_number(value: &str) -> Result<&str, ValidationError> {
    parse_number(value).map(|_| value)
}

/// Parse a numeric literal. Single underscores are allowed between digits.
fn parse_number(value: &str) -> Result<f64, ValidationError> {
    let trimmed = value.trim();
    let bytes = trimmed.as_bytes();
    let mut digits = String::with_capacity(trimmed.len());
    for (i, c) in trimmed.char_indices() {
        if c == '_' {
            let between_digits = i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
            if !between_digits {
                return Err(ValidationError::NotANumber);
            }
        } else {
            digits.push(c);
        }
    }

    match digits.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(ValidationError::NotANumber),
    }
}

/// Same as [`validate_is_number`] for an option value that may already be
/// a JSON number
pub fn validate_number_value(value: &Value) -> Result<f64, ValidationError> {
    match value {
        Value::Number(number) => number.as_f64().ok_or(ValidationError::NotANumber),
        Value::String(s) => parse_number(s),
        _ => Err(ValidationError::NotANumber),
    }
}

/// A naming pattern such as `{} power`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern(String);

impl NamePattern {
    pub fn parse(pattern: &str) -> Result<Self, ValidationError> {
        validate_name_pattern(pattern).map(|p| Self(p.to_string()))
    }

    /// Substitute `name` into the pattern
    pub fn apply(&self, name: &str) -> String {
        self.0.replace(NAME_PLACEHOLDER, name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
