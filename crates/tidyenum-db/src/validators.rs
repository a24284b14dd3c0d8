//! Field validators.
//!
//! Validators run against the primitive value of a field after conversion.
//! Base fields attach the ones implied by their options (e.g. a
//! [`MaxLengthValidator`] for a text field with `max_length`).

use std::fmt;

use tidyenum_core::{TidyEnumError, ValidationError};

use crate::value::Value;

/// A trait for validating field values.
///
/// # Examples
///
/// ```
/// use tidyenum_db::validators::{MaxLengthValidator, Validator};
/// use tidyenum_db::value::Value;
///
/// let v = MaxLengthValidator::new(5);
/// assert!(v.validate(&Value::String("done".into())).is_ok());
/// assert!(v.validate(&Value::String("archived".into())).is_err());
/// ```
pub trait Validator: Send + Sync + fmt::Debug {
    /// Validates the given value, returning an error if invalid.
    fn validate(&self, value: &Value) -> Result<(), TidyEnumError>;

    /// Returns a human-readable name for this validator.
    fn name(&self) -> &str;
}

/// Validates that a string value does not exceed a maximum length.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    /// The maximum allowed length, in characters.
    pub max_length: usize,
}

impl MaxLengthValidator {
    /// Creates a new `MaxLengthValidator` with the given maximum length.
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &Value) -> Result<(), TidyEnumError> {
        if let Value::String(s) = value {
            let len = s.chars().count();
            if len > self.max_length {
                return Err(ValidationError::new(
                    format!(
                        "Ensure this value has at most {} characters (it has {len}).",
                        self.max_length
                    ),
                    "max_length",
                )
                .with_param("limit_value", self.max_length.to_string())
                .into());
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MaxLengthValidator"
    }
}

/// Validates that an integer value is at least a minimum.
#[derive(Debug, Clone)]
pub struct MinValueValidator {
    /// The minimum allowed value.
    pub min_value: i64,
}

impl MinValueValidator {
    /// Creates a new `MinValueValidator`.
    pub const fn new(min_value: i64) -> Self {
        Self { min_value }
    }
}

impl Validator for MinValueValidator {
    fn validate(&self, value: &Value) -> Result<(), TidyEnumError> {
        if let Value::Int(n) = value {
            if *n < self.min_value {
                return Err(ValidationError::new(
                    format!(
                        "Ensure this value is greater than or equal to {}.",
                        self.min_value
                    ),
                    "min_value",
                )
                .into());
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MinValueValidator"
    }
}

/// Validates that an integer value is at most a maximum.
#[derive(Debug, Clone)]
pub struct MaxValueValidator {
    /// The maximum allowed value.
    pub max_value: i64,
}

impl MaxValueValidator {
    /// Creates a new `MaxValueValidator`.
    pub const fn new(max_value: i64) -> Self {
        Self { max_value }
    }
}

impl Validator for MaxValueValidator {
    fn validate(&self, value: &Value) -> Result<(), TidyEnumError> {
        if let Value::Int(n) = value {
            if *n > self.max_value {
                return Err(ValidationError::new(
                    format!(
                        "Ensure this value is less than or equal to {}.",
                        self.max_value
                    ),
                    "max_value",
                )
                .into());
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MaxValueValidator"
    }
}
