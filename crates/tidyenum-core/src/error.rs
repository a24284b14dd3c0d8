//! Core error types for tidyenum.
//!
//! [`TidyEnumError`] covers the failures that can escape the field layer:
//! validation of primitive values by a base field, configuration loading,
//! serialization of frozen migration state, and introspection lookups.
//! Failure to resolve a value to an enum member is *not* in this list; the
//! field adapter absorbs it and passes the value through.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// A validation error raised by a base field.
///
/// # Examples
///
/// ```
/// use tidyenum_core::error::ValidationError;
///
/// let err = ValidationError::new("Enter a whole number.", "invalid")
///     .with_param("value", "abc");
/// assert_eq!(err.code, "invalid");
/// assert_eq!(err.to_string(), "Enter a whole number.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the failure (e.g. "required", "invalid_choice").
    pub code: String,
    /// Additional parameters providing context for the message.
    pub params: HashMap<String, String>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
        }
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for tidyenum.
#[derive(Error, Debug)]
pub enum TidyEnumError {
    /// A value was rejected by a base field's conversion or validation.
    #[error("Validation error: {0}")]
    ValidationError(ValidationError),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Frozen field state could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A field could not be introspected for migrations.
    #[error("Introspection error: {0}")]
    IntrospectionError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<ValidationError> for TidyEnumError {
    fn from(err: ValidationError) -> Self {
        Self::ValidationError(err)
    }
}

impl TidyEnumError {
    /// Returns the validation error code, if this is a validation error.
    pub fn validation_code(&self) -> Option<&str> {
        match self {
            Self::ValidationError(e) => Some(e.code.as_str()),
            _ => None,
        }
    }
}

/// A convenience type alias for `Result<T, TidyEnumError>`.
pub type TidyEnumResult<T> = Result<T, TidyEnumError>;
