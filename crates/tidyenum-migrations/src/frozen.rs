//! Frozen field state.
//!
//! A [`FieldTriple`] is a field reduced to its class path, positional args,
//! and keyword args, with every value written as a source literal. A
//! [`FrozenModel`] groups the triples of one model and round-trips through
//! JSON in memory. Persisting it is left to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tidyenum_core::{TidyEnumError, TidyEnumResult};

/// A frozen field: `(class_path, args, kwargs)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTriple {
    /// Dotted class path, e.g. `tidyenum.fields.EnumCharField`.
    pub class_path: String,
    /// Positional arguments as literals.
    #[serde(default)]
    pub args: Vec<String>,
    /// Keyword arguments as literals, e.g. `"default" => "2"`.
    #[serde(default)]
    pub kwargs: BTreeMap<String, String>,
}

impl FieldTriple {
    /// Creates a triple with no arguments.
    pub fn new(class_path: impl Into<String>) -> Self {
        Self {
            class_path: class_path.into(),
            args: Vec::new(),
            kwargs: BTreeMap::new(),
        }
    }

    /// Returns the literal for a keyword argument.
    pub fn kwarg(&self, name: &str) -> Option<&str> {
        self.kwargs.get(name).map(String::as_str)
    }
}

/// The frozen fields of one model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrozenModel {
    /// The model name, e.g. `shop.Order`.
    pub name: String,
    /// Frozen fields keyed by attribute name.
    pub fields: BTreeMap<String, FieldTriple>,
}

impl FrozenModel {
    /// Creates an empty frozen model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds a frozen field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, triple: FieldTriple) -> Self {
        self.fields.insert(name.into(), triple);
        self
    }

    /// Serializes the model to pretty JSON.
    pub fn to_json(&self) -> TidyEnumResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TidyEnumError::SerializationError(format!("Failed to serialize frozen model: {e}"))
        })
    }

    /// Deserializes a model from JSON.
    pub fn from_json(json: &str) -> TidyEnumResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            TidyEnumError::SerializationError(format!("Failed to deserialize frozen model: {e}"))
        })
    }
}
