//! Form field definitions and type-level validation.
//!
//! Each [`FormFieldDef`] describes a single form field, including its type,
//! validators, widget, and metadata. [`clean_field_value`] dispatches on
//! [`FormFieldType`] to coerce raw submitted text into a [`Value`].

use std::collections::HashMap;

use tidyenum_core::TidyEnumError;
use tidyenum_db::validators::{MaxLengthValidator, MaxValueValidator, MinValueValidator, Validator};
use tidyenum_db::value::Value;

use crate::widgets::WidgetType;

/// The label shown for the empty choice of an optional choice field.
pub const BLANK_CHOICE_LABEL: &str = "---------";

/// Defines the type of a form field, including type-specific parameters.
#[derive(Debug, Clone)]
pub enum FormFieldType {
    /// A character (string) field.
    Char {
        /// Maximum length (characters).
        max_length: Option<usize>,
        /// Whether to strip leading/trailing whitespace.
        strip: bool,
    },
    /// An integer field.
    Integer {
        /// Minimum allowed value.
        min_value: Option<i64>,
        /// Maximum allowed value.
        max_value: Option<i64>,
    },
    /// A choice field with a coercion function.
    TypedChoice {
        /// Available choices as `(value, display_label)` pairs.
        choices: Vec<(String, String)>,
        /// Coerces the submitted choice into a `Value`.
        coerce: fn(&str) -> Result<Value, TidyEnumError>,
    },
}

/// Complete definition of a form field.
#[derive(Debug)]
pub struct FormFieldDef {
    /// The field name (HTML name attribute).
    pub name: String,
    /// The field type, controlling parsing and coercion.
    pub field_type: FormFieldType,
    /// Whether this field is required.
    pub required: bool,
    /// Initial value, always a primitive.
    pub initial: Option<Value>,
    /// Help text displayed alongside the field.
    pub help_text: String,
    /// Human-readable label.
    pub label: String,
    /// The widget type used for rendering.
    pub widget: WidgetType,
    /// Additional validators applied after type coercion.
    pub validators: Vec<Box<dyn Validator>>,
    /// Custom error messages keyed by error code.
    pub error_messages: HashMap<String, String>,
    /// Whether the field is disabled (rendered but not editable).
    pub disabled: bool,
}

impl FormFieldDef {
    /// Creates a new `FormFieldDef` with sensible defaults.
    ///
    /// The field is required by default and uses the default widget for its
    /// type.
    pub fn new(name: impl Into<String>, field_type: FormFieldType) -> Self {
        let name = name.into();
        let widget = default_widget_for_field_type(&field_type);
        let label = name.replace('_', " ");
        Self {
            name,
            field_type,
            required: true,
            initial: None,
            help_text: String::new(),
            label,
            widget,
            validators: Vec::new(),
            error_messages: HashMap::new(),
            disabled: false,
        }
    }

    /// Sets whether this field is required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn initial(mut self, value: Value) -> Self {
        self.initial = Some(value);
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the widget type.
    #[must_use]
    pub const fn widget(mut self, widget: WidgetType) -> Self {
        self.widget = widget;
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: Box<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Sets a custom error message for a given code.
    #[must_use]
    pub fn error_message(mut self, code: impl Into<String>, msg: impl Into<String>) -> Self {
        self.error_messages.insert(code.into(), msg.into());
        self
    }

    /// Sets whether this field is disabled.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// The choices offered by a choice field, if any.
    pub fn choices(&self) -> Option<&[(String, String)]> {
        match &self.field_type {
            FormFieldType::TypedChoice { choices, .. } => Some(choices),
            _ => None,
        }
    }
}

/// Returns the default widget type for a given form field type.
pub const fn default_widget_for_field_type(field_type: &FormFieldType) -> WidgetType {
    match field_type {
        FormFieldType::Char { .. } => WidgetType::TextInput,
        FormFieldType::Integer { .. } => WidgetType::NumberInput,
        FormFieldType::TypedChoice { .. } => WidgetType::Select,
    }
}

/// Cleans (validates and coerces) a raw form input string into a `Value`.
///
/// An empty required field fails with the `required` message. An empty
/// optional field cleans to its initial value, or `Null`. Otherwise the input
/// is coerced for the field type and the field's validators run on the result.
pub fn clean_field_value(field: &FormFieldDef, raw: Option<&str>) -> Result<Value, Vec<String>> {
    let raw = raw.unwrap_or("");
    if raw.is_empty() {
        if field.required {
            let message = field.message("required", || "This field is required.".to_string());
            return Err(vec![message]);
        }
        return Ok(field.initial.clone().unwrap_or(Value::Null));
    }

    let value = match &field.field_type {
        FormFieldType::Char { max_length, strip } => clean_char(raw, *max_length, *strip),
        FormFieldType::Integer {
            min_value,
            max_value,
        } => clean_integer(raw, *min_value, *max_value),
        FormFieldType::TypedChoice { choices, coerce } => {
            if choices.iter().any(|(key, _)| key == raw) {
                coerce(raw).map_err(|_| "Invalid value.".to_string())
            } else {
                Err(field.message("invalid_choice", || {
                    format!("Select a valid choice. {raw} is not one of the available choices.")
                }))
            }
        }
    }
    .map_err(|e| vec![e])?;

    let errors: Vec<String> = field
        .validators
        .iter()
        .filter_map(|v| v.validate(&value).err())
        .map(|e| message_of(&e))
        .collect();
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(errors)
    }
}

impl FormFieldDef {
    fn message(&self, code: &str, fallback: impl FnOnce() -> String) -> String {
        self.error_messages
            .get(code)
            .cloned()
            .unwrap_or_else(fallback)
    }
}

fn clean_char(raw: &str, max_length: Option<usize>, strip: bool) -> Result<Value, String> {
    let value = Value::String(if strip { raw.trim() } else { raw }.to_string());
    if let Some(max) = max_length {
        MaxLengthValidator::new(max)
            .validate(&value)
            .map_err(|e| message_of(&e))?;
    }
    Ok(value)
}

fn clean_integer(raw: &str, min: Option<i64>, max: Option<i64>) -> Result<Value, String> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map(Value::Int)
        .map_err(|_| "Enter a whole number.".to_string())?;
    if let Some(min) = min {
        MinValueValidator::new(min)
            .validate(&value)
            .map_err(|e| message_of(&e))?;
    }
    if let Some(max) = max {
        MaxValueValidator::new(max)
            .validate(&value)
            .map_err(|e| message_of(&e))?;
    }
    Ok(value)
}

/// The user-facing message of an error, without the error kind prefix.
fn message_of(err: &TidyEnumError) -> String {
    match err {
        TidyEnumError::ValidationError(v) => v.message.clone(),
        other => other.to_string(),
    }
}
