//! Form field generation from model fields.
//!
//! [`FormFieldFactory::formfield`] maps a model field to a [`FormFieldDef`]:
//! fields with choices become [`FormFieldType::TypedChoice`], others map by
//! column type. The model default becomes the form's initial value unless an
//! explicit initial is given.

use tidyenum_core::{TidyEnumError, ValidationError};
use tidyenum_db::enums::PrimitiveKind;
use tidyenum_db::fields::{
    CharField, EnumField, Field, FieldDef, FieldType, FieldValue, IntegerField, INTEGER_MAX,
    INTEGER_MIN,
};
use tidyenum_db::value::Value;

use crate::fields::{FormFieldDef, FormFieldType, BLANK_CHOICE_LABEL};
use crate::widgets::WidgetType;

/// Per-call overrides for [`FormFieldFactory::formfield`].
#[derive(Debug, Clone, Default)]
pub struct FormFieldOverrides {
    /// Initial value. Enum fields accept members, names, or primitives.
    pub initial: Option<FieldValue>,
    /// Whether the form field is required.
    pub required: Option<bool>,
    /// Label, instead of the model field's verbose name.
    pub label: Option<String>,
    /// Help text, instead of the model field's.
    pub help_text: Option<String>,
    /// Widget, instead of the default for the form field type.
    pub widget: Option<WidgetType>,
}

impl FormFieldOverrides {
    /// Creates empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial value.
    #[must_use]
    pub fn initial(mut self, value: impl Into<FieldValue>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Sets whether the field is required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Sets the widget.
    #[must_use]
    pub const fn widget(mut self, widget: WidgetType) -> Self {
        self.widget = Some(widget);
        self
    }
}

/// Builds the form field for a model field.
pub trait FormFieldFactory {
    /// Returns the form field definition, with `overrides` applied.
    fn formfield(&self, overrides: FormFieldOverrides) -> FormFieldDef;
}

impl FormFieldFactory for CharField {
    fn formfield(&self, overrides: FormFieldOverrides) -> FormFieldDef {
        model_formfield(self.def(), overrides)
    }
}

impl FormFieldFactory for IntegerField {
    fn formfield(&self, overrides: FormFieldOverrides) -> FormFieldDef {
        model_formfield(self.def(), overrides)
    }
}

impl<F> FormFieldFactory for EnumField<F>
where
    F: Field + FormFieldFactory,
{
    /// Normalizes `initial` to its primitive, then delegates to the base.
    fn formfield(&self, mut overrides: FormFieldOverrides) -> FormFieldDef {
        if let Some(initial) = overrides.initial.take() {
            let primitive = self.to_python(initial).into_primitive();
            tracing::trace!(field = self.field_def().name, initial = %primitive, "normalized form initial");
            overrides.initial = Some(FieldValue::Raw(primitive));
        }
        self.base().formfield(overrides)
    }
}

fn model_formfield(def: &FieldDef, overrides: FormFieldOverrides) -> FormFieldDef {
    let FormFieldOverrides {
        initial,
        required,
        label,
        help_text,
        widget,
    } = overrides;

    let field_type = match &def.choices {
        Some(choices) => {
            let include_blank = def.blank || !(def.has_default() || initial.is_some());
            let mut options = Vec::with_capacity(choices.len() + 1);
            if include_blank {
                options.push((String::new(), BLANK_CHOICE_LABEL.to_string()));
            }
            options.extend(
                choices
                    .iter()
                    .map(|(value, label)| (value.to_string(), label.clone())),
            );
            FormFieldType::TypedChoice {
                choices: options,
                coerce: coerce_for(def.field_type.primitive_kind()),
            }
        }
        None => match def.field_type {
            FieldType::CharField => FormFieldType::Char {
                max_length: def.max_length,
                strip: true,
            },
            FieldType::IntegerField => FormFieldType::Integer {
                min_value: Some(INTEGER_MIN),
                max_value: Some(INTEGER_MAX),
            },
        },
    };

    let mut field = FormFieldDef::new(def.name, field_type);
    // Required unless nullable, blank, or defaulted.
    field.required = required.unwrap_or(!def.null && !def.blank && def.default.is_none());
    field.label = label.unwrap_or_else(|| def.verbose_name.clone());
    field.help_text = help_text.unwrap_or_else(|| def.help_text.clone());
    if let Some(widget) = widget {
        field.widget = widget;
    }
    field.initial = initial
        .map(FieldValue::into_primitive)
        .or_else(|| def.default.clone());
    field.disabled = !def.editable;
    field
}

const fn coerce_for(kind: PrimitiveKind) -> fn(&str) -> Result<Value, TidyEnumError> {
    match kind {
        PrimitiveKind::Text => coerce_text,
        PrimitiveKind::Integer => coerce_integer,
    }
}

#[allow(clippy::unnecessary_wraps)]
fn coerce_text(raw: &str) -> Result<Value, TidyEnumError> {
    Ok(Value::String(raw.to_string()))
}

fn coerce_integer(raw: &str) -> Result<Value, TidyEnumError> {
    PrimitiveKind::Integer
        .coerce(&Value::from(raw))
        .map_err(|e| ValidationError::new(e.to_string(), "invalid").into())
}
