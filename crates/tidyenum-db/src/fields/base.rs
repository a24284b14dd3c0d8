//! Base model fields.
//!
//! [`Field`] is the persistence surface an enum field adapter wraps: value
//! conversion, storage preparation, validation, and column typing. The two
//! concrete bases are [`CharField`] (bounded text) and [`IntegerField`].

use std::fmt;

use tidyenum_core::{TidyEnumError, TidyEnumResult, ValidationError};

use crate::enums::PrimitiveKind;
use crate::fields::types::{FieldDef, FieldType};
use crate::validators::{MaxLengthValidator, MaxValueValidator, MinValueValidator, Validator};
use crate::value::Value;

/// A primitive model field.
pub trait Field: Send + Sync + fmt::Debug {
    /// The class name, e.g. `CharField`.
    const CLASS_NAME: &'static str;

    /// The column type this field declares.
    const FIELD_TYPE: FieldType;

    /// Builds the field from its definition.
    fn from_def(def: FieldDef) -> Self
    where
        Self: Sized;

    /// The field definition.
    fn def(&self) -> &FieldDef;

    /// Converts an input value to this field's primitive type.
    fn to_python(&self, value: Value) -> TidyEnumResult<Value>;

    /// Prepares a value for storage.
    fn get_prep_value(&self, value: Value) -> TidyEnumResult<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        self.to_python(value)
    }

    /// The primitive kind stored by this field.
    fn primitive_kind(&self) -> PrimitiveKind {
        Self::FIELD_TYPE.primitive_kind()
    }

    /// The SQL column type.
    fn db_type(&self) -> String {
        Self::FIELD_TYPE.column_type(self.def().max_length)
    }

    /// Checks null/blank constraints and choice membership.
    fn validate(&self, value: &Value) -> TidyEnumResult<()> {
        let def = self.def();
        if !def.editable {
            return Ok(());
        }

        if let Some(choices) = &def.choices {
            if !value.is_empty() && !choices.iter().any(|(choice, _)| choice == value) {
                return Err(ValidationError::new(
                    format!("Value {} is not a valid choice.", value.to_literal()),
                    "invalid_choice",
                )
                .with_param("value", value.to_string())
                .into());
            }
        }

        if value.is_null() && !def.null {
            return Err(ValidationError::new("This field cannot be null.", "null").into());
        }

        if !def.blank && value.is_empty() && !value.is_null() {
            return Err(ValidationError::new("This field cannot be blank.", "blank").into());
        }

        Ok(())
    }

    /// Runs the field's validators against a non-empty value.
    fn run_validators(&self, value: &Value) -> TidyEnumResult<()> {
        if value.is_empty() {
            return Ok(());
        }
        for validator in &self.def().validators {
            validator.validate(value)?;
        }
        Ok(())
    }

    /// Converts, validates, and returns the cleaned value.
    fn clean(&self, value: Value) -> TidyEnumResult<Value> {
        let value = self.to_python(value)?;
        self.validate(&value)?;
        self.run_validators(&value)?;
        Ok(value)
    }
}

/// A bounded-length text field.
#[derive(Debug)]
pub struct CharField {
    def: FieldDef,
}

impl Field for CharField {
    const CLASS_NAME: &'static str = "CharField";
    const FIELD_TYPE: FieldType = FieldType::CharField;

    fn from_def(mut def: FieldDef) -> Self {
        def.field_type = Self::FIELD_TYPE;
        if let Some(max_length) = def.max_length {
            def.validators
                .push(Box::new(MaxLengthValidator::new(max_length)));
        }
        Self { def }
    }

    fn def(&self) -> &FieldDef {
        &self.def
    }

    fn to_python(&self, value: Value) -> TidyEnumResult<Value> {
        Ok(match value {
            Value::Null => Value::Null,
            Value::String(s) => Value::String(s),
            other => Value::String(other.to_text()),
        })
    }
}

/// Smallest value an `INTEGER` column holds.
pub const INTEGER_MIN: i64 = -2_147_483_648;

/// Largest value an `INTEGER` column holds.
pub const INTEGER_MAX: i64 = 2_147_483_647;

/// A 32-bit integer field.
///
/// Values outside `INTEGER_MIN..=INTEGER_MAX` fail validation and are
/// refused by [`get_prep_value`](Field::get_prep_value).
#[derive(Debug)]
pub struct IntegerField {
    def: FieldDef,
}

impl IntegerField {
    fn check_range(value: &Value) -> TidyEnumResult<()> {
        MinValueValidator::new(INTEGER_MIN).validate(value)?;
        MaxValueValidator::new(INTEGER_MAX).validate(value)
    }

    fn invalid(value: &Value) -> TidyEnumError {
        ValidationError::new(format!("\u{201c}{value}\u{201d} value must be an integer."), "invalid")
            .with_param("value", value.to_string())
            .into()
    }
}

impl Field for IntegerField {
    const CLASS_NAME: &'static str = "IntegerField";
    const FIELD_TYPE: FieldType = FieldType::IntegerField;

    fn from_def(mut def: FieldDef) -> Self {
        def.field_type = Self::FIELD_TYPE;
        def.validators
            .push(Box::new(MinValueValidator::new(INTEGER_MIN)));
        def.validators
            .push(Box::new(MaxValueValidator::new(INTEGER_MAX)));
        Self { def }
    }

    fn def(&self) -> &FieldDef {
        &self.def
    }

    fn to_python(&self, value: Value) -> TidyEnumResult<Value> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Int(i) => Ok(Value::Int(i)),
            other => PrimitiveKind::Integer
                .coerce(&other)
                .map_err(|_| Self::invalid(&other)),
        }
    }

    fn get_prep_value(&self, value: Value) -> TidyEnumResult<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let value = self.to_python(value)?;
        Self::check_range(&value)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_choices() -> Vec<(Value, String)> {
        vec![
            (Value::from("draft"), "Draft".to_string()),
            (Value::from("live"), "Live".to_string()),
        ]
    }

    #[test]
    fn test_char_field_to_python_stringifies() {
        let f = CharField::from_def(FieldDef::new("code", FieldType::CharField));
        assert_eq!(f.to_python(Value::Int(3)).unwrap(), Value::String("3".into()));
        assert_eq!(f.to_python(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_char_field_prep_value() {
        let f = CharField::from_def(FieldDef::new("code", FieldType::CharField));
        assert_eq!(f.get_prep_value(Value::from("x")).unwrap(), Value::from("x"));
        assert_eq!(f.get_prep_value(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_char_field_db_type() {
        let f = CharField::from_def(FieldDef::new("code", FieldType::CharField).max_length(12));
        assert_eq!(f.db_type(), "VARCHAR(12)");
        assert_eq!(f.primitive_kind(), PrimitiveKind::Text);
    }

    #[test]
    fn test_char_field_max_length_validator_attached() {
        let f = CharField::from_def(FieldDef::new("code", FieldType::CharField).max_length(3));
        let err = f.clean(Value::from("toolong")).unwrap_err();
        assert_eq!(err.validation_code(), Some("max_length"));
    }

    #[test]
    fn test_integer_field_prep_value() {
        let f = IntegerField::from_def(FieldDef::new("rank", FieldType::IntegerField));
        assert_eq!(f.get_prep_value(Value::Int(2)).unwrap(), Value::Int(2));
        assert_eq!(f.get_prep_value(Value::from("2")).unwrap(), Value::Int(2));
        assert_eq!(f.get_prep_value(Value::Null).unwrap(), Value::Null);
        assert_eq!(f.db_type(), "INTEGER");
    }

    #[test]
    fn test_integer_field_rejects_text() {
        let f = IntegerField::from_def(FieldDef::new("rank", FieldType::IntegerField));
        let err = f.get_prep_value(Value::from("high")).unwrap_err();
        assert_eq!(err.validation_code(), Some("invalid"));
        assert!(err.to_string().contains("value must be an integer"));
    }

    #[test]
    fn test_integer_field_range() {
        let f = IntegerField::from_def(FieldDef::new("rank", FieldType::IntegerField));
        assert_eq!(f.def().validators.len(), 2);
        assert_eq!(f.get_prep_value(Value::Int(INTEGER_MAX)).unwrap(), Value::Int(INTEGER_MAX));
        assert_eq!(f.get_prep_value(Value::Int(INTEGER_MIN)).unwrap(), Value::Int(INTEGER_MIN));

        let err = f.get_prep_value(Value::Int(1 << 40)).unwrap_err();
        assert_eq!(err.validation_code(), Some("max_value"));
        let err = f.get_prep_value(Value::from("-3000000000")).unwrap_err();
        assert_eq!(err.validation_code(), Some("min_value"));
        assert_eq!(
            f.clean(Value::Int(INTEGER_MAX + 1)).unwrap_err().validation_code(),
            Some("max_value")
        );
    }

    #[test]
    fn test_from_def_forces_field_type() {
        let f = IntegerField::from_def(FieldDef::new("rank", FieldType::CharField));
        assert_eq!(f.def().field_type, FieldType::IntegerField);
    }

    #[test]
    fn test_validate_choices() {
        let f = CharField::from_def(
            FieldDef::new("status", FieldType::CharField).choices(status_choices()),
        );
        assert!(f.clean(Value::from("live")).is_ok());
        let err = f.clean(Value::from("gone")).unwrap_err();
        assert_eq!(err.validation_code(), Some("invalid_choice"));
        assert_eq!(
            err.to_string(),
            "Validation error: Value 'gone' is not a valid choice."
        );
    }

    #[test]
    fn test_validate_null_and_blank() {
        let f = CharField::from_def(FieldDef::new("status", FieldType::CharField));
        assert_eq!(
            f.clean(Value::Null).unwrap_err().validation_code(),
            Some("null")
        );
        assert_eq!(
            f.clean(Value::from("")).unwrap_err().validation_code(),
            Some("blank")
        );

        let lenient =
            CharField::from_def(FieldDef::new("status", FieldType::CharField).nullable().blank());
        assert!(lenient.clean(Value::Null).is_ok());
        assert!(lenient.clean(Value::from("")).is_ok());
    }

    #[test]
    fn test_non_editable_skips_validation() {
        let f = IntegerField::from_def(
            FieldDef::new("rank", FieldType::IntegerField)
                .choices(vec![(Value::Int(1), "One".into())])
                .editable(false),
        );
        assert_eq!(f.clean(Value::Int(5)).unwrap(), Value::Int(5));
    }
}
