//! Enum-backed model fields.
//!
//! [`EnumField`] wraps a base [`Field`] and converts between labelled enum
//! members and the base's primitive column values. Values going to storage
//! are always primitives; values coming back resolve to members when a member
//! matches and pass through otherwise.
//!
//! ```
//! use tidyenum_db::enums::{EnumType, PrimitiveKind};
//! use tidyenum_db::fields::{EnumIntegerField, FieldValue};
//! use tidyenum_db::value::Value;
//!
//! let status = EnumType::new(
//!     "Status",
//!     PrimitiveKind::Integer,
//!     [("ACTIVE", Value::Int(1), "Active"), ("DONE", Value::Int(2), "Done")],
//! );
//! let field = EnumIntegerField::builder("status").with_enum(status).build();
//!
//! assert_eq!(field.default_value(), Some(Value::Int(1)));
//! assert!(field.to_python("Status.DONE").is_member());
//! assert_eq!(field.to_python(99), FieldValue::Raw(Value::Int(99)));
//! assert_eq!(field.get_prep_value("Status.DONE").unwrap(), Value::Int(2));
//! ```

use std::marker::PhantomData;

use tidyenum_core::logging::field_span;
use tidyenum_core::TidyEnumResult;

use crate::enums::{EnumType, LabelledEnum};
use crate::fields::base::{CharField, Field, IntegerField};
use crate::fields::resolve::{resolve, resolve_direct, FieldValue};
use crate::fields::types::{FieldDef, FieldType};
use crate::validators::Validator;
use crate::value::Value;

/// Module path the enum field classes are published under.
pub const FIELDS_MODULE: &str = "tidyenum.fields";

/// A text field whose values are labelled enum members.
pub type EnumCharField = EnumField<CharField>;

/// An integer field whose values are labelled enum members.
pub type EnumIntegerField = EnumField<IntegerField>;

/// A model field adapter that stores labelled enum members as primitives.
///
/// Without an enum the adapter behaves exactly like its base field.
#[derive(Debug)]
pub struct EnumField<F: Field> {
    base: F,
    enum_type: Option<EnumType>,
    default: Option<FieldValue>,
}

impl<F: Field> EnumField<F> {
    /// Starts building an enum field with the given attribute name.
    pub fn builder(name: &'static str) -> EnumFieldBuilder<F> {
        EnumFieldBuilder {
            def: FieldDef::new(name, F::FIELD_TYPE),
            enum_type: None,
            default: None,
            _base: PhantomData,
        }
    }

    /// The fully qualified class path, e.g. `tidyenum.fields.EnumCharField`.
    pub fn class_path() -> String {
        format!("{FIELDS_MODULE}.Enum{}", F::CLASS_NAME)
    }

    /// The wrapped base field.
    pub const fn base(&self) -> &F {
        &self.base
    }

    /// The field definition of the wrapped base field.
    pub fn field_def(&self) -> &FieldDef {
        self.base.def()
    }

    /// The configured enum, if any.
    pub const fn enum_type(&self) -> Option<&EnumType> {
        self.enum_type.as_ref()
    }

    /// The effective choices.
    pub fn choices(&self) -> Option<&[(Value, String)]> {
        self.base.def().choices.as_deref()
    }

    /// The default as configured: a member, or a raw value that did not resolve.
    pub const fn default(&self) -> Option<&FieldValue> {
        self.default.as_ref()
    }

    /// The default reduced to its primitive value.
    pub fn default_value(&self) -> Option<Value> {
        self.default.as_ref().map(|d| d.primitive().clone())
    }

    /// The default in primitive form, as recorded in frozen migration state.
    pub fn migration_default(&self) -> Option<Value> {
        self.default_value()
    }

    /// The SQL column type of the base field.
    pub fn db_type(&self) -> String {
        self.base.db_type()
    }

    /// Normalizes a value to an enum member where one matches.
    ///
    /// Never fails: with no enum configured, or when nothing matches, the
    /// input is returned unchanged.
    pub fn to_python(&self, value: impl Into<FieldValue>) -> FieldValue {
        let value = value.into();
        match &self.enum_type {
            Some(enum_type) => resolve(enum_type, value),
            None => value,
        }
    }

    /// Converts a value loaded from storage.
    pub fn from_db_value(&self, value: Value) -> FieldValue {
        self.to_python(value)
    }

    /// Prepares a value for storage.
    ///
    /// The value is normalized, reduced to its primitive, and handed to the
    /// base field. Only the base field's own conversion errors propagate.
    pub fn get_prep_value(&self, value: impl Into<FieldValue>) -> TidyEnumResult<Value> {
        let primitive = self.to_python(value).into_primitive();
        self.base.get_prep_value(primitive)
    }

    /// Normalizes and validates a value.
    ///
    /// Validation runs on the primitive against the base field (null/blank,
    /// choices, validators). On success the normalized value is returned.
    pub fn clean(&self, value: impl Into<FieldValue>) -> TidyEnumResult<FieldValue> {
        let normalized = self.to_python(value);
        let cleaned = self.base.clean(normalized.primitive().clone())?;
        Ok(match normalized {
            FieldValue::Member(member) => FieldValue::Member(member),
            FieldValue::Raw(_) => FieldValue::Raw(cleaned),
        })
    }

    /// Normalizes a value and recovers the typed member.
    pub fn to_member<E: LabelledEnum>(&self, value: impl Into<FieldValue>) -> Option<E> {
        self.to_python(value).member_as::<E>()
    }
}

/// Builder for [`EnumField`].
///
/// Accepts the usual field options plus the enum. Explicit `choices` and
/// `default` take precedence over the ones derived from the enum.
#[derive(Debug)]
pub struct EnumFieldBuilder<F: Field> {
    def: FieldDef,
    enum_type: Option<EnumType>,
    default: Option<FieldValue>,
    _base: PhantomData<fn() -> F>,
}

impl<F: Field> EnumFieldBuilder<F> {
    /// Sets the labelled enum from a typed enum.
    #[must_use]
    pub fn enum_type<E: LabelledEnum>(self) -> Self {
        self.with_enum(E::enum_type())
    }

    /// Sets the labelled enum from a runtime descriptor.
    #[must_use]
    pub fn with_enum(mut self, enum_type: EnumType) -> Self {
        self.enum_type = Some(enum_type);
        self
    }

    /// Sets the default: a raw primitive or an enum member.
    #[must_use]
    pub fn default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets explicit choices.
    #[must_use]
    pub fn choices(mut self, choices: Vec<(Value, String)>) -> Self {
        self.def = self.def.choices(choices);
        self
    }

    /// Sets the database column name.
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.def = self.def.column(column);
        self
    }

    /// Sets the maximum character length.
    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.def = self.def.max_length(max_length);
        self
    }

    /// Allows NULL values in the database.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.def = self.def.nullable();
        self
    }

    /// Allows the field to be left blank in forms.
    #[must_use]
    pub fn blank(mut self) -> Self {
        self.def = self.def.blank();
        self
    }

    /// Marks this field as having a UNIQUE constraint.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.def = self.def.unique();
        self
    }

    /// Marks this field as having a database index.
    #[must_use]
    pub fn db_index(mut self) -> Self {
        self.def = self.def.db_index();
        self
    }

    /// Sets the verbose (human-readable) name.
    #[must_use]
    pub fn verbose_name(mut self, name: impl Into<String>) -> Self {
        self.def = self.def.verbose_name(name);
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.def = self.def.help_text(text);
        self
    }

    /// Sets whether the field is editable in forms.
    #[must_use]
    pub fn editable(mut self, editable: bool) -> Self {
        self.def = self.def.editable(editable);
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: Box<dyn Validator>) -> Self {
        self.def = self.def.validator(validator);
        self
    }

    /// Builds the field. Never fails.
    pub fn build(self) -> EnumField<F> {
        let Self {
            mut def,
            enum_type,
            default,
            _base,
        } = self;
        let _span = field_span(def.name).entered();

        let default = match (&enum_type, default) {
            (Some(enum_type), Some(explicit)) => Some(resolve_direct(enum_type, explicit)),
            (Some(enum_type), None) => enum_type.first().cloned().map(FieldValue::Member),
            (None, explicit) => explicit,
        };

        if let Some(enum_type) = &enum_type {
            if def.choices.is_none() {
                def.choices = Some(enum_type.choices());
            }
            // Text columns are bounded by the longest member value.
            if F::FIELD_TYPE == FieldType::CharField && def.max_length.is_none() {
                def.max_length = enum_type
                    .members()
                    .iter()
                    .map(|m| m.value.to_text().chars().count())
                    .max();
            }
            tracing::debug!(
                enum_name = enum_type.name(),
                members = enum_type.members().len(),
                "built enum field"
            );
        }

        def.default = default.as_ref().map(|d| d.primitive().clone());

        EnumField {
            base: F::from_def(def),
            enum_type,
            default,
        }
    }
}
