//! Value normalization against a labelled enum.
//!
//! [`resolve`] runs an ordered chain of fallible steps and returns the first
//! member any of them produces. When every step fails the input is returned
//! unchanged: a value with no matching member (e.g. a legacy row) is never an
//! error at this layer.

use crate::enums::{EnumMember, EnumType, LabelledEnum, ResolutionError};
use crate::value::Value;

/// A value as seen by application code: an enum member or a raw primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A resolved enum member.
    Member(EnumMember),
    /// A primitive that did not resolve (or was never resolved).
    Raw(Value),
}

impl FieldValue {
    /// The primitive representation: the member's stored value, or the raw value.
    pub const fn primitive(&self) -> &Value {
        match self {
            Self::Member(m) => &m.value,
            Self::Raw(v) => v,
        }
    }

    /// Consumes `self`, returning the primitive representation.
    pub fn into_primitive(self) -> Value {
        match self {
            Self::Member(m) => m.value,
            Self::Raw(v) => v,
        }
    }

    /// Returns the member, if resolved.
    pub const fn as_member(&self) -> Option<&EnumMember> {
        match self {
            Self::Member(m) => Some(m),
            Self::Raw(_) => None,
        }
    }

    /// Returns `true` if this is a resolved member.
    pub const fn is_member(&self) -> bool {
        matches!(self, Self::Member(_))
    }

    /// Recovers the typed member, if this is a member of `E`.
    pub fn member_as<E: LabelledEnum>(&self) -> Option<E> {
        self.as_member().and_then(|m| E::from_member(m).ok())
    }
}

impl From<Value> for FieldValue {
    fn from(v: Value) -> Self {
        Self::Raw(v)
    }
}

impl From<EnumMember> for FieldValue {
    fn from(m: EnumMember) -> Self {
        Self::Member(m)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Raw(Value::Int(v))
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Raw(Value::from(v))
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Raw(Value::from(v))
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Raw(Value::String(v))
    }
}

type Step = fn(&EnumType, &FieldValue) -> Result<EnumMember, ResolutionError>;

/// The resolution chain, in order.
const CHAIN: [(&str, Step); 4] = [
    ("member_name", by_member_name),
    ("instance", by_instance),
    ("coerced_primitive", by_coerced_primitive),
    ("direct_value", by_direct_value),
];

/// Resolves `value` against `enum_type`, falling back to the input.
pub fn resolve(enum_type: &EnumType, value: FieldValue) -> FieldValue {
    for (step, attempt) in CHAIN {
        match attempt(enum_type, &value) {
            Ok(member) => return FieldValue::Member(member),
            Err(err) => {
                tracing::trace!(enum_name = enum_type.name(), step, %err, "resolution step failed");
            }
        }
    }
    value
}

/// Resolves by direct construction only: a member of the enum, or a member
/// with an equal primitive value. Used for defaults at construction time.
pub fn resolve_direct(enum_type: &EnumType, value: FieldValue) -> FieldValue {
    match by_instance(enum_type, &value).or_else(|_| by_direct_value(enum_type, &value)) {
        Ok(member) => FieldValue::Member(member),
        Err(err) => {
            tracing::debug!(enum_name = enum_type.name(), %err, "default kept unresolved");
            value
        }
    }
}

/// Splits `Enum.MEMBER` or `MEMBER` text into its bare member name.
///
/// Text with more than one `.`, an empty qualifier, or an empty name does not
/// have the member-name shape.
fn member_name(text: &str) -> Option<&str> {
    let name = match text.split_once('.') {
        None => text,
        Some((qualifier, name)) => {
            if qualifier.is_empty() || name.contains('.') {
                return None;
            }
            name
        }
    };
    (!name.is_empty()).then_some(name)
}

fn by_member_name(enum_type: &EnumType, value: &FieldValue) -> Result<EnumMember, ResolutionError> {
    let FieldValue::Raw(Value::String(text)) = value else {
        return Err(ResolutionError::NotApplicable("not text".to_string()));
    };
    let name = member_name(text).ok_or_else(|| {
        ResolutionError::NotApplicable(format!("{text:?} is not shaped like a member name"))
    })?;
    enum_type.member_by_name(name).cloned()
}

fn by_instance(enum_type: &EnumType, value: &FieldValue) -> Result<EnumMember, ResolutionError> {
    match value {
        FieldValue::Member(m) if enum_type.contains(m) => Ok(m.clone()),
        FieldValue::Member(m) => Err(ResolutionError::ForeignMember {
            member: m.qualified_name(),
            found: m.enum_name,
            expected: enum_type.name(),
        }),
        FieldValue::Raw(_) => Err(ResolutionError::NotApplicable("not a member".to_string())),
    }
}

fn by_coerced_primitive(
    enum_type: &EnumType,
    value: &FieldValue,
) -> Result<EnumMember, ResolutionError> {
    let coerced = enum_type.coerce(value.primitive())?;
    enum_type.member_by_value(&coerced).cloned()
}

fn by_direct_value(enum_type: &EnumType, value: &FieldValue) -> Result<EnumMember, ResolutionError> {
    enum_type.member_by_value(value.primitive()).cloned()
}
