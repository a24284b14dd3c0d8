//! The labelled enum contract.
//!
//! A labelled enum is a fieldless Rust enum whose variants each carry a
//! primitive storage value and a human-readable label. [`LabelledEnum`] is the
//! typed side of the contract (usually implemented with
//! `#[derive(LabelledEnum)]`); [`EnumType`] is the runtime descriptor the field
//! adapter works against, and [`EnumMember`] is one erased variant.
//!
//! Every lookup here is fallible with [`ResolutionError`]. Callers in the
//! field layer absorb those errors; they are never surfaced to applications
//! through field operations.

use std::fmt;

use thiserror::Error;

use crate::value::Value;

/// The primitive storage kind of an enum's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PrimitiveKind {
    /// Values are stored in a text column.
    Text,
    /// Values are stored in an integer column.
    Integer,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Integer => write!(f, "integer"),
        }
    }
}

impl PrimitiveKind {
    /// Coerces a value through this primitive type.
    ///
    /// Integer coercion accepts integers, booleans, finite floats (truncated
    /// toward zero) and text holding a base-10 integer. Text coercion renders
    /// any non-null primitive as text.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn coerce(self, value: &Value) -> Result<Value, ResolutionError> {
        let fail = || ResolutionError::Coercion {
            value: value.clone(),
            kind: self,
        };
        match (self, value) {
            (_, Value::Null) => Err(fail()),
            (Self::Integer, Value::Int(i)) => Ok(Value::Int(*i)),
            (Self::Integer, Value::Bool(b)) => Ok(Value::Int(i64::from(*b))),
            (Self::Integer, Value::Float(f)) => {
                let truncated = f.trunc();
                if truncated.is_finite()
                    && truncated >= i64::MIN as f64
                    && truncated <= i64::MAX as f64
                {
                    Ok(Value::Int(truncated as i64))
                } else {
                    Err(fail())
                }
            }
            (Self::Integer, Value::String(s)) => {
                s.trim().parse::<i64>().map(Value::Int).map_err(|_| fail())
            }
            (Self::Text, Value::String(s)) => Ok(Value::String(s.clone())),
            (Self::Text, other) => Ok(Value::String(other.to_text())),
        }
    }
}

/// Why a value could not be resolved to an enum member.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    /// No member has the given name.
    #[error("{enum_name} has no member named {name:?}")]
    UnknownName {
        /// The enum that was searched.
        enum_name: &'static str,
        /// The name that was looked up.
        name: String,
    },

    /// No member has the given primitive value.
    #[error("{value} is not a valid {enum_name}")]
    UnknownValue {
        /// The enum that was searched.
        enum_name: &'static str,
        /// The value that was looked up.
        value: Value,
    },

    /// The value cannot be converted to the enum's primitive kind.
    #[error("cannot coerce {value} to {kind}")]
    Coercion {
        /// The value that failed to convert.
        value: Value,
        /// The target primitive kind.
        kind: PrimitiveKind,
    },

    /// A member of one enum was offered where another enum was expected.
    #[error("{member} is a member of {found}, not {expected}")]
    ForeignMember {
        /// The qualified member name.
        member: String,
        /// The enum the member belongs to.
        found: &'static str,
        /// The enum that was expected.
        expected: &'static str,
    },

    /// The input does not have the shape this resolution step handles.
    #[error("{0}")]
    NotApplicable(String),
}

/// One variant of a labelled enum, erased to its name, value, and label.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EnumMember {
    /// The name of the enum this member belongs to.
    pub enum_name: &'static str,
    /// The member (variant) name, e.g. `ACTIVE`.
    pub name: &'static str,
    /// The primitive value stored in the database.
    pub value: Value,
    /// The human-readable label.
    pub label: &'static str,
}

impl EnumMember {
    /// Returns the qualified name, e.g. `Status.ACTIVE`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.enum_name, self.name)
    }
}

impl fmt::Display for EnumMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.enum_name, self.name)
    }
}

/// A typed labelled enum.
///
/// Implementations provide the member list and per-member name, value, and
/// label; everything else has default implementations.
///
/// # Examples
///
/// ```
/// use tidyenum_db::enums::{LabelledEnum, PrimitiveKind};
/// use tidyenum_db::value::Value;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Priority {
///     Low,
///     High,
/// }
///
/// impl LabelledEnum for Priority {
///     const ENUM_NAME: &'static str = "Priority";
///     const MEMBER_TYPE: PrimitiveKind = PrimitiveKind::Integer;
///
///     fn members() -> &'static [Self] {
///         &[Self::Low, Self::High]
///     }
///     fn name(self) -> &'static str {
///         match self {
///             Self::Low => "LOW",
///             Self::High => "HIGH",
///         }
///     }
///     fn value(self) -> Value {
///         match self {
///             Self::Low => Value::Int(1),
///             Self::High => Value::Int(2),
///         }
///     }
///     fn label(self) -> &'static str {
///         match self {
///             Self::Low => "Low",
///             Self::High => "High",
///         }
///     }
/// }
///
/// assert_eq!(Priority::from_value(&Value::Int(2)), Ok(Priority::High));
/// assert_eq!(Priority::choices()[0], (Value::Int(1), "Low".to_string()));
/// ```
pub trait LabelledEnum: Sized + Copy + PartialEq + fmt::Debug + 'static {
    /// The enum's name, used as the qualifier in `Name.MEMBER` text.
    const ENUM_NAME: &'static str;

    /// The primitive kind of every member's value.
    const MEMBER_TYPE: PrimitiveKind;

    /// All members, in declaration order.
    fn members() -> &'static [Self];

    /// The member name.
    fn name(self) -> &'static str;

    /// The primitive storage value.
    fn value(self) -> Value;

    /// The human-readable label.
    fn label(self) -> &'static str;

    /// The ordered `(value, label)` pairs used as field choices.
    fn choices() -> Vec<(Value, String)> {
        Self::members()
            .iter()
            .map(|m| (m.value(), m.label().to_string()))
            .collect()
    }

    /// Looks up a member by name.
    fn from_name(name: &str) -> Result<Self, ResolutionError> {
        Self::members()
            .iter()
            .copied()
            .find(|m| m.name() == name)
            .ok_or_else(|| ResolutionError::UnknownName {
                enum_name: Self::ENUM_NAME,
                name: name.to_string(),
            })
    }

    /// Looks up a member by its primitive value.
    fn from_value(value: &Value) -> Result<Self, ResolutionError> {
        Self::members()
            .iter()
            .copied()
            .find(|m| m.value().loosely_eq(value))
            .ok_or_else(|| ResolutionError::UnknownValue {
                enum_name: Self::ENUM_NAME,
                value: value.clone(),
            })
    }

    /// Recovers the typed member from an erased one.
    fn from_member(member: &EnumMember) -> Result<Self, ResolutionError> {
        if member.enum_name != Self::ENUM_NAME {
            return Err(ResolutionError::ForeignMember {
                member: member.qualified_name(),
                found: member.enum_name,
                expected: Self::ENUM_NAME,
            });
        }
        Self::from_name(member.name)
    }

    /// Erases this member.
    fn member(self) -> EnumMember {
        EnumMember {
            enum_name: Self::ENUM_NAME,
            name: self.name(),
            value: self.value(),
            label: self.label(),
        }
    }

    /// Builds the runtime descriptor for this enum.
    fn enum_type() -> EnumType {
        EnumType {
            name: Self::ENUM_NAME,
            member_type: Self::MEMBER_TYPE,
            members: Self::members().iter().map(|m| m.member()).collect(),
        }
    }
}

/// Runtime descriptor of a labelled enum.
///
/// Field adapters hold an `EnumType` rather than a type parameter so that a
/// field with and without an enum share one type.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    name: &'static str,
    member_type: PrimitiveKind,
    members: Vec<EnumMember>,
}

impl EnumType {
    /// Builds the descriptor for a typed enum.
    pub fn of<E: LabelledEnum>() -> Self {
        E::enum_type()
    }

    /// Builds a descriptor from `(name, value, label)` triples.
    pub fn new(
        name: &'static str,
        member_type: PrimitiveKind,
        members: impl IntoIterator<Item = (&'static str, Value, &'static str)>,
    ) -> Self {
        let members = members
            .into_iter()
            .map(|(member_name, value, label)| EnumMember {
                enum_name: name,
                name: member_name,
                value,
                label,
            })
            .collect();
        Self {
            name,
            member_type,
            members,
        }
    }

    /// The enum name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The primitive kind of the enum's values.
    pub const fn member_type(&self) -> PrimitiveKind {
        self.member_type
    }

    /// All members, in declaration order.
    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    /// The first declared member, if any.
    pub fn first(&self) -> Option<&EnumMember> {
        self.members.first()
    }

    /// The ordered `(value, label)` pairs.
    pub fn choices(&self) -> Vec<(Value, String)> {
        self.members
            .iter()
            .map(|m| (m.value.clone(), m.label.to_string()))
            .collect()
    }

    /// Returns `true` if `member` is one of this enum's members.
    pub fn contains(&self, member: &EnumMember) -> bool {
        member.enum_name == self.name && self.members.iter().any(|m| m == member)
    }

    /// Looks up a member by name.
    pub fn member_by_name(&self, name: &str) -> Result<&EnumMember, ResolutionError> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| ResolutionError::UnknownName {
                enum_name: self.name,
                name: name.to_string(),
            })
    }

    /// Looks up a member by primitive value.
    pub fn member_by_value(&self, value: &Value) -> Result<&EnumMember, ResolutionError> {
        self.members
            .iter()
            .find(|m| m.value.loosely_eq(value))
            .ok_or_else(|| ResolutionError::UnknownValue {
                enum_name: self.name,
                value: value.clone(),
            })
    }

    /// Coerces a value through the enum's primitive kind.
    pub fn coerce(&self, value: &Value) -> Result<Value, ResolutionError> {
        self.member_type.coerce(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Status {
        Active,
        Done,
    }

    impl LabelledEnum for Status {
        const ENUM_NAME: &'static str = "Status";
        const MEMBER_TYPE: PrimitiveKind = PrimitiveKind::Integer;

        fn members() -> &'static [Self] {
            &[Self::Active, Self::Done]
        }

        fn name(self) -> &'static str {
            match self {
                Self::Active => "ACTIVE",
                Self::Done => "DONE",
            }
        }

        fn value(self) -> Value {
            match self {
                Self::Active => Value::Int(1),
                Self::Done => Value::Int(2),
            }
        }

        fn label(self) -> &'static str {
            match self {
                Self::Active => "Active",
                Self::Done => "Done",
            }
        }
    }

    #[test]
    fn test_choices_in_declaration_order() {
        assert_eq!(
            Status::choices(),
            vec![
                (Value::Int(1), "Active".to_string()),
                (Value::Int(2), "Done".to_string())
            ]
        );
    }

    #[test]
    fn test_from_name_and_value() {
        assert_eq!(Status::from_name("DONE"), Ok(Status::Done));
        assert_eq!(Status::from_value(&Value::Int(1)), Ok(Status::Active));
        assert!(matches!(
            Status::from_name("done"),
            Err(ResolutionError::UnknownName { .. })
        ));
        assert!(matches!(
            Status::from_value(&Value::Int(99)),
            Err(ResolutionError::UnknownValue { .. })
        ));
    }

    #[test]
    fn test_from_member_round_trip() {
        let member = Status::Done.member();
        assert_eq!(member.qualified_name(), "Status.DONE");
        assert_eq!(Status::from_member(&member), Ok(Status::Done));
    }

    #[test]
    fn test_from_member_rejects_foreign_enum() {
        let other = EnumType::new("Other", PrimitiveKind::Integer, [("DONE", Value::Int(2), "Done")]);
        let err = Status::from_member(&other.members()[0]).unwrap_err();
        assert_eq!(err.to_string(), "Other.DONE is a member of Other, not Status");
    }

    #[test]
    fn test_enum_type_descriptor() {
        let et = EnumType::of::<Status>();
        assert_eq!(et.name(), "Status");
        assert_eq!(et.member_type(), PrimitiveKind::Integer);
        assert_eq!(et.first().unwrap().name, "ACTIVE");
        assert!(et.contains(&Status::Done.member()));
        assert_eq!(et.member_by_value(&Value::Float(2.0)).unwrap().name, "DONE");
    }

    #[test]
    fn test_contains_checks_enum_name() {
        let et = EnumType::of::<Status>();
        let lookalike = EnumMember {
            enum_name: "Other",
            ..Status::Active.member()
        };
        assert!(!et.contains(&lookalike));
    }

    #[test]
    fn test_integer_coercion() {
        let kind = PrimitiveKind::Integer;
        assert_eq!(kind.coerce(&Value::String(" 2 ".into())), Ok(Value::Int(2)));
        assert_eq!(kind.coerce(&Value::Float(2.9)), Ok(Value::Int(2)));
        assert_eq!(kind.coerce(&Value::Bool(true)), Ok(Value::Int(1)));
        assert!(kind.coerce(&Value::String("two".into())).is_err());
        assert!(kind.coerce(&Value::Float(f64::NAN)).is_err());
        assert!(kind.coerce(&Value::Null).is_err());
    }

    #[test]
    fn test_text_coercion() {
        let kind = PrimitiveKind::Text;
        assert_eq!(kind.coerce(&Value::Int(7)), Ok(Value::String("7".into())));
        assert_eq!(kind.coerce(&Value::String("a".into())), Ok(Value::String("a".into())));
        assert_eq!(kind.coerce(&Value::Bool(true)), Ok(Value::String("True".into())));
        assert_eq!(kind.coerce(&Value::Float(2.0)), Ok(Value::String("2.0".into())));
        assert!(kind.coerce(&Value::Null).is_err());
    }

    #[test]
    fn test_resolution_error_messages() {
        let err = ResolutionError::UnknownValue {
            enum_name: "Status",
            value: Value::Int(99),
        };
        assert_eq!(err.to_string(), "99 is not a valid Status");
        let err = ResolutionError::Coercion {
            value: Value::String("x".into()),
            kind: PrimitiveKind::Integer,
        };
        assert_eq!(err.to_string(), "cannot coerce x to integer");
    }
}
