//! # tidyenum-db
//!
//! Model fields whose values are labelled enum members.
//!
//! An [`EnumField`](fields::EnumField) wraps a primitive base field (text or
//! integer) and converts in both directions: members become their primitive
//! value on the way to storage, and stored primitives resolve back to members
//! on the way out. Values that match no member pass through untouched.
//!
//! ## Module Overview
//!
//! - [`enums`] - The [`LabelledEnum`](enums::LabelledEnum) contract and [`EnumType`](enums::EnumType)
//! - [`fields`] - Base fields and the enum field adapter
//! - [`value`] - The primitive [`Value`](value::Value) enum
//! - [`validators`] - Field validators

#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::should_implement_trait)]

pub mod enums;
pub mod fields;
pub mod validators;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use enums::{EnumMember, EnumType, LabelledEnum, PrimitiveKind, ResolutionError};
pub use fields::{
    CharField, EnumCharField, EnumField, EnumFieldBuilder, EnumIntegerField, Field, FieldDef,
    FieldType, FieldValue, IntegerField,
};
pub use validators::Validator;
pub use value::Value;
