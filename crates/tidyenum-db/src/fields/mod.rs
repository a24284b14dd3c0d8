//! Field definitions, base fields, and the enum field adapter.
//!
//! - [`types`] - [`FieldDef`] and [`FieldType`]
//! - [`base`] - the [`Field`] trait with [`CharField`] and [`IntegerField`]
//! - [`resolve`] - normalization of values against a labelled enum
//! - [`enum_field`] - [`EnumField`], [`EnumCharField`], [`EnumIntegerField`]

pub mod base;
pub mod enum_field;
pub mod resolve;
pub mod types;

pub use base::{CharField, Field, IntegerField, INTEGER_MAX, INTEGER_MIN};
pub use enum_field::{EnumCharField, EnumField, EnumFieldBuilder, EnumIntegerField, FIELDS_MODULE};
pub use resolve::FieldValue;
pub use types::{FieldDef, FieldType};
