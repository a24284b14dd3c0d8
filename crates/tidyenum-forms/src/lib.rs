//! # tidyenum-forms
//!
//! Form field definitions for model fields. [`FormFieldFactory`] turns a
//! model field into a [`FormFieldDef`]; enum fields normalize the `initial`
//! value to its primitive before delegating to their base field.
//!
//! ## Modules
//!
//! - [`fields`] - Form field types and cleaning of raw input
//! - [`formfield`] - Form field generation from model fields
//! - [`widgets`] - Widget types

pub mod fields;
pub mod formfield;
pub mod widgets;

pub use fields::{clean_field_value, default_widget_for_field_type, FormFieldDef, FormFieldType};
pub use formfield::{FormFieldFactory, FormFieldOverrides};
pub use widgets::WidgetType;
