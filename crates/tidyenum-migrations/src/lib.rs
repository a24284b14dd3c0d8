//! # tidyenum-migrations
//!
//! Migration introspection for model fields. Schema-diff tooling freezes each
//! field as a `(class_path, args, kwargs)` triple; the kwargs are read from
//! the field through [`IntrospectionRule`]s registered against class-path
//! patterns.
//!
//! Enum fields register a rule that freezes `default` from the field's
//! primitive migration default, so frozen state never holds an enum member.
//! Registration is explicit: call [`register_enum_fields`] during startup.
//!
//! ## Modules
//!
//! - [`introspection`] - Rules, the registry, and the [`Introspectable`] trait
//! - [`frozen`] - Frozen field triples and their JSON form

pub mod frozen;
pub mod introspection;

pub use frozen::{FieldTriple, FrozenModel};
pub use introspection::{
    enum_field_rules, register_enum_fields, register_from_settings, Introspectable,
    IntrospectionRegistry, IntrospectionRule, KwargOptions, BUILTIN_FIELDS_MODULE, INTROSPECTION,
};
