//! # tidyenum
//!
//! Model fields whose values are labelled enum members.
//!
//! This is the facade crate: it re-exports the sub-crates and provides the
//! explicit startup hook [`setup`]. Form support, migration introspection,
//! and the derive macro sit behind the `forms`, `migrations`, and `macros`
//! features (all on by default).
//!
//! ```
//! use tidyenum::fields::{EnumIntegerField, FieldValue};
//! use tidyenum::{EnumType, PrimitiveKind, Value};
//!
//! let status = EnumType::new(
//!     "Status",
//!     PrimitiveKind::Integer,
//!     [("ACTIVE", Value::Int(1), "Active"), ("DONE", Value::Int(2), "Done")],
//! );
//! let field = EnumIntegerField::builder("status").with_enum(status).build();
//!
//! assert_eq!(field.get_prep_value("Status.DONE").unwrap(), Value::Int(2));
//! assert_eq!(field.to_python(7), FieldValue::Raw(Value::Int(7)));
//! ```
//!
//! With the derive, generated code refers to `tidyenum_db`; crates that only
//! depend on `tidyenum` point it here with `#[labelled(crate = "::tidyenum::db")]`.

/// Error types, settings, and logging.
pub use tidyenum_core as core;

/// The labelled enum contract, base fields, and enum fields.
pub use tidyenum_db as db;

/// Form field generation.
#[cfg(feature = "forms")]
pub use tidyenum_forms as forms;

/// Migration introspection rules and frozen field state.
#[cfg(feature = "migrations")]
pub use tidyenum_migrations as migrations;

/// `#[derive(LabelledEnum)]`.
#[cfg(feature = "macros")]
pub use tidyenum_macros::LabelledEnum;

pub use tidyenum_core::{Settings, TidyEnumError, TidyEnumResult};
pub use tidyenum_db::{EnumMember, EnumType, PrimitiveKind, Value};

/// The enum field classes, published under `tidyenum.fields`.
pub mod fields {
    pub use tidyenum_db::fields::{
        EnumCharField, EnumField, EnumFieldBuilder, EnumIntegerField, FieldValue, FIELDS_MODULE,
    };
}

/// Configures logging and, if enabled, migration introspection.
///
/// Call once during application startup. Logging setup is idempotent; a
/// second call leaves the first subscriber in place.
pub fn setup(settings: &Settings) -> TidyEnumResult<()> {
    tidyenum_core::logging::setup_logging(settings);
    let registered = register_introspection_rules(settings)?;
    tracing::debug!(registered, "tidyenum setup complete");
    Ok(())
}

/// Registers the enum field rules with the process-wide introspection
/// registry. Returns whether anything was registered.
#[cfg(feature = "migrations")]
pub fn register_introspection_rules(settings: &Settings) -> TidyEnumResult<bool> {
    tidyenum_migrations::register_from_settings(
        &tidyenum_migrations::INTROSPECTION,
        &settings.introspection,
    )
}

/// Without the `migrations` feature there is no registry; this does nothing.
#[cfg(not(feature = "migrations"))]
#[allow(clippy::unnecessary_wraps)]
pub fn register_introspection_rules(_settings: &Settings) -> TidyEnumResult<bool> {
    tracing::debug!("migrations feature disabled; skipping introspection rules");
    Ok(false)
}
