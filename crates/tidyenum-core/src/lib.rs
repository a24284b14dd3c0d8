//! # tidyenum-core
//!
//! Error types, settings, and logging setup shared by the tidyenum crates.
//! This crate has no tidyenum dependencies and sits at the bottom of the
//! workspace.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Settings and their defaults
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{TidyEnumError, TidyEnumResult, ValidationError};
pub use settings::{IntrospectionSettings, Settings};
