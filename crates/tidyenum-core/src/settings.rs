//! Settings for tidyenum.
//!
//! [`Settings`] holds the few knobs a hosting application can turn: logging
//! and whether enum fields are registered with migration introspection.
//! Settings are plain values handed to `tidyenum::setup`.

use serde::{Deserialize, Serialize};

/// Module path pattern under which the enum field classes are registered.
pub const DEFAULT_FIELD_PATTERN: &str = r"^tidyenum\.fields\.";

/// Migration introspection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectionSettings {
    /// Whether `tidyenum::setup` registers introspection rules.
    pub enabled: bool,
    /// Class-path regexes the enum field rules are registered under.
    pub patterns: Vec<String>,
}

impl Default for IntrospectionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            patterns: vec![DEFAULT_FIELD_PATTERN.to_string()],
        }
    }
}

/// The complete set of tidyenum settings.
///
/// # Examples
///
/// ```
/// use tidyenum_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.log_level, "info");
/// assert!(settings.introspection.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    /// The log filter directive (e.g. "info", "tidyenum_db=trace").
    pub log_level: String,

    /// Migration introspection settings.
    pub introspection: IntrospectionSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            introspection: IntrospectionSettings::default(),
        }
    }
}
