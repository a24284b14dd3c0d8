//! Logging integration for tidyenum.
//!
//! The field crates emit [`tracing`] events; hosting applications that do
//! not install their own subscriber can call [`setup_logging`].

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level`. In debug mode a pretty,
/// human-readable format is used; otherwise a structured JSON format is used.
/// If a subscriber is already installed this is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span scoped to one model field.
///
/// # Examples
///
/// ```
/// use tidyenum_core::logging::field_span;
///
/// let span = field_span("status");
/// let _guard = span.enter();
/// tracing::debug!("resolving default");
/// ```
pub fn field_span(field_name: &str) -> tracing::Span {
    tracing::debug_span!("field", name = field_name)
}
