//! Introspection rules and the rule registry.
//!
//! A field is frozen by reading attributes named in [`IntrospectionRule`]s.
//! The registry always applies its base rules (null, blank, max_length and
//! the other schema options) and then every registered rule naming the
//! field's class path, later rules overriding earlier ones. Fields whose
//! class path matches no registered pattern cannot be frozen.

use std::collections::BTreeMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use regex::Regex;
use tidyenum_core::settings::{IntrospectionSettings, DEFAULT_FIELD_PATTERN};
use tidyenum_core::{TidyEnumError, TidyEnumResult};
use tidyenum_db::fields::{
    CharField, EnumCharField, EnumField, EnumIntegerField, Field, FieldDef, IntegerField,
};
use tidyenum_db::value::Value;

use crate::frozen::FieldTriple;

/// Module path of the built-in base fields.
pub const BUILTIN_FIELDS_MODULE: &str = "db.models.fields";

/// The process-wide registry.
pub static INTROSPECTION: Lazy<IntrospectionRegistry> = Lazy::new(IntrospectionRegistry::new);

/// A field that can be frozen.
pub trait Introspectable {
    /// Dotted class path, matched against registered patterns.
    fn class_path(&self) -> String;

    /// Reads a named attribute. `None` if the field has no such attribute.
    fn attribute(&self, name: &str) -> Option<Value>;
}

/// How a keyword argument is read and when it is left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KwargOptions {
    /// Leave the kwarg out when the attribute equals this value.
    pub default: Option<Value>,
    /// Leave the kwarg out when the attribute is `Null`.
    pub ignore_if_none: bool,
    /// Leave the kwarg out when this other attribute is `true`.
    pub ignore_if: Option<String>,
}

impl KwargOptions {
    /// Options that always record the attribute.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips the kwarg when the attribute equals `value`.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Skips the kwarg when the attribute is `Null`.
    #[must_use]
    pub const fn ignore_if_none(mut self) -> Self {
        self.ignore_if_none = true;
        self
    }

    /// Skips the kwarg when `attribute` is `true`.
    #[must_use]
    pub fn ignore_if(mut self, attribute: impl Into<String>) -> Self {
        self.ignore_if = Some(attribute.into());
        self
    }
}

/// Maps keyword arguments of some field classes to field attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntrospectionRule {
    /// Class paths the rule applies to. Empty means every field.
    pub field_classes: Vec<String>,
    /// Attributes frozen as positional arguments.
    pub args: Vec<String>,
    /// Keyword argument name to `(attribute name, options)`.
    pub kwargs: BTreeMap<String, (String, KwargOptions)>,
}

impl IntrospectionRule {
    /// Creates a rule for the given class paths.
    pub fn new<I, S>(field_classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_classes: field_classes.into_iter().map(Into::into).collect(),
            args: Vec::new(),
            kwargs: BTreeMap::new(),
        }
    }

    /// Adds a positional argument read from `attribute`.
    #[must_use]
    pub fn arg(mut self, attribute: impl Into<String>) -> Self {
        self.args.push(attribute.into());
        self
    }

    /// Adds a keyword argument read from `attribute`.
    #[must_use]
    pub fn kwarg(
        mut self,
        name: impl Into<String>,
        attribute: impl Into<String>,
        options: KwargOptions,
    ) -> Self {
        self.kwargs.insert(name.into(), (attribute.into(), options));
        self
    }

    fn applies_to(&self, class_path: &str) -> bool {
        self.field_classes.is_empty() || self.field_classes.iter().any(|c| c == class_path)
    }
}

/// The schema options every field is frozen with.
fn base_rule() -> IntrospectionRule {
    IntrospectionRule::new(Vec::<String>::new())
        .kwarg("null", "null", KwargOptions::new().default_value(false))
        .kwarg(
            "blank",
            "blank",
            KwargOptions::new().default_value(false).ignore_if("primary_key"),
        )
        .kwarg("primary_key", "primary_key", KwargOptions::new().default_value(false))
        .kwarg("max_length", "max_length", KwargOptions::new().ignore_if_none())
        .kwarg("unique", "unique", KwargOptions::new().default_value(false))
        .kwarg("db_index", "db_index", KwargOptions::new().default_value(false))
        .kwarg("db_column", "db_column", KwargOptions::new().ignore_if_none())
        .kwarg("default", "default", KwargOptions::new())
}

#[derive(Debug)]
struct Registered {
    rules: Vec<IntrospectionRule>,
    patterns: Vec<Regex>,
}

/// Introspection rules and the class-path patterns they are allowed for.
#[derive(Debug)]
pub struct IntrospectionRegistry {
    base: IntrospectionRule,
    inner: RwLock<Registered>,
}

impl Default for IntrospectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IntrospectionRegistry {
    /// Creates a registry that knows the built-in base fields.
    pub fn new() -> Self {
        let builtin = format!("^{}\\.", regex::escape(BUILTIN_FIELDS_MODULE));
        let patterns = Regex::new(&builtin).map(|re| vec![re]).unwrap_or_default();
        Self {
            base: base_rule(),
            inner: RwLock::new(Registered {
                rules: Vec::new(),
                patterns,
            }),
        }
    }

    /// Registers rules and the class-path patterns they cover.
    ///
    /// All patterns are compiled before anything is registered; an invalid
    /// pattern leaves the registry unchanged. Patterns and rules already
    /// registered are not added twice.
    pub fn add_introspection_rules(
        &self,
        rules: Vec<IntrospectionRule>,
        patterns: &[&str],
    ) -> TidyEnumResult<()> {
        let compiled = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    TidyEnumError::IntrospectionError(format!("invalid pattern {p:?}: {e}"))
                })
            })
            .collect::<TidyEnumResult<Vec<_>>>()?;

        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        for re in compiled {
            if !inner.patterns.iter().any(|p| p.as_str() == re.as_str()) {
                inner.patterns.push(re);
            }
        }
        for rule in rules {
            if !inner.rules.contains(&rule) {
                inner.rules.push(rule);
            }
        }
        Ok(())
    }

    /// Returns `true` if some registered pattern matches `class_path`.
    pub fn is_introspectable(&self, class_path: &str) -> bool {
        self.inner
            .read()
            .is_ok_and(|inner| inner.patterns.iter().any(|p| p.is_match(class_path)))
    }

    /// Number of registered rules, not counting the base rules.
    pub fn rule_count(&self) -> usize {
        self.inner.read().map_or(0, |inner| inner.rules.len())
    }

    /// Freezes a field into its `(class_path, args, kwargs)` triple.
    pub fn triple(&self, field: &dyn Introspectable) -> TidyEnumResult<FieldTriple> {
        let class_path = field.class_path();
        let inner = self.inner.read().map_err(|_| poisoned())?;
        if !inner.patterns.iter().any(|p| p.is_match(&class_path)) {
            return Err(TidyEnumError::IntrospectionError(format!(
                "cannot freeze {class_path}: no introspection rules match"
            )));
        }

        let mut triple = FieldTriple::new(class_path.clone());
        let matching = std::iter::once(&self.base)
            .chain(inner.rules.iter().filter(|r| r.applies_to(&class_path)));
        for rule in matching {
            if !rule.args.is_empty() {
                triple.args = rule
                    .args
                    .iter()
                    .map(|attr| {
                        field.attribute(attr).map(|v| v.to_literal()).ok_or_else(|| {
                            TidyEnumError::IntrospectionError(format!(
                                "{class_path} has no attribute {attr:?}"
                            ))
                        })
                    })
                    .collect::<TidyEnumResult<_>>()?;
            }
            for (name, (attr, options)) in &rule.kwargs {
                if let Some(literal) = frozen_kwarg(field, attr, options) {
                    triple.kwargs.insert(name.clone(), literal);
                }
            }
        }

        tracing::trace!(class_path = %triple.class_path, kwargs = triple.kwargs.len(), "froze field");
        Ok(triple)
    }
}

fn poisoned() -> TidyEnumError {
    TidyEnumError::IntrospectionError("introspection registry lock poisoned".to_string())
}

fn frozen_kwarg(field: &dyn Introspectable, attr: &str, options: &KwargOptions) -> Option<String> {
    let value = field.attribute(attr)?;
    if options.ignore_if_none && value.is_null() {
        return None;
    }
    if let Some(other) = &options.ignore_if {
        if field.attribute(other) == Some(Value::Bool(true)) {
            return None;
        }
    }
    if options.default.as_ref() == Some(&value) {
        return None;
    }
    Some(value.to_literal())
}

/// Reads the schema attributes every field definition carries.
fn def_attribute(def: &FieldDef, name: &str) -> Option<Value> {
    match name {
        "null" => Some(Value::Bool(def.null)),
        "blank" => Some(Value::Bool(def.blank)),
        "primary_key" => Some(Value::Bool(def.primary_key)),
        "unique" => Some(Value::Bool(def.unique)),
        "db_index" => Some(Value::Bool(def.db_index)),
        "editable" => Some(Value::Bool(def.editable)),
        "max_length" => Some(def.max_length.map_or(Value::Null, |n| {
            Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
        })),
        "db_column" => Some(if def.column == def.name {
            Value::Null
        } else {
            Value::String(def.column.clone())
        }),
        "verbose_name" => Some(Value::String(def.verbose_name.clone())),
        "help_text" => Some(Value::String(def.help_text.clone())),
        "default" => def.default.clone(),
        _ => None,
    }
}

impl Introspectable for CharField {
    fn class_path(&self) -> String {
        format!("{BUILTIN_FIELDS_MODULE}.{}", Self::CLASS_NAME)
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        def_attribute(self.def(), name)
    }
}

impl Introspectable for IntegerField {
    fn class_path(&self) -> String {
        format!("{BUILTIN_FIELDS_MODULE}.{}", Self::CLASS_NAME)
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        def_attribute(self.def(), name)
    }
}

impl<F: Field> Introspectable for EnumField<F> {
    fn class_path(&self) -> String {
        Self::class_path()
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "migration_default" => self.migration_default(),
            _ => def_attribute(self.field_def(), name),
        }
    }
}

/// The rules that freeze an enum field's `default` in primitive form.
pub fn enum_field_rules() -> Vec<IntrospectionRule> {
    [EnumCharField::class_path(), EnumIntegerField::class_path()]
        .into_iter()
        .map(|class_path| {
            IntrospectionRule::new([class_path]).kwarg(
                "default",
                "migration_default",
                KwargOptions::new(),
            )
        })
        .collect()
}

/// Registers the enum field rules under the default class-path pattern.
pub fn register_enum_fields(registry: &IntrospectionRegistry) -> TidyEnumResult<()> {
    registry.add_introspection_rules(enum_field_rules(), &[DEFAULT_FIELD_PATTERN])?;
    tracing::info!(pattern = DEFAULT_FIELD_PATTERN, "registered enum field introspection rules");
    Ok(())
}

/// Registers the enum field rules as configured.
///
/// Returns `false` without touching the registry when introspection is
/// disabled.
pub fn register_from_settings(
    registry: &IntrospectionRegistry,
    settings: &IntrospectionSettings,
) -> TidyEnumResult<bool> {
    if !settings.enabled {
        tracing::debug!("introspection disabled; enum field rules not registered");
        return Ok(false);
    }
    let patterns: Vec<&str> = settings.patterns.iter().map(String::as_str).collect();
    registry.add_introspection_rules(enum_field_rules(), &patterns)?;
    tracing::info!(patterns = ?settings.patterns, "registered enum field introspection rules");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidyenum_db::enums::{EnumType, PrimitiveKind};
    use tidyenum_db::fields::FieldType;

    fn status() -> EnumType {
        EnumType::new(
            "Status",
            PrimitiveKind::Integer,
            [
                ("ACTIVE", Value::Int(1), "Active"),
                ("DONE", Value::Int(2), "Done"),
            ],
        )
    }

    fn registered() -> IntrospectionRegistry {
        let registry = IntrospectionRegistry::new();
        register_enum_fields(&registry).unwrap();
        registry
    }

    #[test]
    fn test_enum_fields_need_registration() {
        let registry = IntrospectionRegistry::new();
        let field = EnumIntegerField::builder("status").with_enum(status()).build();
        assert!(!registry.is_introspectable(&Introspectable::class_path(&field)));
        let err = registry.triple(&field).unwrap_err();
        assert!(matches!(err, TidyEnumError::IntrospectionError(_)));
    }

    #[test]
    fn test_enum_default_frozen_as_primitive() {
        let registry = registered();
        let field = EnumIntegerField::builder("status")
            .with_enum(status())
            .default("DONE")
            .build();
        // Names do not resolve defaults, so the raw text is frozen.
        let triple = registry.triple(&field).unwrap();
        assert_eq!(triple.kwarg("default"), Some("'DONE'"));

        let field = EnumIntegerField::builder("status")
            .with_enum(status())
            .default(2)
            .build();
        let triple = registry.triple(&field).unwrap();
        assert_eq!(triple.class_path, "tidyenum.fields.EnumIntegerField");
        assert_eq!(triple.kwarg("default"), Some("2"));
    }

    #[test]
    fn test_derived_default_frozen() {
        let registry = registered();
        let field = EnumCharField::builder("colour")
            .with_enum(EnumType::new(
                "Colour",
                PrimitiveKind::Text,
                [("RED", Value::from("r"), "Red")],
            ))
            .max_length(1)
            .build();
        let triple = registry.triple(&field).unwrap();
        assert_eq!(triple.kwarg("default"), Some("'r'"));
        assert_eq!(triple.kwarg("max_length"), Some("1"));
        assert!(triple.args.is_empty());
    }

    #[test]
    fn test_base_rules_skip_defaults() {
        let registry = registered();
        let field = EnumIntegerField::builder("status")
            .with_enum(status())
            .nullable()
            .column("status_id")
            .build();
        let triple = registry.triple(&field).unwrap();
        assert_eq!(triple.kwarg("null"), Some("True"));
        assert_eq!(triple.kwarg("db_column"), Some("'status_id'"));
        assert_eq!(triple.kwarg("unique"), None);
        assert_eq!(triple.kwarg("blank"), None);
        assert_eq!(triple.kwarg("max_length"), None);
    }

    #[test]
    fn test_builtin_fields_are_introspectable() {
        let registry = IntrospectionRegistry::new();
        let field = CharField::from_def(FieldDef::new("code", FieldType::CharField).max_length(8));
        let triple = registry.triple(&field).unwrap();
        assert_eq!(triple.class_path, "db.models.fields.CharField");
        assert_eq!(triple.kwarg("max_length"), Some("8"));
        assert_eq!(triple.kwarg("default"), None);
    }

    #[test]
    fn test_ignore_if_other_attribute() {
        let registry = IntrospectionRegistry::new();
        let field = IntegerField::from_def(
            FieldDef::new("id", FieldType::IntegerField).primary_key().blank(),
        );
        let triple = registry.triple(&field).unwrap();
        assert_eq!(triple.kwarg("primary_key"), Some("True"));
        assert_eq!(triple.kwarg("blank"), None);
    }

    #[test]
    fn test_invalid_pattern_leaves_registry_unchanged() {
        let registry = IntrospectionRegistry::new();
        let err = registry
            .add_introspection_rules(enum_field_rules(), &["^ok\\.", "("])
            .unwrap_err();
        assert!(matches!(err, TidyEnumError::IntrospectionError(_)));
        assert_eq!(registry.rule_count(), 0);
        assert!(!registry.is_introspectable("ok.Field"));
    }

    #[test]
    fn test_registering_twice_is_idempotent() {
        let registry = registered();
        let before = registry.rule_count();
        register_enum_fields(&registry).unwrap();
        register_enum_fields(&registry).unwrap();
        assert_eq!(before, 2);
        assert_eq!(registry.rule_count(), 2);
        assert_eq!(registry.inner.read().unwrap().patterns.len(), 2);
    }

    #[test]
    fn test_positional_args() {
        let registry = IntrospectionRegistry::new();
        registry
            .add_introspection_rules(
                vec![IntrospectionRule::new(["db.models.fields.CharField"]).arg("verbose_name")],
                &[],
            )
            .unwrap();
        let field = CharField::from_def(FieldDef::new("code", FieldType::CharField).verbose_name("Code"));
        assert_eq!(registry.triple(&field).unwrap().args, vec!["'Code'".to_string()]);

        registry
            .add_introspection_rules(
                vec![IntrospectionRule::new(["db.models.fields.CharField"]).arg("missing")],
                &[],
            )
            .unwrap();
        assert!(registry.triple(&field).is_err());
    }

    #[test]
    fn test_register_from_settings() {
        let registry = IntrospectionRegistry::new();
        let disabled = IntrospectionSettings {
            enabled: false,
            ..IntrospectionSettings::default()
        };
        assert!(!register_from_settings(&registry, &disabled).unwrap());
        assert_eq!(registry.rule_count(), 0);

        let custom = IntrospectionSettings {
            enabled: true,
            patterns: vec![r"^tidyenum\.".to_string()],
        };
        assert!(register_from_settings(&registry, &custom).unwrap());
        assert!(registry.is_introspectable("tidyenum.fields.EnumCharField"));
    }

    #[test]
    fn test_no_enum_field_still_freezes() {
        let registry = registered();
        let field = EnumIntegerField::builder("rank").default(5).build();
        let triple = registry.triple(&field).unwrap();
        assert_eq!(triple.kwarg("default"), Some("5"));
    }
}
