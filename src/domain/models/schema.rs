//! Field declarations: the typed schema a configuration is loaded against.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::domain::error::ConfigError;

/// Declared type of a configuration field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Verbatim text
    String,
    /// `true`/`1`/`yes` or `false`/`0`/`no`
    Bool,
    /// Base-10 signed 64-bit integer
    Int,
    /// Comma separated strings
    List,
}

impl FieldKind {
    /// Human readable type name used in error messages
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::List => "list of strings",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A realized, typed configuration value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text value
    Str(String),
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Ordered list of strings
    List(Vec<String>),
}

impl FieldValue {
    /// The kind this value satisfies
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Str(_) => FieldKind::String,
            Self::Bool(_) => FieldKind::Bool,
            Self::Int(_) => FieldKind::Int,
            Self::List(_) => FieldKind::List,
        }
    }

    /// The text, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean, if this is one
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is one
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The items, if this is a list
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// One declared setting: name, type, default and where to read overrides from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigField {
    name: String,
    kind: FieldKind,
    default: FieldValue,
    source_key: Option<String>,
    sensitive: bool,
    description: Option<String>,
}

impl ConfigField {
    /// Declare a field with an explicit kind.
    ///
    /// The default must be of the declared kind; [`Schema::new`] rejects
    /// declarations where it is not.
    pub fn new(name: impl Into<String>, kind: FieldKind, default: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            kind,
            default: default.into(),
            source_key: None,
            sensitive: false,
            description: None,
        }
    }

    /// Declare a string field
    pub fn string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String, FieldValue::Str(default.into()))
    }

    /// Declare a boolean field
    pub fn boolean(name: impl Into<String>, default: bool) -> Self {
        Self::new(name, FieldKind::Bool, default)
    }

    /// Declare an integer field
    pub fn integer(name: impl Into<String>, default: i64) -> Self {
        Self::new(name, FieldKind::Int, default)
    }

    /// Declare a list field
    pub fn list(name: impl Into<String>, default: &[&str]) -> Self {
        let items = default.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
        Self::new(name, FieldKind::List, items)
    }

    /// Read overrides from `key` instead of the field name
    #[must_use]
    pub fn with_source_key(mut self, key: impl Into<String>) -> Self {
        self.source_key = Some(key.into());
        self
    }

    /// Mark the field as a secret: redacted in output, and its default is
    /// rejected in production.
    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Attach a short description shown by `schema`
    #[must_use]
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Static default
    pub const fn default_value(&self) -> &FieldValue {
        &self.default
    }

    /// Key looked up in the environment and override file
    pub fn source_key(&self) -> &str {
        self.source_key.as_deref().unwrap_or(&self.name)
    }

    /// Whether the field holds a secret
    pub const fn is_sensitive(&self) -> bool {
        self.sensitive
    }

    /// Description, if declared
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Ordered set of field declarations with unique names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<ConfigField>,
}

impl Schema {
    /// Build a schema, failing fast on duplicate or malformed declarations
    pub fn new(fields: impl IntoIterator<Item = ConfigField>) -> Result<Self, ConfigError> {
        let fields: Vec<ConfigField> = fields.into_iter().collect();
        let mut seen = HashSet::with_capacity(fields.len());

        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(ConfigError::Schema {
                    field: field.name.clone(),
                    reason: "field name cannot be empty".to_string(),
                });
            }
            if field.source_key().trim().is_empty() {
                return Err(ConfigError::Schema {
                    field: field.name.clone(),
                    reason: "source key cannot be empty".to_string(),
                });
            }
            if field.default.kind() != field.kind {
                return Err(ConfigError::Schema {
                    field: field.name.clone(),
                    reason: format!(
                        "default is a {} but the field is declared as {}",
                        field.default.kind(),
                        field.kind
                    ),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ConfigError::Schema {
                    field: field.name.clone(),
                    reason: "declared more than once".to_string(),
                });
            }
        }

        Ok(Self { fields })
    }

    /// Declarations in order
    pub fn fields(&self) -> &[ConfigField] {
        &self.fields
    }

    /// Declaration named `name`
    pub fn get(&self, name: &str) -> Option<&ConfigField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is declared
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate declarations in order
    pub fn iter(&self) -> impl Iterator<Item = &ConfigField> {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_key_defaults_to_name() {
        let field = ConfigField::string("APP_NAME", "demo");
        assert_eq!(field.source_key(), "APP_NAME");

        let field = field.with_source_key("BLUEMIND_APP_NAME");
        assert_eq!(field.source_key(), "BLUEMIND_APP_NAME");
        assert_eq!(field.name(), "APP_NAME");
    }

    #[test]
    fn test_schema_preserves_declaration_order() {
        let schema = Schema::new([
            ConfigField::integer("B", 1),
            ConfigField::boolean("A", true),
            ConfigField::list("C", &["x", "y"]),
        ])
        .unwrap();

        let names: Vec<&str> = schema.iter().map(ConfigField::name).collect();
        assert_eq!(names, ["B", "A", "C"]);
        assert_eq!(schema.len(), 3);
        assert!(schema.get("A").is_some());
        assert!(schema.get("a").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Schema::new([
            ConfigField::string("DEBUG", "x"),
            ConfigField::boolean("DEBUG", true),
        ]);

        match result.unwrap_err() {
            ConfigError::Schema { field, reason } => {
                assert_eq!(field, "DEBUG");
                assert!(reason.contains("more than once"));
            }
            other => panic!("Expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Schema::new([ConfigField::string("  ", "x")]);
        assert!(matches!(result, Err(ConfigError::Schema { .. })));
    }

    #[test]
    fn test_empty_source_key_rejected() {
        let result = Schema::new([ConfigField::string("NAME", "x").with_source_key("")]);
        assert!(matches!(result, Err(ConfigError::Schema { .. })));
    }

    #[test]
    fn test_default_kind_mismatch_rejected() {
        let result = Schema::new([ConfigField::new("PORT", FieldKind::Int, "8080")]);

        match result.unwrap_err() {
            ConfigError::Schema { field, reason } => {
                assert_eq!(field, "PORT");
                assert!(reason.contains("integer"));
            }
            other => panic!("Expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::from("v1").to_string(), "v1");
        assert_eq!(FieldValue::Bool(false).to_string(), "false");
        assert_eq!(FieldValue::Int(-3).to_string(), "-3");
        assert_eq!(
            FieldValue::List(vec!["a".into(), "b".into()]).to_string(),
            "a,b"
        );
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::Int(5).as_int(), Some(5));
        assert_eq!(FieldValue::Int(5).as_bool(), None);
        assert_eq!(FieldValue::Bool(true).as_bool(), Some(true));
        assert_eq!(FieldValue::from("x").as_str(), Some("x"));
        assert_eq!(
            FieldValue::List(vec!["a".into()]).as_list(),
            Some(&["a".to_string()][..])
        );
    }
}
