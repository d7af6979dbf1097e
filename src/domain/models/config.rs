//! The realized configuration record and where each value came from.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::schema::{FieldKind, FieldValue};
use crate::infrastructure::logging::redact;

/// Where a realized value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Static default from the schema
    Default,
    /// Override file (e.g. `.env`)
    File,
    /// Process environment
    Environment,
}

impl Source {
    /// Lower-case name used in output
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::File => "file",
            Self::Environment => "environment",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of a loaded configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Field name
    pub name: String,
    /// Realized typed value
    pub value: FieldValue,
    /// Where the value came from
    pub source: Source,
    /// Whether the value is a secret
    pub sensitive: bool,
}

impl Entry {
    /// Value rendered for display, with secrets replaced
    pub fn display_value(&self) -> String {
        redact(&self.value, self.sensitive)
    }
}

/// Immutable configuration record produced by the loader
///
/// Holds exactly one value per schema field, in declaration order. There is
/// no way to change a value once the record exists.
///
/// Serializes as a flat map of field name to typed value, which is what
/// typed settings are extracted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    entries: Vec<Entry>,
}

impl Config {
    pub(crate) const fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Value of `name`, if declared
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entry(name).map(|e| &e.value)
    }

    /// Full entry for `name`, if declared
    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Where the value of `name` came from
    pub fn source(&self, name: &str) -> Option<Source> {
        self.entry(name).map(|e| e.source)
    }

    /// All entries in declaration order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// String value of `name`; `None` if absent or not a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    /// Boolean value of `name`
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    /// Integer value of `name`
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_int)
    }

    /// List value of `name`
    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(FieldValue::as_list)
    }

    /// Number of fields whose value came from `source`
    pub fn count_from(&self, source: Source) -> usize {
        self.entries.iter().filter(|e| e.source == source).count()
    }

    /// Kind of a field's realized value
    pub fn kind(&self, name: &str) -> Option<FieldKind> {
        self.get(name).map(FieldValue::kind)
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.value)?;
        }
        map.end()
    }
}

/// `KEY=value` lines with sensitive values redacted
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}={}", entry.name, entry.display_value())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config::from_entries(vec![
            Entry {
                name: "API_VERSION".to_string(),
                value: FieldValue::from("v2"),
                source: Source::Environment,
                sensitive: false,
            },
            Entry {
                name: "SECRET_KEY".to_string(),
                value: FieldValue::from("hunter2-hunter2"),
                source: Source::File,
                sensitive: true,
            },
            Entry {
                name: "DEBUG".to_string(),
                value: FieldValue::Bool(true),
                source: Source::Default,
                sensitive: false,
            },
        ])
    }

    #[test]
    fn test_typed_getters() {
        let config = sample();
        assert_eq!(config.get_str("API_VERSION"), Some("v2"));
        assert_eq!(config.get_bool("DEBUG"), Some(true));
        assert_eq!(config.get_int("DEBUG"), None);
        assert_eq!(config.get("MISSING"), None);
        assert_eq!(config.kind("DEBUG"), Some(FieldKind::Bool));
    }

    #[test]
    fn test_sources_are_counted() {
        let config = sample();
        assert_eq!(config.source("SECRET_KEY"), Some(Source::File));
        assert_eq!(config.count_from(Source::Environment), 1);
        assert_eq!(config.count_from(Source::File), 1);
        assert_eq!(config.count_from(Source::Default), 1);
    }

    #[test]
    fn test_display_redacts_sensitive_values() {
        let rendered = sample().to_string();
        assert!(rendered.contains("API_VERSION=v2"));
        assert!(rendered.contains("SECRET_KEY=[REDACTED]"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_serializes_as_flat_map_in_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"API_VERSION":"v2","SECRET_KEY":"hunter2-hunter2","DEBUG":true}"#
        );
    }
}
