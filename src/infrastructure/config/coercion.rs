//! Conversion of raw source strings into typed field values.

use crate::domain::error::ConfigError;
use crate::domain::models::{ConfigField, FieldKind, FieldValue};
use crate::infrastructure::logging::REDACTED;

/// Delimiter for list-typed fields
pub const LIST_DELIMITER: char = ',';

/// Convert `raw` to the field's declared kind
pub fn coerce(field: &ConfigField, raw: &str) -> Result<FieldValue, ConfigError> {
    let value = match field.kind() {
        FieldKind::String => Some(FieldValue::Str(raw.to_string())),
        FieldKind::Bool => parse_bool(raw).map(FieldValue::Bool),
        FieldKind::Int => parse_int(raw).map(FieldValue::Int),
        FieldKind::List => Some(FieldValue::List(split_list(raw))),
    };

    value.ok_or_else(|| ConfigError::Coercion {
        field: field.name().to_string(),
        value: if field.is_sensitive() {
            REDACTED.to_string()
        } else {
            raw.to_string()
        },
        expected: field.kind().as_str(),
    })
}

/// `true`/`1`/`yes` and `false`/`0`/`no`, case-insensitive
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Base-10 integer with an optional sign
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Split on commas and trim each element; empty elements are dropped, so an
/// empty string is an empty list.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
