//! Redaction of sensitive values before they are logged or printed.

use crate::domain::models::FieldValue;

/// Placeholder shown instead of a sensitive value
pub const REDACTED: &str = "[REDACTED]";

/// Render a value for logs and terminal output, hiding it when sensitive
pub fn redact(value: &FieldValue, sensitive: bool) -> String {
    if sensitive {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}
