//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration error types
///
/// Every variant aborts a load; no partially built configuration is ever
/// returned alongside one of these.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Duplicate or malformed field declaration (programmer error)
    #[error("Invalid schema declaration for '{field}': {reason}")]
    Schema {
        /// Offending field name
        field: String,
        /// What is wrong with the declaration
        reason: String,
    },

    /// Override file line without a `KEY=VALUE` shape
    #[error("Malformed override file {}: line {line} is not KEY=VALUE: {content:?}", path.display())]
    Parse {
        /// Override file path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// The offending line
        content: String,
    },

    /// Source value that cannot be converted to the declared type
    #[error("Invalid value for {field}: {value:?} is not a valid {expected}")]
    Coercion {
        /// Field the value was meant for
        field: String,
        /// Raw value, redacted when the field is sensitive
        value: String,
        /// Description of the accepted values
        expected: &'static str,
    },

    /// Sensitive field left at its placeholder default in production
    #[error(
        "Refusing to start: {field} still has its default value while running in {mode} mode. Set {field} explicitly"
    )]
    InsecureDefault {
        /// Sensitive field still at its default
        field: String,
        /// Resolved deployment mode
        mode: String,
    },

    /// Override file was marked required but does not exist
    #[error("Required override file not found: {}", path.display())]
    MissingFile {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Override file exists but could not be read as UTF-8 text
    #[error("Failed to read override file {}: {source}", path.display())]
    Io {
        /// Override file path
        path: PathBuf,
        /// Underlying read failure
        #[source]
        source: std::io::Error,
    },

    /// Typed settings could not be extracted and no single field is to blame
    #[error("Failed to extract settings: {0}")]
    Extract(String),

    /// Process-wide settings were installed twice
    #[error("Process-wide settings are already initialized")]
    AlreadyInitialized,

    /// Process-wide settings were read before startup installed them
    #[error("Process-wide settings read before startup initialized them")]
    NotInitialized,
}

impl ConfigError {
    /// Name of the field the error is about, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Schema { field, .. }
            | Self::Coercion { field, .. }
            | Self::InsecureDefault { field, .. } => Some(field),
            _ => None,
        }
    }
}
