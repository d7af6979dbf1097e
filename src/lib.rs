//! BlueMind configuration
//!
//! Typed, environment-driven configuration for the BlueMind Ocean
//! Restoration API. A declared [`Schema`] of fields is resolved against the
//! process environment and an optional `.env`-style override file, coerced
//! to the declared types, validated, and exposed as one immutable record
//! for the life of the process.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): field declarations, the loaded record, typed settings
//! - **Infrastructure Layer** (`infrastructure`): override file, environment, loader, logging
//! - **Service Layer** (`services`): process-wide settings
//! - **CLI Layer** (`cli`): `bluemind-config show | check | schema`
//!
//! # Example
//!
//! ```no_run
//! use bluemind_config::infrastructure::config::OverrideFile;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = bluemind_config::services::load_from_process(Some(&OverrideFile::optional(".env")))?;
//!     println!("{} listening for {:?}", settings.app_name, settings.allowed_origins);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    bluemind_schema, Config, ConfigField, Entry, FieldKind, FieldValue, Schema, Settings, Source,
};
pub use infrastructure::config::{ConfigError, ConfigLoader, EnvFile, Environment, OverrideFile};
pub use services::settings;
