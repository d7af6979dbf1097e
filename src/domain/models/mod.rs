//! Domain models: schema, loaded record and typed settings.

pub mod config;
pub mod schema;
pub mod settings;

pub use config::{Config, Entry, Source};
pub use schema::{ConfigField, FieldKind, FieldValue, Schema};
pub use settings::{bluemind_schema, Settings, ENVIRONMENT_MODE, PRODUCTION_MODE};
