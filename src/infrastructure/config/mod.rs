//! Configuration management infrastructure
//!
//! Layered configuration over a declared schema:
//! - `.env`-style override file parsing
//! - Environment variable overrides
//! - Typed coercion of raw values
//! - Cross-field validation

pub mod coercion;
pub mod env_file;
pub mod environment;
pub mod loader;

pub use crate::domain::error::ConfigError;
pub use env_file::{EnvFile, OverrideFile};
pub use environment::Environment;
pub use loader::ConfigLoader;
