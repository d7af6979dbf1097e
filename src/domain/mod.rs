//! Domain layer for BlueMind configuration
//!
//! Field declarations, the realized configuration record and the typed
//! application settings. Nothing here touches the filesystem or the
//! process environment.

pub mod error;
pub mod models;

// Re-export error types for convenient access
pub use error::ConfigError;
