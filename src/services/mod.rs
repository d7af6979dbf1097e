//! Service layer: application-facing access to configuration.

pub mod settings;

pub use settings::{get, init, load_from_process, load_settings, settings};
