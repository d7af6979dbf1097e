//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty log formatting on stderr
//! - `RUST_LOG` directives layered over a configured default level
//! - Redaction of sensitive configuration values

pub mod config;
pub mod logger;
pub mod secret_scrubbing;

pub use config::{LogConfig, LogFormat};
pub use logger::LoggerImpl;
pub use secret_scrubbing::{redact, REDACTED};
