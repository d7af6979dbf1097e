//! Infrastructure layer module
//!
//! Everything that touches the outside world:
//! - Configuration loading from override files and the environment
//! - Logging infrastructure

pub mod config;
pub mod logging;
