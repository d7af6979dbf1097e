//! Process-wide application settings.
//!
//! Built once at startup and read-only afterwards. Code that needs a
//! different configuration (tests, tooling) loads its own through
//! [`load_settings`] instead of touching the shared instance.

use std::sync::OnceLock;

use tracing::info;

use crate::domain::error::ConfigError;
use crate::domain::models::{bluemind_schema, Config, Settings};
use crate::infrastructure::config::{ConfigLoader, Environment, OverrideFile};

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Load the BlueMind schema from explicit inputs without installing anything
pub fn load_settings(
    override_file: Option<&OverrideFile>,
    environment: &Environment,
) -> Result<(Config, Settings), ConfigError> {
    let schema = bluemind_schema()?;
    let config = ConfigLoader::load(&schema, override_file, environment)?;
    let settings = Settings::from_config(&config)?;
    Ok((config, settings))
}

/// Install the process-wide settings
///
/// Only the first call succeeds; later calls get
/// [`ConfigError::AlreadyInitialized`] and the installed value is unchanged.
pub fn init(settings: Settings) -> Result<&'static Settings, ConfigError> {
    let mut installed = false;
    let stored = SETTINGS.get_or_init(|| {
        installed = true;
        settings
    });

    if installed {
        info!(
            app = %stored.app_name,
            mode = %stored.environment_mode,
            "process settings initialized"
        );
        Ok(stored)
    } else {
        Err(ConfigError::AlreadyInitialized)
    }
}

/// Load from the process environment and `override_file`, then install
pub fn load_from_process(
    override_file: Option<&OverrideFile>,
) -> Result<&'static Settings, ConfigError> {
    let (_, settings) = load_settings(override_file, &Environment::from_process())?;
    init(settings)
}

/// The process-wide settings, if startup has installed them
pub fn get() -> Option<&'static Settings> {
    SETTINGS.get()
}

/// The process-wide settings, or [`ConfigError::NotInitialized`] when read
/// before startup installed them
pub fn settings() -> Result<&'static Settings, ConfigError> {
    get().ok_or(ConfigError::NotInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Source;

    #[test]
    fn test_load_settings_from_explicit_inputs() {
        let env = Environment::new()
            .with("SENSOR_UPDATE_INTERVAL", "15")
            .with("ALLOWED_ORIGINS", "https://bluemind.example, http://localhost:3000");

        let (config, settings) = load_settings(None, &env).unwrap();

        assert_eq!(settings.sensor_update_interval, 15);
        assert_eq!(
            settings.allowed_origins,
            ["https://bluemind.example", "http://localhost:3000"]
        );
        assert_eq!(config.source("SENSOR_UPDATE_INTERVAL"), Some(Source::Environment));
        assert_eq!(config.source("DEBUG"), Some(Source::Default));
    }

    #[test]
    fn test_negative_interval_names_field() {
        let env = Environment::new().with("MODEL_UPDATE_INTERVAL", "-1");
        let err = load_settings(None, &env).unwrap_err();

        assert!(matches!(err, ConfigError::Coercion { .. }));
        assert_eq!(err.field(), Some("MODEL_UPDATE_INTERVAL"));
        assert!(err.to_string().contains("\"-1\""));
        assert!(!err.to_string().contains("src/"));
    }

    #[test]
    fn test_init_only_once() {
        let first = init(Settings::default()).unwrap();
        assert_eq!(first, settings().unwrap());

        let other = Settings {
            api_version: "v9".to_string(),
            ..Default::default()
        };
        assert!(matches!(init(other), Err(ConfigError::AlreadyInitialized)));
        assert_eq!(settings().unwrap().api_version, "v1");
        assert!(get().is_some());
    }
}
