//! Implementation of the `bluemind-config check` command.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::display::{action_success, output, CommandOutput};
use crate::domain::models::{Config, Settings, Source};
use crate::infrastructure::config::{Environment, OverrideFile};
use crate::services::load_settings;

/// Summary of a successful load
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    /// Always true; failures exit through the error path
    pub success: bool,
    /// Number of declared settings
    pub fields: usize,
    /// Settings taken from the process environment
    pub from_environment: usize,
    /// Settings taken from the override file
    pub from_file: usize,
    /// Resolved `ENVIRONMENT_MODE`
    pub environment_mode: String,
}

impl CheckOutput {
    /// Summarize a loaded configuration
    pub fn new(config: &Config, settings: &Settings) -> Self {
        Self {
            success: true,
            fields: config.len(),
            from_environment: config.count_from(Source::Environment),
            from_file: config.count_from(Source::File),
            environment_mode: settings.environment_mode.clone(),
        }
    }
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        action_success(&format!(
            "Configuration is valid for {} mode ({} settings: {} from environment, {} from file)",
            self.environment_mode, self.fields, self.from_environment, self.from_file
        ))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Load the configuration and report whether it is valid
pub fn execute(override_file: &OverrideFile, environment: &Environment, json_mode: bool) -> Result<()> {
    let (config, settings) = load_settings(Some(override_file), environment)
        .context("Configuration is invalid")?;

    output(&CheckOutput::new(&config, &settings), json_mode);
    Ok(())
}
