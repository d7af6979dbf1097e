//! Implementation of the `bluemind-config show` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::display::{colorize_source, list_table, output, render_list, CommandOutput};
use crate::domain::models::{Config, Source};
use crate::infrastructure::config::{Environment, OverrideFile};
use crate::infrastructure::logging::REDACTED;
use crate::services::load_settings;

/// Arguments for `show`
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Only list settings overridden by the file or environment
    #[arg(long)]
    pub overridden: bool,
}

/// One resolved setting
#[derive(Debug, Serialize)]
pub struct ShowField {
    /// Field name
    pub name: String,
    /// Typed value, or the redaction marker for secrets
    pub value: serde_json::Value,
    /// Where the value came from
    pub source: Source,
}

/// Output of the `show` command
#[derive(Debug, Serialize)]
pub struct ShowOutput {
    /// Override file that was consulted
    pub env_file: String,
    /// Resolved settings in schema order
    pub fields: Vec<ShowField>,
}

impl ShowOutput {
    /// Build the listing, optionally keeping only overridden settings
    pub fn from_config(config: &Config, override_file: &OverrideFile, overridden_only: bool) -> Self {
        let fields = config
            .entries()
            .iter()
            .filter(|e| !overridden_only || e.source != Source::Default)
            .map(|e| ShowField {
                name: e.name.clone(),
                value: if e.sensitive {
                    serde_json::Value::String(REDACTED.to_string())
                } else {
                    serde_json::to_value(&e.value).unwrap_or_default()
                },
                source: e.source,
            })
            .collect();

        Self {
            env_file: override_file.path().display().to_string(),
            fields,
        }
    }
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["key", "value", "source"]);
        for field in &self.fields {
            let value = match &field.value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Array(items) => items
                    .iter()
                    .filter_map(serde_json::Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
                other => other.to_string(),
            };
            table.add_row(vec![
                field.name.clone(),
                value,
                colorize_source(field.source).to_string(),
            ]);
        }
        render_list("setting", &table, self.fields.len())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Load the configuration and print every setting with its source
pub fn execute(
    args: &ShowArgs,
    override_file: &OverrideFile,
    environment: &Environment,
    json_mode: bool,
) -> Result<()> {
    let (config, _) = load_settings(Some(override_file), environment)
        .context("Failed to load configuration")?;

    output(
        &ShowOutput::from_config(&config, override_file, args.overridden),
        json_mode,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(env: &Environment) -> Config {
        load_settings(None, env).unwrap().0
    }

    #[test]
    fn test_secret_value_never_shown() {
        let env = Environment::new().with("SECRET_KEY", "a-very-real-secret");
        let output = ShowOutput::from_config(&loaded(&env), &OverrideFile::optional(".env"), false);

        let json = output.to_json().to_string();
        assert!(!json.contains("a-very-real-secret"));
        assert!(json.contains(REDACTED));
        assert!(!output.to_human().contains("a-very-real-secret"));
    }

    #[test]
    fn test_typed_json_values() {
        let output =
            ShowOutput::from_config(&loaded(&Environment::new()), &OverrideFile::optional(".env"), false);
        let json = output.to_json();
        let fields = json["fields"].as_array().unwrap();

        let debug = fields.iter().find(|f| f["name"] == "DEBUG").unwrap();
        assert_eq!(debug["value"], serde_json::json!(true));
        assert_eq!(debug["source"], "default");

        let origins = fields.iter().find(|f| f["name"] == "ALLOWED_ORIGINS").unwrap();
        assert_eq!(origins["value"][0], "http://localhost:3000");
        assert_eq!(json["env_file"], ".env");
    }

    #[test]
    fn test_overridden_filter() {
        let env = Environment::new().with("API_VERSION", "v2");
        let output = ShowOutput::from_config(&loaded(&env), &OverrideFile::optional(".env"), true);

        assert_eq!(output.fields.len(), 1);
        assert_eq!(output.fields[0].name, "API_VERSION");
        assert_eq!(output.fields[0].source, Source::Environment);
    }
}
