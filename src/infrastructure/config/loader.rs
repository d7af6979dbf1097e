//! Layered resolution of a schema against its sources.

use tracing::{debug, info, instrument, warn};

use super::coercion::coerce;
use super::env_file::{EnvFile, OverrideFile};
use super::environment::Environment;
use crate::domain::error::ConfigError;
use crate::domain::models::{Config, Entry, Schema, Source, ENVIRONMENT_MODE, PRODUCTION_MODE};
use crate::infrastructure::logging::redact;

/// Configuration loader with layered resolution
///
/// Stateless: every call reads its inputs afresh and nothing is cached, so
/// identical inputs always produce equal configurations.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a configuration for `schema`
    ///
    /// Precedence per field (highest first):
    /// 1. `environment`, under the field's source key
    /// 2. the override file, under the same key
    /// 3. the schema default
    ///
    /// The first source that defines the key wins. Any parse, coercion or
    /// validation failure aborts the whole load.
    pub fn load(
        schema: &Schema,
        override_file: Option<&OverrideFile>,
        environment: &Environment,
    ) -> Result<Config, ConfigError> {
        let file = match override_file {
            Some(file) => EnvFile::read(file)?,
            None => EnvFile::empty(),
        };
        Self::load_with_overrides(schema, &file, environment)
    }

    /// Load against an already parsed override set
    #[instrument(level = "debug", skip_all, fields(field_count = schema.len()))]
    pub fn load_with_overrides(
        schema: &Schema,
        file: &EnvFile,
        environment: &Environment,
    ) -> Result<Config, ConfigError> {
        let mut entries = Vec::with_capacity(schema.len());

        for field in schema.iter() {
            let key = field.source_key();
            let resolved = environment
                .get(key)
                .map(|raw| (raw, Source::Environment))
                .or_else(|| file.get(key).map(|raw| (raw, Source::File)));

            let (value, source) = match resolved {
                Some((raw, source)) => (coerce(field, raw)?, source),
                None => (field.default_value().clone(), Source::Default),
            };

            debug!(
                field = field.name(),
                key,
                source = %source,
                value = %redact(&value, field.is_sensitive()),
                "resolved configuration field"
            );

            entries.push(Entry {
                name: field.name().to_string(),
                value,
                source,
                sensitive: field.is_sensitive(),
            });
        }

        let config = Config::from_entries(entries);
        Self::validate(schema, &config)?;

        info!(
            fields = config.len(),
            from_environment = config.count_from(Source::Environment),
            from_file = config.count_from(Source::File),
            override_file = ?file.path(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Cross-field rules applied after every field has a value
    ///
    /// A sensitive field that still equals its default is rejected when
    /// `ENVIRONMENT_MODE` resolves to production. Schemas without that
    /// field never trip the rule.
    pub fn validate(schema: &Schema, config: &Config) -> Result<(), ConfigError> {
        let mode = schema
            .get(ENVIRONMENT_MODE)
            .and_then(|_| config.get_str(ENVIRONMENT_MODE));
        let production = mode.is_some_and(|m| m.eq_ignore_ascii_case(PRODUCTION_MODE));

        for field in schema.iter().filter(|f| f.is_sensitive()) {
            let Some(value) = config.get(field.name()) else {
                continue;
            };
            if value != field.default_value() {
                continue;
            }

            if production {
                return Err(ConfigError::InsecureDefault {
                    field: field.name().to_string(),
                    mode: mode.unwrap_or(PRODUCTION_MODE).to_string(),
                });
            }
            warn!(
                field = field.name(),
                "sensitive field is using its default value; set it before deploying to production"
            );
        }

        Ok(())
    }
}
