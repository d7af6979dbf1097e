//! BlueMind application settings: the declared schema and its typed view.

use std::fmt;
use std::time::Duration;

use figment::error::{Actual, Kind};
use figment::providers::Serialized;
use figment::Figment;
use serde::{Deserialize, Serialize};

use super::config::Config;
use super::schema::{ConfigField, Schema};
use crate::domain::error::ConfigError;
use crate::infrastructure::logging::REDACTED;

/// Field holding the deployment mode checked by the insecure-default rule
pub const ENVIRONMENT_MODE: &str = "ENVIRONMENT_MODE";

/// Mode in which sensitive fields may not keep their defaults
pub const PRODUCTION_MODE: &str = "production";

fn default_app_name() -> String {
    "BlueMind Ocean Restoration API".to_string()
}

const fn default_debug() -> bool {
    true
}

fn default_api_version() -> String {
    "v1".to_string()
}

fn default_secret_key() -> String {
    "dev-secret-key-change-in-production-please".to_string()
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

const fn default_access_token_expire_minutes() -> u32 {
    30
}

fn default_database_url() -> String {
    "sqlite+aiosqlite:///./bluemind.db".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:3001".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

const fn default_enable_ai_predictions() -> bool {
    true
}

const fn default_model_update_interval() -> u64 {
    300
}

const fn default_sensor_update_interval() -> u64 {
    5
}

const fn default_enable_sensor_simulation() -> bool {
    true
}

fn default_environment_mode() -> String {
    "development".to_string()
}

/// Declared schema of the BlueMind API configuration
///
/// Order matches the settings struct and is the order `show` prints in.
pub fn bluemind_schema() -> Result<Schema, ConfigError> {
    let origins = default_allowed_origins();
    let origins: Vec<&str> = origins.iter().map(String::as_str).collect();

    Schema::new([
        ConfigField::string("APP_NAME", default_app_name()).describe("Application display name"),
        ConfigField::boolean("DEBUG", default_debug()).describe("Enable debug behaviour"),
        ConfigField::string("API_VERSION", default_api_version()).describe("Public API version prefix"),
        ConfigField::string("SECRET_KEY", default_secret_key())
            .sensitive()
            .describe("Token signing secret"),
        ConfigField::string("ALGORITHM", default_algorithm()).describe("Token signing algorithm"),
        ConfigField::integer(
            "ACCESS_TOKEN_EXPIRE_MINUTES",
            i64::from(default_access_token_expire_minutes()),
        )
        .describe("Access token lifetime in minutes"),
        ConfigField::string("DATABASE_URL", default_database_url()).describe("Database connection string"),
        ConfigField::list("ALLOWED_ORIGINS", &origins)
            .describe("CORS origins, comma separated, first match wins"),
        ConfigField::boolean("ENABLE_AI_PREDICTIONS", default_enable_ai_predictions())
            .describe("Run the prediction subsystem"),
        ConfigField::integer(
            "MODEL_UPDATE_INTERVAL",
            seconds_default(default_model_update_interval()),
        )
        .describe("Seconds between model refreshes"),
        ConfigField::integer(
            "SENSOR_UPDATE_INTERVAL",
            seconds_default(default_sensor_update_interval()),
        )
        .describe("Seconds between sensor readings"),
        ConfigField::boolean("ENABLE_SENSOR_SIMULATION", default_enable_sensor_simulation())
            .describe("Generate simulated sensor data"),
        ConfigField::string(ENVIRONMENT_MODE, default_environment_mode())
            .describe("Deployment mode: development, staging or production"),
    ])
}

fn seconds_default(secs: u64) -> i64 {
    i64::try_from(secs).unwrap_or(i64::MAX)
}

/// Strongly typed view of a loaded BlueMind configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Settings {
    /// Application display name
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Debug behaviour switch
    #[serde(default = "default_debug")]
    pub debug: bool,

    /// Public API version prefix
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Token signing secret
    #[serde(default = "default_secret_key")]
    pub secret_key: String,

    /// Token signing algorithm
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Access token lifetime in minutes
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: u32,

    /// Database connection string
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// CORS origins in priority order
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Run the prediction subsystem
    #[serde(default = "default_enable_ai_predictions")]
    pub enable_ai_predictions: bool,

    /// Seconds between model refreshes
    #[serde(default = "default_model_update_interval")]
    pub model_update_interval: u64,

    /// Seconds between sensor readings
    #[serde(default = "default_sensor_update_interval")]
    pub sensor_update_interval: u64,

    /// Generate simulated sensor data
    #[serde(default = "default_enable_sensor_simulation")]
    pub enable_sensor_simulation: bool,

    /// Deployment mode
    #[serde(default = "default_environment_mode")]
    pub environment_mode: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            debug: default_debug(),
            api_version: default_api_version(),
            secret_key: default_secret_key(),
            algorithm: default_algorithm(),
            access_token_expire_minutes: default_access_token_expire_minutes(),
            database_url: default_database_url(),
            allowed_origins: default_allowed_origins(),
            enable_ai_predictions: default_enable_ai_predictions(),
            model_update_interval: default_model_update_interval(),
            sensor_update_interval: default_sensor_update_interval(),
            enable_sensor_simulation: default_enable_sensor_simulation(),
            environment_mode: default_environment_mode(),
        }
    }
}

impl Settings {
    /// Extract typed settings from a loaded configuration
    ///
    /// Fails with [`ConfigError::Coercion`] when a value is out of range for
    /// its Rust type, e.g. a negative interval.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Figment::from(Serialized::defaults(config))
            .extract()
            .map_err(|e| extraction_error(config, &e))
    }

    /// Whether `ENVIRONMENT_MODE` is production, ignoring case
    pub fn is_production(&self) -> bool {
        self.environment_mode.eq_ignore_ascii_case(PRODUCTION_MODE)
    }

    /// Access token lifetime
    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.access_token_expire_minutes) * 60)
    }

    /// Time between model refreshes
    pub const fn model_update_interval(&self) -> Duration {
        Duration::from_secs(self.model_update_interval)
    }

    /// Time between sensor readings
    pub const fn sensor_update_interval(&self) -> Duration {
        Duration::from_secs(self.sensor_update_interval)
    }
}

/// Map a figment extraction failure back onto the field it concerns
fn extraction_error(config: &Config, err: &figment::Error) -> ConfigError {
    let entry = err.path.last().and_then(|name| config.entry(name));
    match entry {
        Some(entry) => ConfigError::Coercion {
            field: entry.name.clone(),
            value: entry.display_value(),
            expected: expected_range(&err.kind),
        },
        None => ConfigError::Extract(err.kind.to_string()),
    }
}

fn expected_range(kind: &Kind) -> &'static str {
    match kind {
        Kind::InvalidValue(Actual::Signed(v), _) if *v < 0 => "non-negative integer",
        Kind::InvalidValue(_, expected) if expected == "u32" => "integer between 0 and 4294967295",
        Kind::InvalidValue(..) | Kind::ISizeOutOfRange(_) | Kind::USizeOutOfRange(_) => {
            "integer in range"
        }
        _ => "value of the declared type",
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_name", &self.app_name)
            .field("debug", &self.debug)
            .field("api_version", &self.api_version)
            .field("secret_key", &REDACTED)
            .field("algorithm", &self.algorithm)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("database_url", &self.database_url)
            .field("allowed_origins", &self.allowed_origins)
            .field("enable_ai_predictions", &self.enable_ai_predictions)
            .field("model_update_interval", &self.model_update_interval)
            .field("sensor_update_interval", &self.sensor_update_interval)
            .field("enable_sensor_simulation", &self.enable_sensor_simulation)
            .field("environment_mode", &self.environment_mode)
            .finish()
    }
}
