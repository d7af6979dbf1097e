//! Command-line interface for inspecting and validating configuration.

pub mod commands;
pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::error::ConfigError;
use crate::infrastructure::config::{Environment, OverrideFile};
use crate::infrastructure::logging::{LogConfig, LogFormat};
use self::commands::show::ShowArgs;

/// Top-level command line
#[derive(Parser, Debug)]
#[command(name = "bluemind-config")]
#[command(about = "Inspect and validate BlueMind API configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Override file consulted below the process environment
    #[arg(long, global = true, env = "BLUEMIND_ENV_FILE", default_value = ".env")]
    pub env_file: PathBuf,

    /// Fail when the override file does not exist
    #[arg(long, global = true)]
    pub require_env_file: bool,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Default log level; RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every resolved setting with its source
    Show(ShowArgs),

    /// Load the configuration and report whether it is valid
    Check,

    /// List declared settings, their types and defaults
    Schema,
}

impl Cli {
    /// Override file selected by `--env-file` and `--require-env-file`
    pub fn override_file(&self) -> OverrideFile {
        if self.require_env_file {
            OverrideFile::required(&self.env_file)
        } else {
            OverrideFile::optional(&self.env_file)
        }
    }

    /// Logging setup selected by the global flags
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            format: self.log_format,
        }
    }
}

/// Run the parsed command against the process environment
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let override_file = cli.override_file();
    match &cli.command {
        Commands::Show(args) => {
            commands::show::execute(args, &override_file, &Environment::from_process(), cli.json)
        }
        Commands::Check => {
            commands::check::execute(&override_file, &Environment::from_process(), cli.json)
        }
        Commands::Schema => commands::schema::execute(cli.json),
    }
}

/// Report a fatal error and exit with status 1
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    let field = err
        .downcast_ref::<ConfigError>()
        .and_then(ConfigError::field);

    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
            "field": field,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
    } else {
        eprintln!("{}", display::action_failure(&format!("{err:#}")));
    }
    std::process::exit(1)
}
