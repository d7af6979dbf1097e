//! BlueMind configuration CLI entry point.

use clap::Parser;

use bluemind_config::cli::{handle_error, run, Cli};
use bluemind_config::infrastructure::logging::LoggerImpl;

fn main() {
    let cli = Cli::parse();

    let result = LoggerImpl::init(&cli.log_config()).and_then(|_| run(&cli));

    if let Err(err) = result {
        handle_error(&err, cli.json);
    }
}
