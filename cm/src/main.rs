// External crates
use clap::Parser;
use tracing::debug;

// Internal imports
use cm_core::cm_error;
use cm_core::error::CmError;
use cm_logging::LogSettings;
use cm_messages::messages::MESSAGES;
use cm_messages::msg;

// Local modules
mod cli;
mod commands;

use cli::Args;
use commands::execute_command;

fn main() {
    let args = Args::parse();

    // Tests compare stdout/stderr exactly, so they run without a subscriber.
    let log_guard = if std::env::var_os("CM_TEST_MODE").is_none() {
        let mut log_settings = LogSettings::from_env();
        if args.debug {
            log_settings.level = "debug".to_string();
        }
        cm_logging::init_with(&log_settings)
    } else {
        None
    };

    debug!(command = ?args.command, "starting cm");

    if let Err(e) = execute_command(args) {
        // Store unavailability was already reported with a hint.
        if !matches!(e, CmError::StoreUnavailable) {
            cm_error!("{}", msg!(MESSAGES.common.error_generic, error = e.to_string()));
        }
        drop(log_guard);
        std::process::exit(1);
    }
}
