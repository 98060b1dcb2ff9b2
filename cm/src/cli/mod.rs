// CLI argument parsing and definitions

use clap::{Parser, Subcommand};
use cm_messages::messages::CONFIG_MESSAGES;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cm")]
#[command(about = "Manage configurations held by a configuration store")]
#[command(version)]
#[command(after_help = CONFIG_MESSAGES.help)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration store directory (overrides CM_STORE_DIR and the settings file)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Print machine-readable JSON for listConfigs and showConfig
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,
}

// Arguments are optional so a missing one prints the command's usage line
// instead of a clap error.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Install a configuration properties file
    #[command(name = "installConfig")]
    InstallConfig {
        /// URL or path of the properties file, e.g. db-pool1.cfg
        url: Option<String>,
    },
    /// List configurations
    #[command(name = "listConfigs")]
    ListConfigs,
    /// Show contents of specified configuration
    #[command(name = "showConfig")]
    ShowConfig {
        /// PID or factory-alias token
        pid: Option<String>,
    },
    /// Delete specified configuration
    #[command(name = "deleteConfig")]
    DeleteConfig {
        /// PID or factory-alias token
        pid: Option<String>,
    },
}
