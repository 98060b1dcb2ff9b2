// Command handlers for configuration operations

use crate::cli::{Args, Command};
use cm_admin::ToolSettings;
use cm_core::error::{CmError, Result};
use cm_core::{cm_error, cm_error_hint};
use cm_messages::messages::MESSAGES;
use cm_messages::msg;
use tracing::debug;

pub mod config;

/// Main command dispatcher
#[must_use = "command execution results should be handled"]
pub fn execute_command(args: Args) -> Result<()> {
    let settings = ToolSettings::load()?;
    let store_dir = settings.resolve_store_dir(args.store.as_deref())?;
    debug!(store_dir = %store_dir.display(), "resolved store directory");

    let ctx = config::CommandContext {
        store_dir,
        fetch_timeout: settings.fetch_timeout(),
        json: args.json,
    };

    let result = match &args.command {
        Command::InstallConfig { url } => config::handle_install(&ctx, url.as_deref()),
        Command::ListConfigs => config::handle_list(&ctx),
        Command::ShowConfig { pid } => config::handle_show(&ctx, pid.as_deref()),
        Command::DeleteConfig { pid } => config::handle_delete(&ctx, pid.as_deref()),
    };

    if let Err(CmError::StoreUnavailable) = &result {
        cm_error!("{}", MESSAGES.common.store_unavailable);
        cm_error_hint!(
            "{}",
            msg!(
                MESSAGES.common.store_location_hint,
                path = ctx.store_dir.display().to_string()
            )
        );
    }
    result
}
