// installConfig, listConfigs, showConfig and deleteConfig

use cm_admin::payload::PayloadSource;
use cm_admin::{ConfigSummary, ConfigurationCommands, FileStore};
use cm_core::cm_println;
use cm_core::error::Result;
use cm_messages::messages::MESSAGES;
use cm_messages::msg;
use std::path::PathBuf;
use std::time::Duration;

pub struct CommandContext {
    pub store_dir: PathBuf,
    pub fetch_timeout: Duration,
    pub json: bool,
}

impl CommandContext {
    fn commands(&self) -> ConfigurationCommands<FileStore> {
        ConfigurationCommands::new(FileStore::open(&self.store_dir))
    }
}

pub fn handle_install(ctx: &CommandContext, url: Option<&str>) -> Result<()> {
    let Some(url) = url else {
        cm_println!("{}", MESSAGES.config.install_usage);
        return Ok(());
    };

    let source = PayloadSource::parse(url)?;
    let commands = ConfigurationCommands::new(FileStore::create(&ctx.store_dir)?);
    let pid = commands.install_from(&source, ctx.fetch_timeout)?;
    cm_println!("{}", msg!(MESSAGES.config.installed, pid = pid));
    Ok(())
}

pub fn handle_list(ctx: &CommandContext) -> Result<()> {
    let summaries = ctx.commands().list()?;

    if ctx.json {
        cm_println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        cm_println!("{}", MESSAGES.config.none_found);
    } else {
        for summary in &summaries {
            cm_println!("{}", summary_line(summary));
        }
    }
    Ok(())
}

fn summary_line(summary: &ConfigSummary) -> String {
    let mut line = msg!(MESSAGES.config.list_pid, pid = summary.pid.as_str());
    if let Some(factory_pid) = &summary.factory_pid {
        line.push_str(&msg!(
            MESSAGES.config.list_factory_pid,
            factory_pid = factory_pid.as_str()
        ));
    }
    if let Some(alias) = &summary.alias_pid {
        line.push_str(&msg!(MESSAGES.config.list_alias_pid, alias = alias.as_str()));
    }
    line
}

pub fn handle_show(ctx: &CommandContext, pid: Option<&str>) -> Result<()> {
    let Some(pid) = pid else {
        cm_println!("{}", MESSAGES.config.show_usage);
        return Ok(());
    };

    match ctx.commands().show(pid)? {
        None => {
            cm_println!("{}", msg!(MESSAGES.config.not_found, pid = pid));
        }
        Some(properties) if ctx.json => {
            cm_println!("{}", serde_json::to_string_pretty(&properties)?);
        }
        Some(properties) => {
            for (key, value) in &properties {
                cm_println!("{}", property_line(key, value));
            }
        }
    }
    Ok(())
}

fn property_line(key: &str, value: &str) -> String {
    msg!(MESSAGES.config.show_property, key = key, value = value)
}

pub fn handle_delete(ctx: &CommandContext, pid: Option<&str>) -> Result<()> {
    let Some(pid) = pid else {
        cm_println!("{}", MESSAGES.config.delete_usage);
        return Ok(());
    };

    match ctx.commands().delete(pid)? {
        Some(deleted) => {
            cm_println!("{}", msg!(MESSAGES.config.deleted, pid = deleted));
        }
        None => {
            cm_println!("{}", msg!(MESSAGES.config.not_found, pid = pid));
        }
    }
    Ok(())
}
