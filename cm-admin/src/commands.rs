//! Install, list, show and delete over a [`ConfigurationStore`].
//!
//! Lookup precedence differs between the two paths on purpose:
//! - `show`/`delete` resolve an exact PID first and only then try the token as
//!   `factory-alias`.
//! - `install` decides singleton versus factory instance from the token's
//!   shape alone, then matches factory instances by alias.

use crate::identifier::{
    build_alias_filter, build_exact_pid_filter, split_identifier, strip_file_name_to_token,
};
use crate::payload::PayloadSource;
use crate::record::{set_alias, ConfigurationRecord, Properties};
use crate::store::ConfigurationStore;
use cm_core::error::Result;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// One line of `listConfigs` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    pub pid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory_pid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_pid: Option<String>,
}

impl From<&ConfigurationRecord> for ConfigSummary {
    fn from(record: &ConfigurationRecord) -> Self {
        Self {
            pid: record.pid.clone(),
            factory_pid: record.factory_pid.clone(),
            alias_pid: record.alias().map(str::to_string),
        }
    }
}

impl fmt::Display for ConfigSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PID: {}", self.pid)?;
        if let Some(factory_pid) = &self.factory_pid {
            write!(f, ", Factory_PID: {factory_pid}")?;
        }
        if let Some(alias) = &self.alias_pid {
            write!(f, ", Alias_PID: {alias}")?;
        }
        Ok(())
    }
}

/// Configuration commands bound to one store handle.
pub struct ConfigurationCommands<S> {
    store: S,
}

impl<S: ConfigurationStore> ConfigurationCommands<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Find the record a token refers to: exact PID first, then the
    /// `factory-alias` interpretation.
    pub fn resolve(&self, token: &str) -> Result<Option<ConfigurationRecord>> {
        let by_pid = self.store.query(Some(&build_exact_pid_filter(token)))?;
        if let Some(record) = by_pid.into_iter().next() {
            return Ok(Some(record));
        }

        let id = split_identifier(token);
        let Some(factory) = id.factory else {
            return Ok(None);
        };
        let by_alias = self
            .store
            .query(Some(&build_alias_filter(&id.leaf, &factory)))?;
        Ok(by_alias.into_iter().next())
    }

    /// Write `payload` as the complete property set of the configuration
    /// named by `source_name`, returning its PID.
    ///
    /// Re-installing the same `factory-alias` source updates the existing
    /// instance instead of creating another one.
    pub fn install(&self, source_name: &str, mut payload: Properties) -> Result<String> {
        self.store.ensure_available()?;

        let token = strip_file_name_to_token(source_name);
        let id = split_identifier(&token);

        let mut record = match &id.factory {
            None => self.store.get_or_create_singleton(&id.leaf)?,
            Some(factory) => {
                set_alias(&mut payload, &id.leaf);
                let existing = self
                    .store
                    .query(Some(&build_alias_filter(&id.leaf, factory)))?;
                match existing.into_iter().next() {
                    Some(record) => {
                        debug!(pid = %record.pid, alias = %id.leaf, "reusing factory instance");
                        record
                    }
                    None => self.store.create_factory_instance(factory)?,
                }
            }
        };

        if record.is_bound() {
            self.store.clear_binding(&mut record)?;
        }
        self.store.write_properties(&mut record, payload)?;

        info!(
            pid = %record.pid,
            factory_pid = record.factory_pid.as_deref().unwrap_or(""),
            source = %source_name,
            "installed configuration"
        );
        Ok(record.pid)
    }

    /// Fetch a payload and install it. Nothing is written unless the payload
    /// was read completely.
    pub fn install_from(&self, source: &PayloadSource, timeout: Duration) -> Result<String> {
        self.store.ensure_available()?;
        let payload = source.fetch(timeout)?;
        self.install(&payload.naming_path, payload.properties)
    }

    pub fn list(&self) -> Result<Vec<ConfigSummary>> {
        self.store.ensure_available()?;
        let records = self.store.query(None)?;
        Ok(records.iter().map(ConfigSummary::from).collect())
    }

    /// Properties of the configuration a token refers to, in stored order.
    pub fn show(&self, token: &str) -> Result<Option<Properties>> {
        self.store.ensure_available()?;
        Ok(self.resolve(token)?.map(|record| record.properties))
    }

    /// Delete the configuration a token refers to, returning its PID.
    pub fn delete(&self, token: &str) -> Result<Option<String>> {
        self.store.ensure_available()?;
        let Some(record) = self.resolve(token)? else {
            debug!(token = %token, "nothing to delete");
            return Ok(None);
        };
        self.store.delete(&record)?;
        info!(pid = %record.pid, "deleted configuration");
        Ok(Some(record.pid))
    }
}
