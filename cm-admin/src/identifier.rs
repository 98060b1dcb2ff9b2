//! Identifier decomposition and store filter construction.
//!
//! A token names either a plain configuration (`myservice`) or a factory
//! configuration instance (`db-pool1`: factory `db`, alias `pool1`). Only the
//! last hyphen separates the two parts.
//!
//! Filters are flat equality expressions built by concatenation. Values are
//! not escaped, so identifiers must not contain `(`, `)`, `\` or `*`.

use crate::record::{ALIAS_PROPERTY, SERVICE_FACTORY_PID, SERVICE_PID};

/// Parsed form of a user-supplied token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationIdentifier {
    /// Plain PID when `factory` is `None`, otherwise the alias.
    pub leaf: String,
    pub factory: Option<String>,
}

/// Splits `token` on its last `-`. Never fails.
pub fn split_identifier(token: &str) -> ConfigurationIdentifier {
    match token.rsplit_once('-') {
        Some((factory, leaf)) => ConfigurationIdentifier {
            leaf: leaf.to_string(),
            factory: Some(factory.to_string()),
        },
        None => ConfigurationIdentifier {
            leaf: token.to_string(),
            factory: None,
        },
    }
}

/// Reduces a URL path or filename to the token that names the configuration:
/// the last path segment with its final extension removed.
///
/// A name whose only dot is the first character (`.env`) yields `""`.
pub fn strip_file_name_to_token(path: &str) -> String {
    let file_name = path.rsplit_once('/').map_or(path, |(_, name)| name);
    let token = file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem);
    token.to_string()
}

/// `(service.pid=<pid>)`
pub fn build_exact_pid_filter(pid: &str) -> String {
    format!("({SERVICE_PID}={pid})")
}

/// `(&(service.factoryPid=<factory_pid>)(_alias_pid=<alias>))`
pub fn build_alias_filter(alias: &str, factory_pid: &str) -> String {
    format!("(&({SERVICE_FACTORY_PID}={factory_pid})({ALIAS_PROPERTY}={alias}))")
}
