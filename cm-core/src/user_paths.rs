//! Well-known locations for cm's own files.
//!
//! Everything lives under `~/.cm`. Environment overrides are resolved by the
//! callers so tests can point the tool at a temporary directory.

use crate::error::{CmError, Result};
use std::path::PathBuf;

/// `~/.cm`
pub fn cm_home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".cm"))
        .ok_or_else(|| CmError::Internal("Could not determine home directory".to_string()))
}

/// `~/.cm/config.yaml`
pub fn tool_config_path() -> Result<PathBuf> {
    Ok(cm_home_dir()?.join("config.yaml"))
}

/// `~/.cm/store`
pub fn default_store_dir() -> Result<PathBuf> {
    Ok(cm_home_dir()?.join("store"))
}
