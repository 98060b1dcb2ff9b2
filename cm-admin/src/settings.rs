//! Tool settings for the cm CLI.
//!
//! Read from `~/.cm/config.yaml` (or the file named by `CM_CONFIG`). Every
//! field is optional; a missing file means defaults.

use cm_core::error::{CmError, Result};
use cm_core::user_paths;
use serde::{Deserialize, Serialize};
use serde_yaml_ng as serde_yaml;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const CONFIG_ENV: &str = "CM_CONFIG";
pub const STORE_DIR_ENV: &str = "CM_STORE_DIR";

fn default_fetch_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Directory of the file-backed configuration store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<String>,

    /// Timeout for fetching HTTP payloads
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            store_dir: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl ToolSettings {
    /// Load from `CM_CONFIG` or `~/.cm/config.yaml`.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => user_paths::tool_config_path()?,
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| {
            CmError::Config(format!("Invalid settings file {}: {}", path.display(), e))
        })
    }

    /// Store directory by precedence: explicit override, `CM_STORE_DIR`,
    /// the settings file, then `~/.cm/store`.
    pub fn resolve_store_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = std::env::var_os(STORE_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = &self.store_dir {
            return Ok(PathBuf::from(shellexpand::tilde(dir).into_owned()));
        }
        user_paths::default_store_dir()
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = ToolSettings::load_from(&temp_dir.path().join("config.yaml")).unwrap();
        assert_eq!(settings, ToolSettings::default());
        assert_eq!(settings.fetch_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "store_dir: /srv/cm\nfetch_timeout_secs: 5\n").unwrap();
        let settings = ToolSettings::load_from(&path).unwrap();
        assert_eq!(settings.store_dir.as_deref(), Some("/srv/cm"));
        assert_eq!(settings.fetch_timeout_secs, 5);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "fetch_timeout_secs: soon\n").unwrap();
        assert!(matches!(
            ToolSettings::load_from(&path),
            Err(CmError::Config(_))
        ));
    }

    #[test]
    fn test_override_wins() {
        let settings = ToolSettings {
            store_dir: Some("/from/file".into()),
            ..Default::default()
        };
        let dir = settings
            .resolve_store_dir(Some(Path::new("/from/flag")))
            .unwrap();
        assert_eq!(dir, PathBuf::from("/from/flag"));
    }
}
