//! File-backed configuration store.
//!
//! All records live in `<dir>/configurations.yaml`. Every operation takes an
//! exclusive lock on `<dir>/.store.lock`, and writes go through a temporary
//! file that is persisted over the data file.

use super::{new_instance_pid, ConfigurationStore};
use crate::filter;
use crate::record::{ConfigurationRecord, Properties};
use cm_core::error::{CmError, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use serde_yaml_ng as serde_yaml;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DATA_FILE: &str = "configurations.yaml";
const LOCK_FILE: &str = ".store.lock";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreContents {
    #[serde(default)]
    configurations: Vec<ConfigurationRecord>,
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    data_file: PathBuf,
    lock_file: PathBuf,
}

impl FileStore {
    /// A store rooted at `dir`. The directory is not created; while it is
    /// missing the store reports itself unavailable.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let data_file = dir.join(DATA_FILE);
        let lock_file = dir.join(LOCK_FILE);
        Self {
            dir,
            data_file,
            lock_file,
        }
    }

    /// Like [`FileStore::open`], creating the directory first.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::open(dir);
        if !store.dir.is_dir() {
            fs::create_dir_all(&store.dir).map_err(|e| {
                CmError::Internal(format!(
                    "Failed to create store directory {}: {}",
                    store.dir.display(),
                    e
                ))
            })?;
            info!(dir = %store.dir.display(), "created configuration store");
        }
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn acquire_lock(&self) -> Result<File> {
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&self.lock_file)?;

        lock_file.lock_exclusive().map_err(|e| {
            CmError::Internal(format!(
                "Failed to acquire lock {}: {}",
                self.lock_file.display(),
                e
            ))
        })?;

        Ok(lock_file)
    }

    fn load(&self) -> Result<StoreContents> {
        if !self.data_file.exists() {
            return Ok(StoreContents::default());
        }
        let content = fs::read_to_string(&self.data_file)?;
        if content.trim().is_empty() {
            return Ok(StoreContents::default());
        }
        serde_yaml::from_str(&content).map_err(|e| {
            CmError::Serialization(format!(
                "Failed to parse store file {}: {}",
                self.data_file.display(),
                e
            ))
        })
    }

    fn save(&self, contents: &StoreContents) -> Result<()> {
        let yaml = serde_yaml::to_string(contents)?;

        let temp_file = tempfile::Builder::new()
            .prefix("configurations-")
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        temp_file.as_file().write_all(yaml.as_bytes())?;
        temp_file.persist(&self.data_file).map_err(|e| {
            CmError::Internal(format!(
                "Failed to move store file to {}: {}",
                self.data_file.display(),
                e.error
            ))
        })?;
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&StoreContents) -> Result<T>) -> Result<T> {
        self.ensure_available()?;
        let _lock = self.acquire_lock()?;
        f(&self.load()?)
    }

    fn modify<T>(&self, f: impl FnOnce(&mut StoreContents) -> T) -> Result<T> {
        self.ensure_available()?;
        let _lock = self.acquire_lock()?;
        let mut contents = self.load()?;
        let result = f(&mut contents);
        self.save(&contents)?;
        Ok(result)
    }
}

impl ConfigurationStore for FileStore {
    fn is_available(&self) -> bool {
        self.dir.is_dir()
    }

    fn query(&self, filter: Option<&str>) -> Result<Vec<ConfigurationRecord>> {
        self.read(|contents| filter::select(&contents.configurations, filter))
    }

    fn get_or_create_singleton(&self, pid: &str) -> Result<ConfigurationRecord> {
        self.read(|contents| {
            Ok(contents
                .configurations
                .iter()
                .find(|record| record.pid == pid)
                .cloned()
                .unwrap_or_else(|| ConfigurationRecord::singleton(pid)))
        })
    }

    fn create_factory_instance(&self, factory_pid: &str) -> Result<ConfigurationRecord> {
        self.ensure_available()?;
        let pid = new_instance_pid(factory_pid);
        debug!(pid = %pid, factory_pid = %factory_pid, "allocated factory instance");
        Ok(ConfigurationRecord::factory_instance(pid, factory_pid))
    }

    fn write_properties(
        &self,
        record: &mut ConfigurationRecord,
        properties: Properties,
    ) -> Result<()> {
        self.ensure_available()?;
        record.properties = properties;
        let updated = record.clone();
        self.modify(|contents| {
            match contents
                .configurations
                .iter_mut()
                .find(|stored| stored.pid == updated.pid)
            {
                Some(stored) => *stored = updated,
                None => contents.configurations.push(updated),
            }
        })
    }

    fn clear_binding(&self, record: &mut ConfigurationRecord) -> Result<()> {
        record.bundle_location = None;
        let pid = record.pid.clone();
        self.modify(|contents| {
            if let Some(stored) = contents.configurations.iter_mut().find(|r| r.pid == pid) {
                stored.bundle_location = None;
            }
        })
    }

    fn delete(&self, record: &ConfigurationRecord) -> Result<()> {
        self.modify(|contents| contents.configurations.retain(|r| r.pid != record.pid))
    }
}
