use super::{new_instance_pid, ConfigurationStore};
use crate::filter;
use crate::record::{ConfigurationRecord, Properties};
use cm_core::error::{CmError, Result};
use indexmap::IndexMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Store kept entirely in memory, in insertion order.
#[derive(Debug)]
pub struct MemoryStore {
    records: Mutex<IndexMap<String, ConfigurationRecord>>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(IndexMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate the store going away or coming back.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Put a record into the store as-is, replacing any record with its PID.
    pub fn insert(&self, record: ConfigurationRecord) -> Result<()> {
        self.lock()?.insert(record.pid.clone(), record);
        Ok(())
    }

    /// Every stored record, in insertion order.
    pub fn snapshot(&self) -> Result<Vec<ConfigurationRecord>> {
        Ok(self.lock()?.values().cloned().collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, IndexMap<String, ConfigurationRecord>>> {
        self.records
            .lock()
            .map_err(|_| CmError::Internal("memory store lock poisoned".to_string()))
    }
}

impl ConfigurationStore for MemoryStore {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn query(&self, filter: Option<&str>) -> Result<Vec<ConfigurationRecord>> {
        self.ensure_available()?;
        let records = self.lock()?;
        filter::select(records.values(), filter)
    }

    fn get_or_create_singleton(&self, pid: &str) -> Result<ConfigurationRecord> {
        self.ensure_available()?;
        let records = self.lock()?;
        Ok(records
            .get(pid)
            .cloned()
            .unwrap_or_else(|| ConfigurationRecord::singleton(pid)))
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
        self.lock()?.insert(record.pid.clone(), record.clone());
        Ok(())
    }

    fn clear_binding(&self, record: &mut ConfigurationRecord) -> Result<()> {
        self.ensure_available()?;
        record.bundle_location = None;
        if let Some(stored) = self.lock()?.get_mut(&record.pid) {
            stored.bundle_location = None;
        }
        Ok(())
    }

    fn delete(&self, record: &ConfigurationRecord) -> Result<()> {
        self.ensure_available()?;
        self.lock()?.shift_remove(&record.pid);
        Ok(())
    }
}
