//! The configuration store seam.
//!
//! The commands layer talks to the store only through [`ConfigurationStore`].
//! Two adapters ship with the crate: [`MemoryStore`] for embedding and tests,
//! and [`FileStore`], a locked YAML file used by the `cm` binary.
//!
//! Records handed out by `get_or_create_singleton` and
//! `create_factory_instance` are not visible to `query` until their
//! properties have been written.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::record::{ConfigurationRecord, Properties};
use cm_core::error::{CmError, Result};

pub trait ConfigurationStore: Send + Sync {
    /// Whether the store can currently be reached.
    fn is_available(&self) -> bool;

    /// Records matching `filter`, or every record when `filter` is `None`.
    fn query(&self, filter: Option<&str>) -> Result<Vec<ConfigurationRecord>>;

    /// The record with this exact PID, or a new unsaved one. Idempotent.
    fn get_or_create_singleton(&self, pid: &str) -> Result<ConfigurationRecord>;

    /// A new instance of `factory_pid` with a store-assigned PID.
    fn create_factory_instance(&self, factory_pid: &str) -> Result<ConfigurationRecord>;

    /// Replace the record's properties and persist it.
    fn write_properties(&self, record: &mut ConfigurationRecord, properties: Properties)
        -> Result<()>;

    /// Unbind the record from whatever last claimed it.
    fn clear_binding(&self, record: &mut ConfigurationRecord) -> Result<()>;

    /// Remove exactly this record.
    fn delete(&self, record: &ConfigurationRecord) -> Result<()>;

    fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(CmError::StoreUnavailable)
        }
    }
}

/// PID for a new factory configuration instance.
pub(crate) fn new_instance_pid(factory_pid: &str) -> String {
    format!("{factory_pid}.{}", uuid::Uuid::new_v4())
}
