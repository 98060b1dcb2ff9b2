//! Configuration Admin command library.
//!
//! Maps loosely structured identifiers onto records held by a configuration
//! store and implements the install, list, show and delete operations on top
//! of an injected [`ConfigurationStore`].
//!
//! ## Main Features
//! - Identifier decomposition (`alias-factory` tokens) and filter construction
//! - Create-or-update installation of properties payloads
//! - In-memory and file-backed store adapters
//! - Properties-text parsing and payload fetching (file paths, `file:` and HTTP URLs)

pub mod commands;
pub mod filter;
pub mod identifier;
pub mod payload;
pub mod properties;
pub mod record;
pub mod settings;
pub mod store;

pub use commands::{ConfigSummary, ConfigurationCommands};
pub use identifier::ConfigurationIdentifier;
pub use record::{ConfigurationRecord, Properties, ALIAS_PROPERTY};
pub use settings::ToolSettings;
pub use store::{ConfigurationStore, FileStore, MemoryStore};
