//! Central registry for all user-facing message templates.
//!
//! - `config` - configuration command output (install, list, show, delete)
//! - `common` - shared messages such as generic failures and store status
//!
//! ```rust
//! use cm_messages::messages::MESSAGES;
//!
//! let usage = MESSAGES.config.install_usage;
//! assert_eq!(usage, "Usage: installConfig <url>");
//! ```

mod common;
mod config;

pub use common::{CommonMessages, COMMON_MESSAGES};
pub use config::{ConfigMessages, CONFIG_MESSAGES};

pub struct Messages {
    pub config: ConfigMessages,
    pub common: CommonMessages,
}

pub const MESSAGES: Messages = Messages {
    config: CONFIG_MESSAGES,
    common: COMMON_MESSAGES,
};
