//! Shared messages across commands

pub struct CommonMessages {
    pub error_generic: &'static str,
    pub store_unavailable: &'static str,
    pub store_location_hint: &'static str,
}

pub const COMMON_MESSAGES: CommonMessages = CommonMessages {
    error_generic: "❌ Error: {error}",
    store_unavailable: "Configuration Admin service not available",
    store_location_hint: "Store directory {path} does not exist. Install a configuration first or pass --store <dir>",
};
