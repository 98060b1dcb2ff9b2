//! Configuration records as seen through the store interface.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered string properties of a configuration.
pub type Properties = IndexMap<String, String>;

/// Filter attribute naming a record's PID.
pub const SERVICE_PID: &str = "service.pid";

/// Filter attribute naming a record's factory PID.
pub const SERVICE_FACTORY_PID: &str = "service.factoryPid";

/// Property holding the operator-chosen alias of a factory configuration
/// instance. Stored as an ordinary property so the store needs no schema.
pub const ALIAS_PROPERTY: &str = "_alias_pid";

/// One configuration held by the store.
///
/// The store owns records; the commands layer only ever holds a snapshot
/// returned by the latest query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRecord {
    pub pid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_pid: Option<String>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_location: Option<String>,
}

impl ConfigurationRecord {
    pub fn singleton(pid: impl Into<String>) -> Self {
        Self {
            pid: pid.into(),
            factory_pid: None,
            properties: Properties::new(),
            bundle_location: None,
        }
    }

    pub fn factory_instance(pid: impl Into<String>, factory_pid: impl Into<String>) -> Self {
        Self {
            pid: pid.into(),
            factory_pid: Some(factory_pid.into()),
            properties: Properties::new(),
            bundle_location: None,
        }
    }

    /// Alias recorded for a factory configuration instance, if any.
    pub fn alias(&self) -> Option<&str> {
        self.properties.get(ALIAS_PROPERTY).map(String::as_str)
    }

    pub fn is_bound(&self) -> bool {
        self.bundle_location.is_some()
    }

    /// Value of a filter attribute: the two service attributes map onto the
    /// record fields, anything else onto a property. Names are matched
    /// case-insensitively.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        if name.eq_ignore_ascii_case(SERVICE_PID) {
            return Some(&self.pid);
        }
        if name.eq_ignore_ascii_case(SERVICE_FACTORY_PID) {
            return self.factory_pid.as_deref();
        }
        self.properties
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Sets the alias property on a payload about to be written.
pub fn set_alias(properties: &mut Properties, alias: &str) {
    properties.insert(ALIAS_PROPERTY.to_string(), alias.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_comes_from_property() {
        let mut record = ConfigurationRecord::factory_instance("db.1", "db");
        assert_eq!(record.alias(), None);
        set_alias(&mut record.properties, "pool1");
        assert_eq!(record.alias(), Some("pool1"));
    }

    #[test]
    fn test_attribute_lookup() {
        let mut record = ConfigurationRecord::factory_instance("db.1", "db");
        record.properties.insert("Host".into(), "localhost".into());

        assert_eq!(record.attribute("service.pid"), Some("db.1"));
        assert_eq!(record.attribute("SERVICE.FACTORYPID"), Some("db"));
        assert_eq!(record.attribute("host"), Some("localhost"));
        assert_eq!(record.attribute("port"), None);

        let singleton = ConfigurationRecord::singleton("myservice");
        assert_eq!(singleton.attribute("service.factoryPid"), None);
    }
}
