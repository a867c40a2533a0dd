//! Serde types for the key-value listing envelope.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Flattened configuration: key to value.
pub type ConfigMap = HashMap<String, String>;

/// One key-value record as returned by the service.
///
/// Service metadata (`etag`, `label`, `content_type`, `tags`, `locked`,
/// `last_modified`) is present on the wire but not modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// The configuration key.
    pub key: String,
    /// The configuration value.
    pub value: String,
}

/// The response envelope of a key-value listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvResponse {
    /// Records in the order the service returned them.
    pub items: Vec<ConfigEntry>,
}

impl KvResponse {
    /// Flatten the records into a map; a repeated key keeps its last value.
    #[must_use]
    pub fn into_config_map(self) -> ConfigMap {
        self.items
            .into_iter()
            .map(|entry| (entry.key, entry.value))
            .collect()
    }
}
