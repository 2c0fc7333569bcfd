// ── Print job domain types ──

use serde::{Deserialize, Serialize};

/// A finished print waiting for the operator to confirm its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJob {
    pub id: u64,
    pub printer_id: Option<u64>,
    pub printer_name: Option<String>,
    /// Job metadata. Not interpreted by the monitor.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl PrintJob {
    /// Look up a metadata attribute as a string, if present.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(serde_json::Value::as_str)
    }
}
