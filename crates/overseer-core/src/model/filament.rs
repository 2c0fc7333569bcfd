// ── Filament change domain types ──

use serde::{Deserialize, Serialize};

/// A filament swap the service is waiting for an operator to confirm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilamentChangeRequest {
    pub id: u64,
    pub printer_id: Option<u64>,
    pub printer_name: Option<String>,
    /// Remaining attributes as sent by the service.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}
