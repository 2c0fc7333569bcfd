// skynet API response types
//
// List endpoints return bare JSON arrays of flat records. Fields use
// `#[serde(default)]` liberally: the service omits attributes that are
// null on the model, and the status flags are meaningful only when present.

use serde::{Deserialize, Serialize};

// ── Printer reference ────────────────────────────────────────────────

/// How a job or filament change points at its printer.
///
/// Depending on serializer depth the service sends either the bare
/// primary key or a nested printer object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrinterRef {
    Id(u64),
    Embedded {
        id: u64,
        #[serde(default)]
        name: Option<String>,
    },
}

impl PrinterRef {
    /// The referenced printer's primary key.
    pub fn id(&self) -> u64 {
        match self {
            Self::Id(id) | Self::Embedded { id, .. } => *id,
        }
    }

    /// The printer name, when the reference embeds it.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Embedded { name, .. } => name.as_deref(),
        }
    }
}

// ── Printer ──────────────────────────────────────────────────────────

/// One row of `list/printers/`.
///
/// The four status flags are kept as `Option<bool>`: an absent flag is
/// neither true nor false for display classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPrinter {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub human_int_req: Option<bool>,
    #[serde(default)]
    pub printer_connection_enabled: Option<bool>,
    #[serde(default)]
    pub printing: Option<bool>,
    #[serde(default)]
    pub idle: Option<bool>,
    /// Catch-all for the remaining printer attributes.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Print job ────────────────────────────────────────────────────────

/// One row of `list/print_jobs_pending_for_confirmation/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPrintJob {
    pub id: u64,
    #[serde(default)]
    pub printer: Option<PrinterRef>,
    /// Job metadata (file, piece, timings). Opaque to the client.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Filament change ──────────────────────────────────────────────────

/// One row of `list/pending_filament_changes/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFilamentChange {
    pub id: u64,
    #[serde(default)]
    pub printer: Option<PrinterRef>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
