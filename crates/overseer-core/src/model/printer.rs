// ── Printer domain types ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Display category for a printer row.
///
/// Derived from the status flags by [`crate::classify`]; never sent back to
/// the service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DisplayClass {
    /// Needs a human at the machine.
    Warning,
    /// Connection to the printer is disabled.
    Danger,
    /// Printing.
    Success,
    /// Idle and reachable.
    Active,
    /// None of the above.
    Info,
}

impl DisplayClass {
    /// Row style tag used by table renderers (`table-warning`, ...).
    pub fn row_style(self) -> &'static str {
        match self {
            Self::Warning => "table-warning",
            Self::Danger => "table-danger",
            Self::Success => "table-success",
            Self::Active => "table-active",
            Self::Info => "table-info",
        }
    }
}

/// The four raw status flags a printer reports.
///
/// Each flag is tri-state: the service omits flags it has no value for,
/// and an omitted flag matches neither `true` nor `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StatusFlags {
    pub human_int_req: Option<bool>,
    pub printer_connection_enabled: Option<bool>,
    pub printing: Option<bool>,
    pub idle: Option<bool>,
}

/// One printer row as held in the printer snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterStatus {
    pub id: u64,
    pub name: Option<String>,
    pub human_int_req: Option<bool>,
    pub printer_connection_enabled: Option<bool>,
    pub printing: Option<bool>,
    pub idle: Option<bool>,
    /// Recomputed from the flags on every fetch.
    pub display_class: DisplayClass,
    /// Remaining attributes (remaining time, file name, ...).
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl PrinterStatus {
    pub fn flags(&self) -> StatusFlags {
        StatusFlags {
            human_int_req: self.human_int_req,
            printer_connection_enabled: self.printer_connection_enabled,
            printing: self.printing,
            idle: self.idle,
        }
    }

    /// Name for display, falling back to `#<id>`.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}
