// ── Domain model ──
//
// Canonical types for the three polled resources. Raw wire records from
// `overseer_api` are converted into these in `crate::convert`.

pub mod filament;
pub mod job;
pub mod printer;

pub use filament::FilamentChangeRequest;
pub use job::PrintJob;
pub use printer::{DisplayClass, PrinterStatus, StatusFlags};
