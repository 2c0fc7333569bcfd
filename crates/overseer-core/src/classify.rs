// ── Printer status classification ──
//
// Maps a printer's raw flags to exactly one display category. Rules are
// evaluated top to bottom and the first match wins.

use crate::model::{DisplayClass, StatusFlags};

/// Classify a printer by its status flags.
///
/// 1. human intervention required → [`DisplayClass::Warning`]
/// 2. connection explicitly disabled → [`DisplayClass::Danger`]
/// 3. printing → [`DisplayClass::Success`]
/// 4. idle → [`DisplayClass::Active`]
/// 5. otherwise → [`DisplayClass::Info`]
///
/// Absent flags never match: a printer that does not report
/// `printer_connection_enabled` is not treated as disconnected.
pub fn classify(flags: StatusFlags) -> DisplayClass {
    if flags.human_int_req == Some(true) {
        DisplayClass::Warning
    } else if flags.printer_connection_enabled == Some(false) {
        DisplayClass::Danger
    } else if flags.printing == Some(true) {
        DisplayClass::Success
    } else if flags.idle == Some(true) {
        DisplayClass::Active
    } else {
        DisplayClass::Info
    }
}
