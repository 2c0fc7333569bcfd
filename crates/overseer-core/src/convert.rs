// ── API-to-domain type conversions ──
//
// Bridges raw `overseer_api` records into `overseer_core::model` types.
// Printer conversion is where display classification happens, so every
// fetched printer row gets a fresh `display_class`.

use overseer_api::{PrinterRef, RawFilamentChange, RawPrintJob, RawPrinter};

use crate::classify::classify;
use crate::model::{FilamentChangeRequest, PrintJob, PrinterStatus, StatusFlags};

fn split_ref(printer: Option<&PrinterRef>) -> (Option<u64>, Option<String>) {
    printer.map_or((None, None), |r| (Some(r.id()), r.name().map(str::to_owned)))
}

impl From<RawPrinter> for PrinterStatus {
    fn from(raw: RawPrinter) -> Self {
        let display_class = classify(StatusFlags {
            human_int_req: raw.human_int_req,
            printer_connection_enabled: raw.printer_connection_enabled,
            printing: raw.printing,
            idle: raw.idle,
        });

        Self {
            id: raw.id,
            name: raw.name,
            human_int_req: raw.human_int_req,
            printer_connection_enabled: raw.printer_connection_enabled,
            printing: raw.printing,
            idle: raw.idle,
            display_class,
            attributes: raw.extra,
        }
    }
}

impl From<RawPrintJob> for PrintJob {
    fn from(raw: RawPrintJob) -> Self {
        let (printer_id, printer_name) = split_ref(raw.printer.as_ref());
        Self {
            id: raw.id,
            printer_id,
            printer_name,
            metadata: raw.extra,
        }
    }
}

impl From<RawFilamentChange> for FilamentChangeRequest {
    fn from(raw: RawFilamentChange) -> Self {
        let (printer_id, printer_name) = split_ref(raw.printer.as_ref());
        Self {
            id: raw.id,
            printer_id,
            printer_name,
            attributes: raw.extra,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::DisplayClass;

    fn raw_printer(value: serde_json::Value) -> RawPrinter {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn printer_conversion_classifies() {
        let p = PrinterStatus::from(raw_printer(json!({
            "id": 1,
            "idle": true,
            "printer_connection_enabled": true,
            "printing": false,
            "human_int_req": false
        })));
        assert_eq!(p.display_class, DisplayClass::Active);

        let p = PrinterStatus::from(raw_printer(json!({
            "id": 2,
            "printer_connection_enabled": false
        })));
        assert_eq!(p.display_class, DisplayClass::Danger);
    }

    #[test]
    fn printer_conversion_keeps_extra_attributes() {
        let p = PrinterStatus::from(raw_printer(json!({
            "id": 4,
            "name": "Prusa-04",
            "remaining_time": 90
        })));
        assert_eq!(p.name.as_deref(), Some("Prusa-04"));
        assert_eq!(p.attributes.get("remaining_time"), Some(&json!(90)));
    }

    #[test]
    fn embedded_printer_reference_is_flattened() {
        let raw: RawPrintJob = serde_json::from_value(json!({
            "id": 8,
            "printer": { "id": 3, "name": "Ender-03" },
            "file_name": "hinge.gcode"
        }))
        .unwrap();
        let job = PrintJob::from(raw);
        assert_eq!(job.printer_id, Some(3));
        assert_eq!(job.printer_name.as_deref(), Some("Ender-03"));
        assert_eq!(job.metadata_str("file_name"), Some("hinge.gcode"));
    }

    #[test]
    fn missing_printer_reference_is_none() {
        let raw: RawFilamentChange = serde_json::from_value(json!({ "id": 5 })).unwrap();
        let change = FilamentChangeRequest::from(raw);
        assert_eq!(change.printer_id, None);
        assert_eq!(change.printer_name, None);
    }
}
