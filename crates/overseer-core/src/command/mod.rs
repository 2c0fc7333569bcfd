// ── Command API ──
//
// Every operator action is one `Command` variant. Each variant maps to
// exactly one request against the service (method, path, payload below)
// and to fixed success/failure notification texts.

mod dispatcher;

use strum::IntoStaticStr;

pub use dispatcher::CommandDispatcher;
pub use overseer_api::Method;

pub const CHANGE_CONFIRMED: &str = "Change confirmed";
pub const PRINT_CANCELED: &str = "Impresion cancelada / Print canceled";
pub const CANCEL_FAILED: &str =
    "Hubo un error al intentar cancelar la impresion / Error attempting to cancel the print";
pub const PRINTER_TOGGLED: &str = "Printer toggled";
pub const TOGGLE_FAILED: &str = "Error toggling the printer";
pub const ERROR_TITLE: &str = "Error";

/// All operator actions against the print farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    /// The operator swapped the filament on a printer.
    ConfirmFilamentChange { printer_id: u64 },
    /// The operator checked a finished print and reports whether it succeeded.
    ConfirmJobResult { job_id: u64, success: bool },
    /// Abort the active print on a printer.
    CancelPrint { printer_id: u64 },
    /// Reset the service's connection to a printer.
    ResetPrinter { printer_id: u64 },
    /// Flip a printer between enabled and disabled.
    TogglePrinter { printer_id: u64 },
}

/// Title and message of a notification, before severity and ttl are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: String,
}

impl Command {
    /// Short machine-friendly name, e.g. `cancel_print`.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// The printer or job id the command targets.
    pub fn target_id(&self) -> u64 {
        match *self {
            Self::ConfirmJobResult { job_id, .. } => job_id,
            Self::ConfirmFilamentChange { printer_id }
            | Self::CancelPrint { printer_id }
            | Self::ResetPrinter { printer_id }
            | Self::TogglePrinter { printer_id } => printer_id,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::ConfirmFilamentChange { .. } | Self::ConfirmJobResult { .. } => Method::Put,
            Self::CancelPrint { .. } | Self::ResetPrinter { .. } | Self::TogglePrinter { .. } => {
                Method::Get
            }
        }
    }

    /// Endpoint path relative to the service base URL.
    pub fn path(&self) -> String {
        let id = self.target_id();
        match self {
            Self::ConfirmFilamentChange { .. } => {
                format!("operations/confirm_filament_change/{id}/")
            }
            Self::ConfirmJobResult { .. } => format!("operations/confirm_job_result/{id}/"),
            Self::CancelPrint { .. } => format!("operations/cancel_active_task/{id}/"),
            Self::ResetPrinter { .. } => format!("operations/reset_printer/{id}/"),
            Self::TogglePrinter { .. } => format!("operations/toggle_printer_en_dis/{id}/"),
        }
    }

    /// JSON body sent with the request, if any.
    pub fn payload(&self) -> Option<serde_json::Value> {
        match self {
            Self::ConfirmFilamentChange { .. } => Some(serde_json::json!({})),
            Self::ConfirmJobResult { success, .. } => {
                Some(serde_json::json!({ "success": success }))
            }
            Self::CancelPrint { .. } | Self::ResetPrinter { .. } | Self::TogglePrinter { .. } => {
                None
            }
        }
    }

    /// Notification shown when the service accepts the command.
    pub fn success_notice(&self) -> Notice {
        let message = format!("Printer ID: {}", self.target_id());
        let title = match self {
            Self::ConfirmFilamentChange { .. } => CHANGE_CONFIRMED,
            // Reset reuses the cancel-print title, as the farm UI always has.
            Self::ConfirmJobResult { .. }
            | Self::CancelPrint { .. }
            | Self::ResetPrinter { .. } => PRINT_CANCELED,
            Self::TogglePrinter { .. } => PRINTER_TOGGLED,
        };
        Notice { title, message }
    }

    /// Notification shown when the command fails. `None` means the failure
    /// is only logged.
    pub fn failure_notice(&self) -> Option<Notice> {
        match self {
            Self::ConfirmFilamentChange { .. } => None,
            Self::ConfirmJobResult { .. }
            | Self::CancelPrint { .. }
            | Self::ResetPrinter { .. } => Some(Notice {
                title: PRINT_CANCELED,
                message: CANCEL_FAILED.to_owned(),
            }),
            Self::TogglePrinter { .. } => Some(Notice {
                title: ERROR_TITLE,
                message: TOGGLE_FAILED.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn dispatch_table() {
        let cases = [
            (
                Command::ConfirmFilamentChange { printer_id: 7 },
                Method::Put,
                "operations/confirm_filament_change/7/",
                Some(json!({})),
            ),
            (
                Command::ConfirmJobResult {
                    job_id: 12,
                    success: true,
                },
                Method::Put,
                "operations/confirm_job_result/12/",
                Some(json!({ "success": true })),
            ),
            (
                Command::CancelPrint { printer_id: 3 },
                Method::Get,
                "operations/cancel_active_task/3/",
                None,
            ),
            (
                Command::ResetPrinter { printer_id: 4 },
                Method::Get,
                "operations/reset_printer/4/",
                None,
            ),
            (
                Command::TogglePrinter { printer_id: 5 },
                Method::Get,
                "operations/toggle_printer_en_dis/5/",
                None,
            ),
        ];

        for (cmd, method, path, payload) in cases {
            assert_eq!(cmd.method(), method, "{cmd:?}");
            assert_eq!(cmd.path(), path, "{cmd:?}");
            assert_eq!(cmd.payload(), payload, "{cmd:?}");
        }
    }

    #[test]
    fn filament_confirmation_names_the_printer() {
        let notice = Command::ConfirmFilamentChange { printer_id: 7 }.success_notice();
        assert_eq!(notice.title, CHANGE_CONFIRMED);
        assert_eq!(notice.message, "Printer ID: 7");
    }

    #[test]
    fn filament_confirmation_failure_is_silent() {
        assert_eq!(
            Command::ConfirmFilamentChange { printer_id: 7 }.failure_notice(),
            None
        );
    }

    #[test]
    fn reset_keeps_cancel_label() {
        let reset = Command::ResetPrinter { printer_id: 2 };
        assert_eq!(reset.success_notice().title, PRINT_CANCELED);
        assert_eq!(
            reset.failure_notice().map(|n| n.message),
            Some(CANCEL_FAILED.to_owned())
        );
    }

    #[test]
    fn job_result_success_flag_is_kept() {
        let cmd = Command::ConfirmJobResult {
            job_id: 9,
            success: false,
        };
        assert_eq!(cmd.target_id(), 9);
        assert_eq!(cmd.payload(), Some(json!({ "success": false })));
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(Command::CancelPrint { printer_id: 1 }.name(), "cancel_print");
        assert_eq!(Method::Put.to_string(), "PUT");
    }
}
