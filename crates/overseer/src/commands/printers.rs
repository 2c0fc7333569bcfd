//! Printer command handlers.

use tabled::Tabled;

use overseer_core::{Monitor, PrinterStatus};

use crate::cli::{GlobalOpts, PrintersArgs};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PrinterRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Printing")]
    printing: String,
    #[tabled(rename = "Idle")]
    idle: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Needs Operator")]
    attention: String,
}

impl From<&PrinterStatus> for PrinterRow {
    fn from(p: &PrinterStatus) -> Self {
        Self {
            id: p.id,
            name: p.display_name(),
            status: p.display_class.to_string(),
            printing: output::flag(p.printing),
            idle: output::flag(p.idle),
            enabled: output::flag(p.printer_connection_enabled),
            attention: output::flag(p.human_int_req),
        }
    }
}

pub fn render(printers: &[PrinterStatus], global: &GlobalOpts) -> String {
    output::render_list(&global.output, printers, |p| PrinterRow::from(p), |p| {
        p.id.to_string()
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    monitor: &Monitor,
    args: PrintersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut printers = monitor.fetch_printers().await?;
    if let Some(class) = args.class {
        printers.retain(|p| p.display_class == class);
    }
    output::print_output(&render(&printers, global), global.quiet);
    Ok(())
}
