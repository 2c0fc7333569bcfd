//! Filament change command handlers.

use tabled::Tabled;

use overseer_core::{FilamentChangeRequest, Monitor};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct FilamentRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Printer")]
    printer: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl From<&FilamentChangeRequest> for FilamentRow {
    fn from(c: &FilamentChangeRequest) -> Self {
        Self {
            id: c.id,
            printer: util::printer_label(c.printer_id, c.printer_name.as_deref()),
            details: util::summarize(&c.attributes),
        }
    }
}

pub fn render(changes: &[FilamentChangeRequest], global: &GlobalOpts) -> String {
    // Plain output lists printer ids: that is what confirm-filament takes.
    output::render_list(&global.output, changes, |c| FilamentRow::from(c), |c| {
        c.printer_id.map_or_else(String::new, |id| id.to_string())
    })
}

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let changes = monitor.fetch_filament_changes().await?;
    output::print_output(&render(&changes, global), global.quiet);
    Ok(())
}
