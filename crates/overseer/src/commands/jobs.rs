//! Print job command handlers.

use tabled::Tabled;

use overseer_core::{Monitor, PrintJob};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Printer")]
    printer: String,
    #[tabled(rename = "File")]
    file: String,
}

impl From<&PrintJob> for JobRow {
    fn from(j: &PrintJob) -> Self {
        Self {
            id: j.id,
            printer: util::printer_label(j.printer_id, j.printer_name.as_deref()),
            file: j
                .metadata_str("file_name")
                .or_else(|| j.metadata_str("name"))
                .unwrap_or("-")
                .to_owned(),
        }
    }
}

pub fn render(jobs: &[PrintJob], global: &GlobalOpts) -> String {
    output::render_list(&global.output, jobs, |j| JobRow::from(j), |j| j.id.to_string())
}

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let jobs = monitor.fetch_print_jobs().await?;
    output::print_output(&render(&jobs, global), global.quiet);
    Ok(())
}
