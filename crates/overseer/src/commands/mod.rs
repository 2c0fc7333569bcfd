//! Command dispatch: bridges CLI args -> core Commands -> output formatting.

pub mod config_cmd;
pub mod filament;
pub mod jobs;
pub mod operations;
pub mod printers;
pub mod util;
pub mod watch;

use overseer_core::Monitor;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a one-shot, service-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    monitor: &Monitor,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Printers(args) => printers::handle(monitor, args, global).await,
        Command::Jobs => jobs::handle(monitor, global).await,
        Command::Filament => filament::handle(monitor, global).await,
        Command::ConfirmFilament { printer_id } => {
            operations::confirm_filament(monitor, printer_id).await
        }
        Command::ConfirmJob { job_id, outcome } => {
            operations::confirm_job(monitor, job_id, outcome.is_success()).await
        }
        Command::Cancel { printer_id } => operations::cancel(monitor, printer_id, global).await,
        Command::Reset { printer_id } => operations::reset(monitor, printer_id, global).await,
        Command::Toggle { printer_id } => operations::toggle(monitor, printer_id).await,
        // Watch, Config and Completions are handled before dispatch
        Command::Watch(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
