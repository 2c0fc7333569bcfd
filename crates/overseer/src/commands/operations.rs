//! Operator command handlers.
//!
//! Each handler sends exactly one command and waits for the outcome. The
//! monitor's sink prints the success or failure notification.

use overseer_core::{Command as CoreCommand, Monitor};

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util;

pub async fn confirm_filament(monitor: &Monitor, printer_id: u64) -> Result<(), CliError> {
    monitor.execute(CoreCommand::ConfirmFilamentChange { printer_id }).await?;
    Ok(())
}

pub async fn confirm_job(monitor: &Monitor, job_id: u64, success: bool) -> Result<(), CliError> {
    monitor.execute(CoreCommand::ConfirmJobResult { job_id, success }).await?;
    Ok(())
}

pub async fn cancel(
    monitor: &Monitor,
    printer_id: u64,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let prompt = format!("Cancel the active print on printer {printer_id}?");
    if !util::confirm(&prompt, global.yes)? {
        return Ok(());
    }
    monitor.execute(CoreCommand::CancelPrint { printer_id }).await?;
    Ok(())
}

pub async fn reset(
    monitor: &Monitor,
    printer_id: u64,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !util::confirm(&format!("Reset printer {printer_id}?"), global.yes)? {
        return Ok(());
    }
    monitor.execute(CoreCommand::ResetPrinter { printer_id }).await?;
    Ok(())
}

pub async fn toggle(monitor: &Monitor, printer_id: u64) -> Result<(), CliError> {
    monitor.execute(CoreCommand::TogglePrinter { printer_id }).await?;
    Ok(())
}
