// skynet list endpoints
//
// Each returns every currently pending record of one resource type.
// No pagination: the service answers with the whole array.

use tracing::debug;

use crate::error::Error;
use crate::skynet::client::SkynetClient;
use crate::skynet::models::{RawFilamentChange, RawPrintJob, RawPrinter};

impl SkynetClient {
    /// List filament changes not yet confirmed by an operator.
    ///
    /// `GET list/pending_filament_changes/?format=json`
    pub async fn list_pending_filament_changes(&self) -> Result<Vec<RawFilamentChange>, Error> {
        debug!("listing pending filament changes");
        self.get_list("list/pending_filament_changes/").await
    }

    /// List finished jobs waiting for the operator to confirm the result.
    ///
    /// `GET list/print_jobs_pending_for_confirmation/?format=json`
    pub async fn list_print_jobs_pending_for_confirmation(
        &self,
    ) -> Result<Vec<RawPrintJob>, Error> {
        debug!("listing print jobs pending for confirmation");
        self.get_list("list/print_jobs_pending_for_confirmation/")
            .await
    }

    /// List every printer with its raw status flags.
    ///
    /// `GET list/printers/?format=json`
    pub async fn list_printers(&self) -> Result<Vec<RawPrinter>, Error> {
        debug!("listing printers");
        self.get_list("list/printers/").await
    }
}
