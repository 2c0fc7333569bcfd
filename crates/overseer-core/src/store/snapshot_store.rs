// ── Central snapshot store ──
//
// One slot per polled resource. Each slot has exactly one writer (its poll
// task); readers get `Arc` snapshots or `SnapshotStream` subscriptions.

use std::sync::Arc;

use super::slot::{Snapshot, SnapshotSlot};
use crate::model::{FilamentChangeRequest, PrintJob, PrinterStatus};
use crate::stream::SnapshotStream;

/// Latest known state of the three polled resources.
///
/// Write access is crate-private and only exercised by the poller; the
/// public surface is read-only.
pub struct SnapshotStore {
    pub(crate) filament_changes: SnapshotSlot<FilamentChangeRequest>,
    pub(crate) print_jobs: SnapshotSlot<PrintJob>,
    pub(crate) printers: SnapshotSlot<PrinterStatus>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            filament_changes: SnapshotSlot::new(),
            print_jobs: SnapshotSlot::new(),
            printers: SnapshotSlot::new(),
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn filament_changes_snapshot(&self) -> Arc<Snapshot<FilamentChangeRequest>> {
        self.filament_changes.current()
    }

    pub fn print_jobs_snapshot(&self) -> Arc<Snapshot<PrintJob>> {
        self.print_jobs.current()
    }

    pub fn printers_snapshot(&self) -> Arc<Snapshot<PrinterStatus>> {
        self.printers.current()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_filament_changes(&self) -> SnapshotStream<FilamentChangeRequest> {
        SnapshotStream::new(self.filament_changes.subscribe())
    }

    pub fn subscribe_print_jobs(&self) -> SnapshotStream<PrintJob> {
        SnapshotStream::new(self.print_jobs.subscribe())
    }

    pub fn subscribe_printers(&self) -> SnapshotStream<PrinterStatus> {
        SnapshotStream::new(self.printers.subscribe())
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
