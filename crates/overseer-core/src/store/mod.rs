// ── Snapshot store ──
//
// The monitor's entire shared mutable state: one wholesale-replaced
// snapshot per polled resource, broadcast through `watch` channels.

mod slot;
mod snapshot_store;

pub use slot::Snapshot;
pub(crate) use slot::SnapshotSlot;
pub use snapshot_store::SnapshotStore;
