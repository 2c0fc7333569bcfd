// ── Reactive snapshot streams ──
//
// Subscription types for consuming snapshot replacements from the
// SnapshotStore. This is the only channel from the poller to presentation.

use std::sync::Arc;

use tokio::sync::watch;

use crate::store::Snapshot;

/// A read-only subscription to one resource's snapshot.
///
/// Provides both point-in-time access and change notification via
/// [`changed()`](Self::changed).
pub struct SnapshotStream<T: Send + Sync + 'static> {
    current: Arc<Snapshot<T>>,
    receiver: watch::Receiver<Arc<Snapshot<T>>>,
}

impl<T: Send + Sync + 'static> SnapshotStream<T> {
    pub(crate) fn new(mut receiver: watch::Receiver<Arc<Snapshot<T>>>) -> Self {
        let current = receiver.borrow_and_update().clone();
        Self { current, receiver }
    }

    /// The snapshot seen at creation or at the last `changed()`.
    pub fn current(&self) -> &Arc<Snapshot<T>> {
        &self.current
    }

    /// Wait for the next replacement and return it.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<Snapshot<T>>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }
}
