// ── Single-resource snapshot slot ──
//
// Holds the latest snapshot of one resource type and pushes every
// replacement to subscribers through a `watch` channel.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

/// All pending records of one type as of the last successful poll.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    /// Records in the order the service returned them.
    pub records: Vec<T>,
    /// When the poll that produced this snapshot completed.
    /// `None` until the first successful poll.
    pub updated_at: Option<DateTime<Utc>>,
    /// Number of replacements so far; 0 for the initial empty snapshot.
    pub generation: u64,
}

impl<T> Snapshot<T> {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            updated_at: None,
            generation: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Latest snapshot of one resource, replaced wholesale on each write.
pub(crate) struct SnapshotSlot<T: Send + Sync + 'static> {
    snapshot: watch::Sender<Arc<Snapshot<T>>>,
}

impl<T: Send + Sync + 'static> SnapshotSlot<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Snapshot::empty()));
        Self { snapshot }
    }

    /// Discard the current records and publish `records` in their place.
    pub(crate) fn replace(&self, records: Vec<T>) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| {
            *snap = Arc::new(Snapshot {
                records,
                updated_at: Some(Utc::now()),
                generation: snap.generation + 1,
            });
        });
    }

    /// Current snapshot (cheap `Arc` clone).
    pub(crate) fn current(&self) -> Arc<Snapshot<T>> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Snapshot<T>>> {
        self.snapshot.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_unstamped() {
        let slot: SnapshotSlot<u32> = SnapshotSlot::new();
        let snap = slot.current();
        assert!(snap.is_empty());
        assert_eq!(snap.updated_at, None);
        assert_eq!(snap.generation, 0);
    }

    #[test]
    fn replace_discards_previous_records() {
        let slot = SnapshotSlot::new();
        slot.replace(vec![1, 2, 3]);
        slot.replace(vec![4]);

        let snap = slot.current();
        assert_eq!(snap.records, vec![4]);
        assert_eq!(snap.generation, 2);
        assert!(snap.updated_at.is_some());
    }

    #[test]
    fn replace_preserves_order() {
        let slot = SnapshotSlot::new();
        slot.replace(vec![9, 1, 5]);
        let collected: Vec<_> = slot.current().iter().copied().collect();
        assert_eq!(collected, vec![9, 1, 5]);
    }

    #[test]
    fn readers_keep_their_snapshot_after_replace() {
        let slot = SnapshotSlot::new();
        slot.replace(vec!["a"]);
        let held = slot.current();
        slot.replace(vec!["b"]);
        assert_eq!(held.records, vec!["a"]);
        assert_eq!(slot.current().records, vec!["b"]);
    }

    #[test]
    fn subscribers_see_replacements() {
        let slot = SnapshotSlot::new();
        let mut rx = slot.subscribe();
        slot.replace(vec![7]);
        assert!(rx.has_changed().unwrap_or(false));
        assert_eq!(rx.borrow_and_update().records, vec![7]);
    }
}
