// ── Background polling ──
//
// One loop per resource. Every tick spawns an independent fetch; a
// successful fetch replaces the resource's snapshot wholesale, a failed
// one is logged and leaves the snapshot untouched. Under the concurrent
// overlap policy responses are applied in arrival order, so a slow stale
// response can overwrite a newer one.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use strum::Display;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::config::OverlapPolicy;
use crate::error::CoreError;
use crate::notify::{Notification, NotificationSink};

/// The three polled resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    FilamentChanges,
    PrintJobs,
    Printers,
}

impl Resource {
    /// Human label used in escalation notifications.
    pub fn label(self) -> &'static str {
        match self {
            Self::FilamentChanges => "filament changes",
            Self::PrintJobs => "print jobs",
            Self::Printers => "printers",
        }
    }
}

/// How one poll loop behaves.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PollSettings {
    pub period: Duration,
    pub overlap: OverlapPolicy,
    pub failure_escalation: Option<u32>,
    pub notification_ttl: Duration,
}

#[derive(Default)]
struct PollState {
    in_flight: AtomicBool,
    failures: AtomicU32,
}

/// Run one poll loop until `cancel` fires.
///
/// The first fetch happens one `period` after the loop starts. `fetch`
/// produces the converted records; `apply` publishes them.
pub(crate) async fn poll_task<T, F, Fut, A>(
    resource: Resource,
    settings: PollSettings,
    fetch: F,
    apply: A,
    sink: Arc<dyn NotificationSink>,
    cancel: CancellationToken,
) where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>, CoreError>> + Send + 'static,
    A: Fn(Vec<T>) + Send + Sync + 'static,
{
    let apply = Arc::new(apply);
    let state = Arc::new(PollState::default());
    let skip_busy = settings.overlap == OverlapPolicy::SkipWhileInFlight;

    let mut interval = tokio::time::interval(settings.period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await; // consume the immediate first tick

    debug!(%resource, period_ms = settings.period.as_millis(), "poll loop started");

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if skip_busy && state.in_flight.swap(true, Ordering::AcqRel) {
                    trace!(%resource, "previous poll still in flight, skipping tick");
                    continue;
                }

                let request = fetch();
                let apply = Arc::clone(&apply);
                let state = Arc::clone(&state);
                let sink = Arc::clone(&sink);
                let cancel = cancel.clone();

                tokio::spawn(async move {
                    let result = tokio::select! {
                        biased;
                        () = cancel.cancelled() => None,
                        r = request => Some(r),
                    };

                    match result {
                        None => {}
                        Some(Ok(records)) => {
                            trace!(%resource, count = records.len(), "poll succeeded");
                            apply(records);
                            state.failures.store(0, Ordering::Release);
                        }
                        Some(Err(e)) => {
                            let streak = state.failures.fetch_add(1, Ordering::AcqRel) + 1;
                            warn!(%resource, consecutive = streak, error = %e, "poll failed");
                            if settings.failure_escalation == Some(streak) {
                                let label = resource.label();
                                let message =
                                    format!("Could not refresh {label} ({streak} in a row): {e}");
                                sink.notify(
                                    Notification::warning("Polling error", message)
                                        .with_ttl(settings.notification_ttl),
                                );
                            }
                        }
                    }

                    if skip_busy {
                        state.in_flight.store(false, Ordering::Release);
                    }
                });
            }
        }
    }

    debug!(%resource, "poll loop stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use tokio::sync::{mpsc, oneshot};
    use tokio::task::JoinHandle;

    use super::*;
    use crate::notify::Severity;
    use crate::store::SnapshotSlot;

    const PERIOD: Duration = Duration::from_millis(100);

    type Reply = Result<Vec<u32>, CoreError>;

    /// A fetch whose responses are released by the test, one per call.
    /// Calls beyond the queued replies never resolve.
    struct Scripted {
        replies: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
        calls: AtomicU32,
    }

    impl Scripted {
        fn new(n: usize) -> (Arc<Self>, Vec<oneshot::Sender<Reply>>) {
            let (senders, receivers): (Vec<_>, VecDeque<_>) =
                (0..n).map(|_| oneshot::channel()).unzip();
            let this = Arc::new(Self {
                replies: Mutex::new(receivers),
                calls: AtomicU32::new(0),
            });
            (this, senders)
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::Acquire)
        }
    }

    struct Harness {
        slot: Arc<SnapshotSlot<u32>>,
        script: Arc<Scripted>,
        notifications: mpsc::UnboundedReceiver<Notification>,
        cancel: CancellationToken,
        handle: JoinHandle<()>,
    }

    fn spawn_loop(
        replies: usize,
        overlap: OverlapPolicy,
        failure_escalation: Option<u32>,
    ) -> (Harness, Vec<oneshot::Sender<Reply>>) {
        let slot = Arc::new(SnapshotSlot::new());
        let (script, senders) = Scripted::new(replies);
        let (tx, notifications) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let fetch_script = Arc::clone(&script);
        let fetch = move || {
            fetch_script.calls.fetch_add(1, Ordering::AcqRel);
            let next = fetch_script.replies.lock().unwrap().pop_front();
            async move {
                match next {
                    Some(rx) => rx.await.unwrap(),
                    None => std::future::pending().await,
                }
            }
        };
        let apply_slot = Arc::clone(&slot);
        let apply = move |records: Vec<u32>| apply_slot.replace(records);

        let settings = PollSettings {
            period: PERIOD,
            overlap,
            failure_escalation,
            notification_ttl: Duration::from_secs(10),
        };
        let handle = tokio::spawn(poll_task(
            Resource::Printers,
            settings,
            fetch,
            apply,
            Arc::new(tx),
            cancel.clone(),
        ));

        (
            Harness {
                slot,
                script,
                notifications,
                cancel,
                handle,
            },
            senders,
        )
    }

    /// Let spawned tasks run without crossing the next tick.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    fn failure() -> Reply {
        Err(CoreError::Api {
            message: "HTTP 500".into(),
            status: Some(500),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn first_fetch_waits_one_period() {
        let (h, _senders) = spawn_loop(1, OverlapPolicy::Concurrent, None);

        tokio::time::sleep(PERIOD / 2).await;
        assert_eq!(h.script.calls(), 0);

        tokio::time::sleep(PERIOD).await;
        assert_eq!(h.script.calls(), 1);

        h.cancel.cancel();
        h.handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn success_replaces_snapshot_wholesale() {
        let (h, mut senders) = spawn_loop(2, OverlapPolicy::Concurrent, None);

        tokio::time::sleep(PERIOD + Duration::from_millis(10)).await;
        senders.remove(0).send(Ok(vec![1, 2, 3])).unwrap();
        settle().await;
        assert_eq!(h.slot.current().records, vec![1, 2, 3]);

        tokio::time::sleep(PERIOD).await;
        senders.remove(0).send(Ok(vec![4])).unwrap();
        settle().await;

        let snap = h.slot.current();
        assert_eq!(snap.records, vec![4]);
        assert_eq!(snap.generation, 2);

        h.cancel.cancel();
        h.handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn failure_keeps_previous_snapshot() {
        let (mut h, mut senders) = spawn_loop(2, OverlapPolicy::Concurrent, None);

        tokio::time::sleep(PERIOD + Duration::from_millis(10)).await;
        senders.remove(0).send(Ok(vec![5, 6])).unwrap();
        settle().await;

        tokio::time::sleep(PERIOD).await;
        senders.remove(0).send(failure()).unwrap();
        settle().await;

        let snap = h.slot.current();
        assert_eq!(snap.records, vec![5, 6]);
        assert_eq!(snap.generation, 1);
        assert!(h.notifications.try_recv().is_err());

        h.cancel.cancel();
        h.handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn late_stale_response_overwrites_newer_one() {
        let (h, mut senders) = spawn_loop(2, OverlapPolicy::Concurrent, None);

        // Two ticks, two outstanding requests.
        tokio::time::sleep(PERIOD * 2 + Duration::from_millis(10)).await;
        assert_eq!(h.script.calls(), 2);
        let first = senders.remove(0);
        let second = senders.remove(0);

        second.send(Ok(vec![2])).unwrap();
        settle().await;
        assert_eq!(h.slot.current().records, vec![2]);

        first.send(Ok(vec![1])).unwrap();
        settle().await;
        assert_eq!(h.slot.current().records, vec![1]);

        h.cancel.cancel();
        h.handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn skip_policy_waits_for_outstanding_request() {
        let (h, mut senders) = spawn_loop(2, OverlapPolicy::SkipWhileInFlight, None);

        tokio::time::sleep(PERIOD * 3 + Duration::from_millis(10)).await;
        assert_eq!(h.script.calls(), 1);

        senders.remove(0).send(Ok(vec![1])).unwrap();
        settle().await;
        assert_eq!(h.slot.current().records, vec![1]);

        tokio::time::sleep(PERIOD).await;
        assert_eq!(h.script.calls(), 2);

        h.cancel.cancel();
        h.handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn escalates_once_per_failure_streak() {
        let (mut h, mut senders) = spawn_loop(6, OverlapPolicy::Concurrent, Some(2));

        for _ in 0..3 {
            tokio::time::sleep(PERIOD).await;
            senders.remove(0).send(failure()).unwrap();
            settle().await;
        }

        let n = h.notifications.try_recv().unwrap();
        assert_eq!(n.severity, Severity::Warning);
        assert!(n.message.contains("printers"), "{}", n.message);
        assert!(h.notifications.try_recv().is_err());

        // Success resets the streak; two more failures escalate again.
        tokio::time::sleep(PERIOD).await;
        senders.remove(0).send(Ok(vec![9])).unwrap();
        settle().await;
        tokio::time::sleep(PERIOD).await;
        senders.remove(0).send(failure()).unwrap();
        settle().await;
        assert!(h.notifications.try_recv().is_err());
        tokio::time::sleep(PERIOD).await;
        senders.remove(0).send(failure()).unwrap();
        settle().await;

        let n = h.notifications.try_recv().unwrap();
        assert_eq!(n.severity, Severity::Warning);
        assert!(n.message.contains("2 in a row"), "{}", n.message);
        assert!(h.notifications.try_recv().is_err());

        h.cancel.cancel();
        h.handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_loop_and_pending_fetches() {
        let (h, mut senders) = spawn_loop(1, OverlapPolicy::Concurrent, None);

        tokio::time::sleep(PERIOD + Duration::from_millis(10)).await;
        h.cancel.cancel();
        h.handle.await.unwrap();
        settle().await;

        // The pending fetch was abandoned: its reply has nowhere to go.
        let late = senders.remove(0);
        assert!(late.send(Ok(vec![1])).is_err());
        assert!(h.slot.current().is_empty());

        tokio::time::sleep(PERIOD * 5).await;
        assert_eq!(h.script.calls(), 1);
    }
}
