// ── Monitor abstraction ──
//
// Lifecycle management for one skynet service: owns the HTTP client, the
// snapshot store, the command dispatcher, and the three poll loops.

use std::sync::Arc;

use overseer_api::{SkynetClient, TransportConfig};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::command::{Command, CommandDispatcher};
use crate::config::MonitorConfig;
use crate::error::CoreError;
use crate::model::{FilamentChangeRequest, PrintJob, PrinterStatus};
use crate::notify::NotificationSink;
use crate::poller::{PollSettings, Resource, poll_task};
use crate::store::{Snapshot, SnapshotStore};
use crate::stream::SnapshotStream;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<MonitorInner>`. Polling starts with
/// [`start()`](Self::start) and stops with [`shutdown()`](Self::shutdown);
/// commands and one-shot reads work without starting the poll loops.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    client: SkynetClient,
    store: Arc<SnapshotStore>,
    dispatcher: CommandDispatcher,
    sink: Arc<dyn NotificationSink>,
    cancel: CancellationToken,
    /// Token for the running poll loops; replaced on each start.
    cancel_child: Mutex<CancellationToken>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Monitor {
    /// Create a monitor from configuration. Does NOT poll yet.
    pub fn new(config: MonitorConfig, sink: Arc<dyn NotificationSink>) -> Result<Self, CoreError> {
        config.validate()?;
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = SkynetClient::new(config.endpoint.clone(), &transport)?;
        Ok(Self::with_client(config, client, sink))
    }

    /// Create a monitor around an existing client.
    pub fn with_client(
        config: MonitorConfig,
        client: SkynetClient,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let dispatcher =
            CommandDispatcher::new(client.clone(), Arc::clone(&sink), config.notification_ttl);
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Self {
            inner: Arc::new(MonitorInner {
                config,
                client,
                store: Arc::new(SnapshotStore::new()),
                dispatcher,
                sink,
                cancel,
                cancel_child: Mutex::new(cancel_child),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Spawn the three poll loops. Calling `start` on a running monitor
    /// is a no-op.
    pub async fn start(&self) -> Result<(), CoreError> {
        tokio::runtime::Handle::try_current().map_err(|_| CoreError::NoRuntime)?;
        self.inner.config.validate()?;

        let mut handles = self.inner.task_handles.lock().await;
        if !handles.is_empty() {
            debug!("monitor already running");
            return Ok(());
        }

        let child = self.inner.cancel.child_token();
        *self.inner.cancel_child.lock().await = child.clone();

        let config = &self.inner.config;
        let settings = PollSettings {
            period: config.poll_interval,
            overlap: config.overlap,
            failure_escalation: config.failure_escalation,
            notification_ttl: config.notification_ttl,
        };

        {
            let client = self.inner.client.clone();
            let store = Arc::clone(&self.inner.store);
            handles.push(tokio::spawn(poll_task(
                Resource::FilamentChanges,
                settings,
                move || {
                    let client = client.clone();
                    async move { fetch_filament_changes(&client).await }
                },
                move |records: Vec<FilamentChangeRequest>| store.filament_changes.replace(records),
                Arc::clone(&self.inner.sink),
                child.clone(),
            )));
        }

        {
            let client = self.inner.client.clone();
            let store = Arc::clone(&self.inner.store);
            handles.push(tokio::spawn(poll_task(
                Resource::PrintJobs,
                settings,
                move || {
                    let client = client.clone();
                    async move { fetch_print_jobs(&client).await }
                },
                move |records: Vec<PrintJob>| store.print_jobs.replace(records),
                Arc::clone(&self.inner.sink),
                child.clone(),
            )));
        }

        {
            let client = self.inner.client.clone();
            let store = Arc::clone(&self.inner.store);
            handles.push(tokio::spawn(poll_task(
                Resource::Printers,
                settings,
                move || {
                    let client = client.clone();
                    async move { fetch_printers(&client).await }
                },
                move |records: Vec<PrinterStatus>| store.printers.replace(records),
                Arc::clone(&self.inner.sink),
                child,
            )));
        }

        info!(
            endpoint = %config.endpoint,
            interval_ms = config.poll_interval.as_millis(),
            overlap = %config.overlap,
            "monitor started"
        );
        Ok(())
    }

    /// Stop the poll loops and abandon their outstanding requests.
    /// The snapshots keep their last contents.
    pub async fn shutdown(&self) {
        self.inner.cancel_child.lock().await.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        info!("monitor stopped");
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Send a command in the background; the outcome reaches the sink.
    pub fn dispatch(&self, command: Command) -> JoinHandle<()> {
        self.inner.dispatcher.dispatch(command)
    }

    /// Send a command and wait for the outcome (also reported to the sink).
    pub async fn execute(&self, command: Command) -> Result<(), CoreError> {
        self.inner.dispatcher.execute(command).await
    }

    // ── One-shot reads ───────────────────────────────────────────

    /// Fetch and classify all printers without touching the store.
    pub async fn fetch_printers(&self) -> Result<Vec<PrinterStatus>, CoreError> {
        fetch_printers(&self.inner.client).await
    }

    pub async fn fetch_print_jobs(&self) -> Result<Vec<PrintJob>, CoreError> {
        fetch_print_jobs(&self.inner.client).await
    }

    pub async fn fetch_filament_changes(&self) -> Result<Vec<FilamentChangeRequest>, CoreError> {
        fetch_filament_changes(&self.inner.client).await
    }

    // ── Snapshot accessors (delegate to SnapshotStore) ───────────

    pub fn printers_snapshot(&self) -> Arc<Snapshot<PrinterStatus>> {
        self.inner.store.printers_snapshot()
    }

    pub fn print_jobs_snapshot(&self) -> Arc<Snapshot<PrintJob>> {
        self.inner.store.print_jobs_snapshot()
    }

    pub fn filament_changes_snapshot(&self) -> Arc<Snapshot<FilamentChangeRequest>> {
        self.inner.store.filament_changes_snapshot()
    }

    // ── Stream accessors ─────────────────────────────────────────

    pub fn printers(&self) -> SnapshotStream<PrinterStatus> {
        self.inner.store.subscribe_printers()
    }

    pub fn print_jobs(&self) -> SnapshotStream<PrintJob> {
        self.inner.store.subscribe_print_jobs()
    }

    pub fn filament_changes(&self) -> SnapshotStream<FilamentChangeRequest> {
        self.inner.store.subscribe_filament_changes()
    }
}

// ── Fetch helpers ────────────────────────────────────────────────

async fn fetch_printers(client: &SkynetClient) -> Result<Vec<PrinterStatus>, CoreError> {
    let raw = client.list_printers().await?;
    Ok(raw.into_iter().map(PrinterStatus::from).collect())
}

async fn fetch_print_jobs(client: &SkynetClient) -> Result<Vec<PrintJob>, CoreError> {
    let raw = client.list_print_jobs_pending_for_confirmation().await?;
    Ok(raw.into_iter().map(PrintJob::from).collect())
}

async fn fetch_filament_changes(
    client: &SkynetClient,
) -> Result<Vec<FilamentChangeRequest>, CoreError> {
    let raw = client.list_pending_filament_changes().await?;
    Ok(raw.into_iter().map(FilamentChangeRequest::from).collect())
}
