//! Polling synchronization and command dispatch between `overseer-api` and
//! presentation (the CLI).
//!
//! - **[`Monitor`]**: facade owning the HTTP client, the snapshot store, the
//!   command dispatcher, and three background poll loops (filament changes,
//!   print jobs, printers). [`start()`](Monitor::start) spawns the loops,
//!   [`shutdown()`](Monitor::shutdown) cancels them.
//!
//! - **[`SnapshotStore`]**: one `tokio::sync::watch`-backed slot per
//!   resource, each written only by its poll loop and replaced wholesale on
//!   every successful poll.
//!
//! - **[`SnapshotStream<T>`]**: subscription handle exposing `current()` and
//!   `changed()` for reactive rendering.
//!
//! - **[`Command`]**: tagged operator actions, each mapped to one request and
//!   fixed notification texts. Outcomes are reported through a
//!   [`NotificationSink`].
//!
//! - **[`classify`]**: the printer display-class rules.

pub mod classify;
pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod monitor;
pub mod notify;
pub mod poller;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use classify::classify;
pub use command::{Command, CommandDispatcher, Method, Notice};
pub use config::{MonitorConfig, OverlapPolicy};
pub use error::CoreError;
pub use monitor::Monitor;
pub use notify::{Notification, NotificationSink, Severity, TracingSink};
pub use poller::Resource;
pub use store::{Snapshot, SnapshotStore};
pub use stream::SnapshotStream;

pub use model::{DisplayClass, FilamentChangeRequest, PrintJob, PrinterStatus, StatusFlags};
