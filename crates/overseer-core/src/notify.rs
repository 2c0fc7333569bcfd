// ── Operator notifications ──
//
// The monitor reports command outcomes (and, when configured, repeated
// poll failures) as transient notifications. Presentation owns how they
// look; the core only hands them to a `NotificationSink`.

use std::time::Duration;

use serde::Serialize;
use strum::Display;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::DEFAULT_NOTIFICATION_TTL;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// A transient message for the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    /// How long presentation should keep it on screen.
    #[serde(skip)]
    pub ttl: Duration,
}

impl Notification {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
            ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title, message)
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Anything that can show a notification to the operator.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Forward notifications to a presentation task over a channel.
impl NotificationSink for mpsc::UnboundedSender<Notification> {
    fn notify(&self, notification: Notification) {
        // A closed receiver means presentation is gone; nothing left to show.
        let _ = self.send(notification);
    }
}

/// Sink that only writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Success => {
                info!(severity = %n.severity, title = %n.title, "{}", n.message);
            }
            Severity::Warning | Severity::Error => {
                warn!(severity = %n.severity, title = %n.title, "{}", n.message);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn channel_sink_forwards() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.notify(Notification::success("Change confirmed", "Printer ID: 7"));
        let n = rx.try_recv().unwrap();
        assert_eq!(n.severity, Severity::Success);
        assert_eq!(n.message, "Printer ID: 7");
        assert_eq!(n.ttl, DEFAULT_NOTIFICATION_TTL);
    }

    #[test]
    fn channel_sink_ignores_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel::<Notification>();
        drop(rx);
        tx.notify(Notification::error("x", "y"));
    }
}
