// ── Runtime monitor configuration ──
//
// Describes *where* the service lives and *how* to poll it. Never touches
// disk: overseer-config or the CLI builds a `MonitorConfig` and hands it in.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

use crate::error::CoreError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/skynet/";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(10_000);

/// What a poll tick does when the previous request for the same resource
/// has not resolved yet.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Issue the request anyway. Overlapping responses race and the one
    /// that completes last overwrites the snapshot.
    #[default]
    Concurrent,
    /// Skip the tick until the outstanding request resolves.
    SkipWhileInFlight,
}

/// Configuration for monitoring one skynet service.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Service base URL (e.g. `http://farm.local/skynet/`).
    pub endpoint: Url,
    /// Per-request timeout. `None` means requests may hang indefinitely.
    pub timeout: Option<Duration>,
    /// Period of each of the three poll loops.
    pub poll_interval: Duration,
    /// Behavior when a tick fires while its previous request is pending.
    pub overlap: OverlapPolicy,
    /// Emit a warning notification after this many consecutive poll
    /// failures of one resource. `None` keeps failures in the log only.
    pub failure_escalation: Option<u32>,
    /// How long presentation should show a notification.
    pub notification_ttl: Duration,
}

impl MonitorConfig {
    /// Default settings against the given endpoint.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            overlap: OverlapPolicy::default(),
            failure_escalation: None,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }

    /// Reject settings the poll loops cannot run with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.poll_interval.is_zero() {
            return Err(CoreError::Config {
                message: "poll interval must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"))
    }
}
