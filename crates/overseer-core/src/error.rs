// ── Core error types ──
//
// Errors surfaced by overseer-core. Consumers never see reqwest or
// serde_json errors directly; the `From<overseer_api::Error>` impl
// translates transport-layer failures into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach skynet at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to skynet timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {path}")]
    NotFound { path: String },

    // ── Service errors (wrapped, not exposed raw) ────────────────────
    #[error("skynet rejected the request: {message}")]
    Api {
        message: String,
        /// HTTP status code (if the service answered).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Lifecycle errors ─────────────────────────────────────────────
    #[error("Monitor is not running inside a Tokio runtime")]
    NoRuntime,

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<overseer_api::Error> for CoreError {
    fn from(err: overseer_api::Error) -> Self {
        let not_found = err.is_not_found();
        let status = err.status();
        match err {
            overseer_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else if not_found {
                    CoreError::NotFound {
                        path: e.url().map_or_else(String::new, |u| u.path().to_owned()),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status,
                    }
                }
            }
            overseer_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            overseer_api::Error::ClientBuild(reason) => CoreError::Config {
                message: format!("HTTP client: {reason}"),
            },
            overseer_api::Error::Status { path, .. } if not_found => CoreError::NotFound { path },
            overseer_api::Error::Status { path, body, .. } => CoreError::Api {
                message: format!("HTTP {} from {path}: {body}", status.unwrap_or_default()),
                status,
            },
            overseer_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_404_maps_to_not_found() {
        let err = CoreError::from(overseer_api::Error::Status {
            status: 404,
            path: "operations/reset_printer/3/".into(),
            body: String::new(),
        });
        assert!(matches!(err, CoreError::NotFound { ref path } if path.contains("reset_printer")));
    }

    #[test]
    fn other_statuses_keep_code() {
        let err = CoreError::from(overseer_api::Error::Status {
            status: 502,
            path: "list/printers/".into(),
            body: "bad gateway".into(),
        });
        assert!(matches!(err, CoreError::Api { status: Some(502), .. }));
    }
}
